//! Scrawl Core Library
//!
//! Platform-agnostic interaction core for the Scrawl whiteboard: the element
//! model, hit testing, move/resize transforms, the undo history and the
//! pointer gesture state machine that ties them together.

pub mod camera;
pub mod clipboard;
pub mod config;
pub mod elements;
pub mod error;
pub mod hit;
pub mod history;
pub mod interaction;
pub mod snapshot;
pub mod transform;

pub use camera::{Camera, Viewport};
pub use config::EditorConfig;
pub use elements::{Element, ElementId, ElementKind, FixedMetrics, TextMeasure};
pub use error::{EditorError, EditorResult};
pub use hit::{Handle, Hit, HitTester, HitZone};
pub use history::{CommitOp, SnapshotStore};
pub use interaction::{
    Action, CursorHint, DashedOutline, Editor, EditorCommand, InteractionState, PointerEvent,
    PointerPhase, StateKind,
};
pub use snapshot::Snapshot;
