//! Pointer gesture state machine.
//!
//! The [`Editor`] turns a stream of pointer events into selection, move,
//! resize and rubber-band gestures:
//! - Pointer down resolves what was hit and enters a `Ready*` state or
//!   starts a rubber band.
//! - The first pointer move commits exactly one history entry; every later
//!   move rewrites that entry in place.
//! - Pointer up settles into a selected state. A click without movement
//!   touches no history at all.
//!
//! Every action goes through the transition table in [`state`]; an action
//! taken from a state that does not allow it is a contract violation.

mod editor;
mod input;
mod overlay;
mod state;

pub use editor::{Editor, EditorCommand};
pub use input::{PointerEvent, PointerPhase};
pub use overlay::{CursorHint, DashedOutline};
pub use state::{Action, InteractionState, StateKind};
