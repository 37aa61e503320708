//! Error types for the editor core.
//!
//! Every variant except the parse errors is a contract violation: it means the
//! caller (or the core itself) asked for something the current state cannot
//! do. They are returned rather than panicking so tests can assert on them,
//! but they are never meant to be shown to the user.

use crate::elements::{ElementId, ElementKind};
use crate::interaction::{Action, StateKind};
use thiserror::Error;

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("action {action:?} is not allowed from state {from:?}")]
    InvalidTransition { action: Action, from: StateKind },
    #[error("element {0} does not exist in the current snapshot")]
    StaleElement(ElementId),
    #[error("element {id} is a {found:?}, gesture expected {expected}")]
    KindMismatch {
        id: ElementId,
        expected: &'static str,
        found: ElementKind,
    },
    #[error("invalid clipboard payload: {0}")]
    Clipboard(#[source] serde_json::Error),
    #[error("invalid editor config: {0}")]
    Config(#[source] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
