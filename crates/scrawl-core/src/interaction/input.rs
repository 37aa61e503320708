//! Pointer input consumed by the editor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer event in client (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub client: Point,
    /// Secondary touches and pens are ignored.
    pub is_primary: bool,
}

impl PointerEvent {
    /// Create a primary pointer event.
    pub fn new(phase: PointerPhase, client: Point) -> Self {
        Self {
            phase,
            client,
            is_primary: true,
        }
    }

    /// Primary pointer pressed at client `(x, y)`.
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Down, Point::new(x, y))
    }

    /// Primary pointer moved to client `(x, y)`.
    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Move, Point::new(x, y))
    }

    /// Primary pointer released at client `(x, y)`.
    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Up, Point::new(x, y))
    }

    /// Mark the event as coming from a non-primary pointer.
    pub fn secondary(mut self) -> Self {
        self.is_primary = false;
        self
    }
}
