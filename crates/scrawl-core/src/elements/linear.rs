//! Straight lines and arrows.

use super::ElementId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Whether a linear element is drawn with an arrowhead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearKind {
    #[default]
    Line,
    Arrow,
}

/// A straight segment from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Linear {
    pub(crate) id: ElementId,
    /// Start point.
    pub start: Point,
    /// End point (arrowhead side for arrows).
    pub end: Point,
    pub kind: LinearKind,
}

impl Linear {
    /// Create a new linear element.
    pub fn new(id: ElementId, start: Point, end: Point, kind: LinearKind) -> Self {
        Self { id, start, end, kind }
    }

    /// Create a plain line.
    pub fn line(id: ElementId, start: Point, end: Point) -> Self {
        Self::new(id, start, end, LinearKind::Line)
    }

    /// Create an arrow pointing at `end`.
    pub fn arrow(id: ElementId, start: Point, end: Point) -> Self {
        Self::new(id, start, end, LinearKind::Arrow)
    }

    /// Get the element id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Normalized bounding box of the segment.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}
