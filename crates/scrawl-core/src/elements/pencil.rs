//! Freehand pencil stroke.

use super::{ElementId, points_bounds};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand stroke (ordered series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pencil {
    pub(crate) id: ElementId,
    /// Points in drawing order.
    pub points: Vec<Point>,
}

impl Pencil {
    /// Create a new stroke from sampled points.
    pub fn new(id: ElementId, points: Vec<Point>) -> Self {
        Self { id, points }
    }

    /// Get the element id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Bounding box of the sampled points.
    pub fn bounds(&self) -> Rect {
        points_bounds(&self.points)
    }

    /// Consecutive point pairs making up the stroke.
    ///
    /// A single-point stroke yields one degenerate segment so it can still be
    /// hit.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let single = (self.points.len() == 1).then(|| (self.points[0], self.points[0]));
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(single)
    }
}
