//! Rectangle element.

use super::ElementId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by two opposite corners.
///
/// `p1` occupies the top-left slot and `p2` the bottom-right slot. While a
/// resize gesture is live the corners may cross (negative width or height);
/// [`Rectangle::canonical`] restores `p1 < p2` once the gesture ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    pub p1: Point,
    pub p2: Point,
}

impl Rectangle {
    /// Create a new rectangle from two corners.
    pub fn new(id: ElementId, p1: Point, p2: Point) -> Self {
        Self { id, p1, p2 }
    }

    /// Get the element id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Signed width; negative while flipped horizontally.
    pub fn width(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    /// Signed height; negative while flipped vertically.
    pub fn height(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    /// Whether the corners have crossed.
    pub fn is_flipped(&self) -> bool {
        self.width() < 0.0 || self.height() < 0.0
    }

    /// Normalized bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    /// Swap coordinates so that `p1.x <= p2.x` and `p1.y <= p2.y`.
    pub fn canonical(&self) -> Self {
        let bounds = self.bounds();
        Self {
            id: self.id,
            p1: Point::new(bounds.x0, bounds.y0),
            p2: Point::new(bounds.x1, bounds.y1),
        }
    }
}
