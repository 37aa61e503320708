//! Image element.

use super::ElementId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Opaque reference to a decoded bitmap owned by the rendering side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitmapRef(pub String);

/// A raster image placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ElementId,
    /// Top-left corner.
    pub p1: Point,
    /// Bottom-right corner.
    pub p2: Point,
    pub bitmap: BitmapRef,
}

impl Image {
    /// Create a new image placed between two corners.
    pub fn new(id: ElementId, p1: Point, p2: Point, bitmap: BitmapRef) -> Self {
        Self { id, p1, p2, bitmap }
    }

    /// Get the element id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Normalized bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    /// Width over height, 1.0 for degenerate images.
    pub fn aspect_ratio(&self) -> f64 {
        let bounds = self.bounds();
        if bounds.height() <= f64::EPSILON || bounds.width() <= f64::EPSILON {
            1.0
        } else {
            bounds.width() / bounds.height()
        }
    }
}
