//! Viewport mapping from client (screen) coordinates to scene coordinates.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Maps pointer positions from client space into scene space.
///
/// The editor never owns pan/zoom state; whoever composes it supplies a
/// mapper, either a [`Camera`] or any `Fn(Point) -> Point`.
pub trait Viewport {
    fn to_scene(&self, client: Point) -> Point;
}

impl<F: Fn(Point) -> Point> Viewport for F {
    fn to_scene(&self, client: Point) -> Point {
        self(client)
    }
}

/// Camera for a pannable, zoomable canvas.
///
/// A scene point `p` is drawn at `p * zoom + offset` on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen position of the scene origin.
    pub offset: Vec2,
    /// Scale factor (1.0 = 100%).
    pub zoom: f64,
    /// Lower bound for [`Camera::zoom_at`].
    pub min_zoom: f64,
    /// Upper bound for [`Camera::zoom_at`].
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create an identity camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene-to-screen affine, for hosts that render the scene.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom).then_translate(self.offset)
    }

    /// Convert a screen point to scene coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        ((screen_point.to_vec2() - self.offset) / self.zoom).to_point()
    }

    /// Convert a scene point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Shift the view by `delta` screen units.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Scale the zoom by `factor` within the zoom bounds. The scene point
    /// under `screen_point` stays under it.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let pinned = self.screen_to_world(screen_point);
        self.zoom = zoom;
        self.offset = screen_point.to_vec2() - pinned.to_vec2() * zoom;
    }
}

impl Viewport for Camera {
    fn to_scene(&self, client: Point) -> Point {
        self.screen_to_world(client)
    }
}
