//! Element definitions for the whiteboard.

mod image;
mod linear;
mod pencil;
mod rectangle;
mod text;

pub use image::{BitmapRef, Image};
pub use linear::{Linear, LinearKind};
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::{FixedMetrics, Text, TextLine, TextMeasure};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for elements within a snapshot.
///
/// Ids are minted by the [`SnapshotStore`](crate::history::SnapshotStore) and
/// stay stable until the element is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of [`Element`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Linear,
    Rectangle,
    Pencil,
    Text,
    Image,
}

/// A scene element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Linear(Linear),
    Rectangle(Rectangle),
    Pencil(Pencil),
    Text(Text),
    Image(Image),
}

impl Element {
    /// Get the element id.
    pub fn id(&self) -> ElementId {
        match self {
            Element::Linear(e) => e.id,
            Element::Rectangle(e) => e.id,
            Element::Pencil(e) => e.id,
            Element::Text(e) => e.id,
            Element::Image(e) => e.id,
        }
    }

    /// Get the element kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Linear(_) => ElementKind::Linear,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Pencil(_) => ElementKind::Pencil,
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
        }
    }

    /// Normalized bounding box in scene coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Linear(e) => e.bounds(),
            Element::Rectangle(e) => e.bounds(),
            Element::Pencil(e) => e.bounds(),
            Element::Text(e) => e.bounds(),
            Element::Image(e) => e.bounds(),
        }
    }

    /// Return a copy of this element carrying a different id.
    pub fn with_id(mut self, id: ElementId) -> Self {
        match &mut self {
            Element::Linear(e) => e.id = id,
            Element::Rectangle(e) => e.id = id,
            Element::Pencil(e) => e.id = id,
            Element::Text(e) => e.id = id,
            Element::Image(e) => e.id = id,
        }
        self
    }

    /// Return a copy of this element shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        let shift = |p: Point| p + delta;
        match self {
            Element::Linear(e) => Element::Linear(Linear {
                start: shift(e.start),
                end: shift(e.end),
                ..e.clone()
            }),
            Element::Rectangle(e) => Element::Rectangle(Rectangle {
                p1: shift(e.p1),
                p2: shift(e.p2),
                ..e.clone()
            }),
            Element::Pencil(e) => Element::Pencil(Pencil {
                id: e.id,
                points: e.points.iter().copied().map(shift).collect(),
            }),
            Element::Text(e) => Element::Text(Text {
                id: e.id,
                is_writing: e.is_writing,
                lines: e
                    .lines
                    .iter()
                    .map(|line| TextLine {
                        position: shift(line.position),
                        ..line.clone()
                    })
                    .collect(),
            }),
            Element::Image(e) => Element::Image(Image {
                p1: shift(e.p1),
                p2: shift(e.p2),
                ..e.clone()
            }),
        }
    }
}

/// Bounding box of a set of points, `Rect::ZERO` when empty.
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}
