//! Hit testing: which element is under a scene position, and which part of it.

use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, Pencil, Text};
use crate::snapshot::Snapshot;
use kurbo::{Point, Rect};

/// A resize handle on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Start point of a line or arrow.
    Start,
    /// End point of a line or arrow.
    End,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Handle {
    /// Corner handles in hit priority order.
    pub const CORNERS: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomRight,
        Handle::BottomLeft,
    ];

    /// The corner diagonally across, for corner handles.
    pub fn opposite(self) -> Handle {
        match self {
            Handle::Start => Handle::End,
            Handle::End => Handle::Start,
            Handle::TopLeft => Handle::BottomRight,
            Handle::TopRight => Handle::BottomLeft,
            Handle::BottomRight => Handle::TopLeft,
            Handle::BottomLeft => Handle::TopRight,
        }
    }

    /// Position of this corner on a normalized rectangle.
    ///
    /// Endpoint handles have no corner; they map to the top-left and
    /// bottom-right respectively.
    pub fn corner_of(self, rect: Rect) -> Point {
        match self {
            Handle::TopLeft | Handle::Start => Point::new(rect.x0, rect.y0),
            Handle::TopRight => Point::new(rect.x1, rect.y0),
            Handle::BottomRight | Handle::End => Point::new(rect.x1, rect.y1),
            Handle::BottomLeft => Point::new(rect.x0, rect.y1),
        }
    }

    /// Whether this is a rectangle/image corner rather than a line endpoint.
    pub fn is_corner(self) -> bool {
        !matches!(self, Handle::Start | Handle::End)
    }
}

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    /// A resize handle (corner or endpoint).
    Handle(Handle),
    /// The stroke itself: a segment, a rectangle edge, a pencil path.
    OnLine,
    /// The interior of an image or text block.
    Inside,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub zone: HitZone,
}

/// Square proximity test used for handles.
pub fn is_near_point(point: Point, target: Point, threshold: f64) -> bool {
    (point.x - target.x).abs() < threshold && (point.y - target.y).abs() < threshold
}

/// Whether `point` lies on the segment `a`-`b`.
///
/// A point on the segment satisfies `|ab| = |ap| + |pb|`; the slack allowed is
/// `threshold`, which makes the hit area a thin ellipse around the segment.
pub fn is_on_segment(point: Point, a: Point, b: Point, threshold: f64) -> bool {
    let along = a.distance(point) + b.distance(point);
    (a.distance(b) - along).abs() < threshold
}

/// Pure geometry hit tester parameterized by its thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTester {
    pub handle_threshold: f64,
    pub line_threshold: f64,
    pub pencil_threshold: f64,
}

impl Default for HitTester {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl HitTester {
    /// Create a hit tester with the configured thresholds.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            handle_threshold: config.handle_threshold,
            line_threshold: config.line_threshold,
            pencil_threshold: config.pencil_threshold,
        }
    }

    /// Find the topmost element under `point`.
    ///
    /// Elements are scanned from the last (topmost) to the first, so the
    /// element drawn on top wins when several overlap.
    pub fn hit_scan(&self, snapshot: &Snapshot, point: Point) -> Option<Hit> {
        snapshot.iter_topmost_first().find_map(|element| {
            self.hit_element(element, point).map(|zone| Hit {
                id: element.id(),
                zone,
            })
        })
    }

    /// Resolve the zone of a single element under `point`, if any.
    pub fn hit_element(&self, element: &Element, point: Point) -> Option<HitZone> {
        match element {
            Element::Linear(line) => {
                if is_near_point(point, line.start, self.handle_threshold) {
                    Some(HitZone::Handle(Handle::Start))
                } else if is_near_point(point, line.end, self.handle_threshold) {
                    Some(HitZone::Handle(Handle::End))
                } else if is_on_segment(point, line.start, line.end, self.line_threshold) {
                    Some(HitZone::OnLine)
                } else {
                    None
                }
            }
            Element::Rectangle(rect) => self.hit_box(rect.bounds(), point),
            Element::Image(image) => {
                let bounds = image.bounds();
                self.hit_box(bounds, point).or_else(|| {
                    let inside = point.x > bounds.x0
                        && point.x < bounds.x1
                        && point.y > bounds.y0
                        && point.y < bounds.y1;
                    inside.then_some(HitZone::Inside)
                })
            }
            Element::Pencil(pencil) => self.hit_pencil(pencil, point),
            Element::Text(text) => hit_text(text, point),
        }
    }

    /// Corner handles, then the four edges. No interior hit.
    fn hit_box(&self, bounds: Rect, point: Point) -> Option<HitZone> {
        if let Some(handle) = Handle::CORNERS
            .into_iter()
            .find(|h| is_near_point(point, h.corner_of(bounds), self.handle_threshold))
        {
            return Some(HitZone::Handle(handle));
        }

        let corners = Handle::CORNERS.map(|h| h.corner_of(bounds));
        let on_edge = (0..4).any(|i| {
            is_on_segment(point, corners[i], corners[(i + 1) % 4], self.line_threshold)
        });
        on_edge.then_some(HitZone::OnLine)
    }

    fn hit_pencil(&self, pencil: &Pencil, point: Point) -> Option<HitZone> {
        pencil
            .segments()
            .any(|(a, b)| is_on_segment(point, a, b, self.pencil_threshold))
            .then_some(HitZone::OnLine)
    }
}

fn hit_text(text: &Text, point: Point) -> Option<HitZone> {
    text.lines
        .iter()
        .any(|line| {
            let rect = line.rect();
            point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
        })
        .then_some(HitZone::Inside)
}

/// Handle centres for an element, in hit priority order.
///
/// Pencil strokes and text blocks are not resizable and have none.
pub fn handle_positions(element: &Element) -> Vec<(Handle, Point)> {
    match element {
        Element::Linear(line) => vec![(Handle::Start, line.start), (Handle::End, line.end)],
        Element::Rectangle(_) | Element::Image(_) => {
            let bounds = element.bounds();
            Handle::CORNERS
                .into_iter()
                .map(|h| (h, h.corner_of(bounds)))
                .collect()
        }
        Element::Pencil(_) | Element::Text(_) => Vec::new(),
    }
}

/// Ids of every element fully enclosed by the band spanned by `a` and `b`,
/// in z-order.
pub fn elements_in_band(snapshot: &Snapshot, a: Point, b: Point) -> Vec<ElementId> {
    let band = Rect::from_points(a, b);
    snapshot
        .iter()
        .filter(|element| is_enclosed(element, band))
        .map(Element::id)
        .collect()
}

fn is_enclosed(element: &Element, band: Rect) -> bool {
    let inside = |p: Point| p.x >= band.x0 && p.x <= band.x1 && p.y >= band.y0 && p.y <= band.y1;
    match element {
        Element::Linear(line) => inside(line.start) && inside(line.end),
        Element::Rectangle(_) | Element::Image(_) => {
            let bounds = element.bounds();
            Handle::CORNERS.into_iter().all(|h| inside(h.corner_of(bounds)))
        }
        Element::Pencil(pencil) => {
            !pencil.points.is_empty() && pencil.points.iter().all(|p| inside(*p))
        }
        Element::Text(text) => {
            if text.lines.is_empty() {
                return false;
            }
            let bounds = text.bounds();
            inside(Point::new(bounds.x0, bounds.y0)) && inside(Point::new(bounds.x1, bounds.y1))
        }
    }
}
