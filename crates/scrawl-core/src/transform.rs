//! Move and resize operators.
//!
//! Every operator computes the new geometry from data captured when the
//! gesture started plus the current pointer position. Nothing accumulates
//! per-frame deltas, so a drag of any length lands exactly where a single
//! jump by the total delta would.

use crate::elements::{Element, ElementId, ElementKind, Image, Linear, Rectangle, TextMeasure};
use crate::error::{EditorError, EditorResult};
use crate::hit::Handle;
use kurbo::{Point, Rect, Size, Vec2};

/// Pointer-to-element offsets captured when a move gesture starts.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveAnchor {
    /// Offset from the start point; `extent` is `end - start`.
    Linear {
        id: ElementId,
        offset: Vec2,
        extent: Vec2,
    },
    /// Offset from the top-left corner; `extent` is the signed size.
    Rectangle {
        id: ElementId,
        offset: Vec2,
        extent: Vec2,
    },
    Image {
        id: ElementId,
        offset: Vec2,
        extent: Vec2,
    },
    /// One offset per stroke point.
    Pencil { id: ElementId, offsets: Vec<Vec2> },
    /// Offset from the origin of the first line.
    Text { id: ElementId, offset: Vec2 },
}

impl MoveAnchor {
    /// Id of the anchored element.
    pub fn id(&self) -> ElementId {
        match self {
            MoveAnchor::Linear { id, .. }
            | MoveAnchor::Rectangle { id, .. }
            | MoveAnchor::Image { id, .. }
            | MoveAnchor::Pencil { id, .. }
            | MoveAnchor::Text { id, .. } => *id,
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            MoveAnchor::Linear { .. } => "linear",
            MoveAnchor::Rectangle { .. } => "rectangle",
            MoveAnchor::Image { .. } => "image",
            MoveAnchor::Pencil { .. } => "pencil",
            MoveAnchor::Text { .. } => "text",
        }
    }
}

/// Capture the anchor for moving `element` with the pointer at `pointer`.
pub fn capture_move(element: &Element, pointer: Point) -> MoveAnchor {
    match element {
        Element::Linear(line) => MoveAnchor::Linear {
            id: line.id(),
            offset: pointer - line.start,
            extent: line.end - line.start,
        },
        Element::Rectangle(rect) => MoveAnchor::Rectangle {
            id: rect.id(),
            offset: pointer - rect.p1,
            extent: rect.p2 - rect.p1,
        },
        Element::Image(image) => MoveAnchor::Image {
            id: image.id(),
            offset: pointer - image.p1,
            extent: image.p2 - image.p1,
        },
        Element::Pencil(pencil) => MoveAnchor::Pencil {
            id: pencil.id(),
            offsets: pencil.points.iter().map(|p| pointer - *p).collect(),
        },
        Element::Text(text) => MoveAnchor::Text {
            id: text.id(),
            offset: pointer - text.origin(),
        },
    }
}

/// Compute the moved version of `live` for the pointer at `pointer`.
///
/// `live` must be the element the anchor was captured from; a different id
/// or kind is a contract violation.
pub fn apply_move(
    anchor: &MoveAnchor,
    live: &Element,
    pointer: Point,
    measure: &impl TextMeasure,
) -> EditorResult<Element> {
    let mismatch = || EditorError::KindMismatch {
        id: live.id(),
        expected: anchor.expected(),
        found: live.kind(),
    };
    if anchor.id() != live.id() {
        return Err(mismatch());
    }

    let moved = match (anchor, live) {
        (MoveAnchor::Linear { offset, extent, .. }, Element::Linear(line)) => {
            let start = pointer - *offset;
            Element::Linear(Linear {
                start,
                end: start + *extent,
                ..line.clone()
            })
        }
        (MoveAnchor::Rectangle { offset, extent, .. }, Element::Rectangle(rect)) => {
            let p1 = pointer - *offset;
            Element::Rectangle(Rectangle::new(rect.id(), p1, p1 + *extent))
        }
        (MoveAnchor::Image { offset, extent, .. }, Element::Image(image)) => {
            let p1 = pointer - *offset;
            Element::Image(Image {
                p1,
                p2: p1 + *extent,
                ..image.clone()
            })
        }
        (MoveAnchor::Pencil { offsets, .. }, Element::Pencil(pencil)) => {
            if offsets.len() != pencil.points.len() {
                return Err(mismatch());
            }
            let mut moved = pencil.clone();
            moved.points = offsets.iter().map(|offset| pointer - *offset).collect();
            Element::Pencil(moved)
        }
        (MoveAnchor::Text { offset, .. }, Element::Text(text)) => {
            Element::Text(text.layout_at(pointer - *offset, measure))
        }
        _ => return Err(mismatch()),
    };
    Ok(moved)
}

/// Data captured when a resize gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeAnchor {
    pub id: ElementId,
    pub kind: ElementKind,
    /// The handle being dragged.
    pub handle: Handle,
    /// The point that stays put: the other endpoint or the opposite corner.
    pub fixed: Point,
    /// Width over height at gesture start (images only).
    pub aspect: f64,
}

/// Whether `handle` can resize `element`.
pub fn is_resizable(element: &Element, handle: Handle) -> bool {
    match element {
        Element::Linear(_) => !handle.is_corner(),
        Element::Rectangle(_) | Element::Image(_) => handle.is_corner(),
        Element::Pencil(_) | Element::Text(_) => false,
    }
}

/// Capture the anchor for resizing `element` by `handle`.
pub fn capture_resize(element: &Element, handle: Handle) -> EditorResult<ResizeAnchor> {
    if !is_resizable(element, handle) {
        return Err(EditorError::KindMismatch {
            id: element.id(),
            expected: if handle.is_corner() {
                "rectangle or image"
            } else {
                "linear"
            },
            found: element.kind(),
        });
    }

    let (fixed, aspect) = match element {
        Element::Linear(line) => {
            let fixed = if handle == Handle::Start { line.end } else { line.start };
            (fixed, 1.0)
        }
        Element::Image(image) => (handle.opposite().corner_of(image.bounds()), image.aspect_ratio()),
        _ => (handle.opposite().corner_of(element.bounds()), 1.0),
    };

    Ok(ResizeAnchor {
        id: element.id(),
        kind: element.kind(),
        handle,
        fixed,
        aspect,
    })
}

/// Compute the resized version of `live` for the pointer at `pointer`.
///
/// Rectangles may come out flipped; run [`canonicalize`] when the gesture
/// ends. Images keep their aspect ratio and never shrink below
/// `min_image_size` on either side.
pub fn apply_resize(
    anchor: &ResizeAnchor,
    live: &Element,
    pointer: Point,
    min_image_size: f64,
) -> EditorResult<Element> {
    if anchor.id != live.id() || anchor.kind != live.kind() {
        return Err(EditorError::KindMismatch {
            id: live.id(),
            expected: kind_name(anchor.kind),
            found: live.kind(),
        });
    }

    let resized = match live {
        Element::Linear(line) => {
            let (start, end) = match anchor.handle {
                Handle::Start => (pointer, anchor.fixed),
                _ => (anchor.fixed, pointer),
            };
            Element::Linear(Linear {
                start,
                end,
                ..line.clone()
            })
        }
        Element::Rectangle(rect) => {
            let (p1, p2) = corners_for_drag(anchor.handle, anchor.fixed, pointer);
            Element::Rectangle(Rectangle::new(rect.id(), p1, p2))
        }
        Element::Image(image) => {
            let bounds = aspect_locked_rect(
                anchor.handle,
                anchor.fixed,
                pointer,
                anchor.aspect,
                min_image_size,
            );
            Element::Image(Image {
                p1: Point::new(bounds.x0, bounds.y0),
                p2: Point::new(bounds.x1, bounds.y1),
                ..image.clone()
            })
        }
        Element::Pencil(_) | Element::Text(_) => {
            return Err(EditorError::KindMismatch {
                id: live.id(),
                expected: "rectangle or image",
                found: live.kind(),
            });
        }
    };
    Ok(resized)
}

/// Normalize coordinates once a gesture ends.
///
/// Only rectangles can be left flipped by a resize; every other kind is
/// returned unchanged.
pub fn canonicalize(element: &Element) -> Element {
    match element {
        Element::Rectangle(rect) => Element::Rectangle(rect.canonical()),
        other => other.clone(),
    }
}

fn kind_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Linear => "linear",
        ElementKind::Rectangle => "rectangle",
        ElementKind::Pencil => "pencil",
        ElementKind::Text => "text",
        ElementKind::Image => "image",
    }
}

/// Place the dragged corner at `pointer` and keep `fixed`, writing the result
/// into the top-left/bottom-right slots the handle belongs to. The slots are
/// not reordered, so dragging past `fixed` yields a flipped rectangle.
fn corners_for_drag(handle: Handle, fixed: Point, pointer: Point) -> (Point, Point) {
    match handle {
        Handle::TopLeft | Handle::Start => (pointer, fixed),
        Handle::TopRight => (Point::new(fixed.x, pointer.y), Point::new(pointer.x, fixed.y)),
        Handle::BottomRight | Handle::End => (fixed, pointer),
        Handle::BottomLeft => (Point::new(pointer.x, fixed.y), Point::new(fixed.x, pointer.y)),
    }
}

/// Unit direction from the fixed corner towards the dragged one.
fn growth_direction(handle: Handle) -> (f64, f64) {
    match handle {
        Handle::TopLeft | Handle::Start => (-1.0, -1.0),
        Handle::TopRight => (1.0, -1.0),
        Handle::BottomRight | Handle::End => (1.0, 1.0),
        Handle::BottomLeft => (-1.0, 1.0),
    }
}

/// Aspect-locked resize.
///
/// Two candidates are built, one sized by the horizontal reach of the pointer
/// from the fixed corner and one by the vertical reach. The larger one is
/// taken as the intended size, then clamped to `min_size` on both sides.
fn aspect_locked_rect(
    handle: Handle,
    fixed: Point,
    pointer: Point,
    aspect: f64,
    min_size: f64,
) -> Rect {
    let (sx, sy) = growth_direction(handle);
    let reach_x = (sx * (pointer.x - fixed.x)).max(0.0);
    let reach_y = (sy * (pointer.y - fixed.y)).max(0.0);

    let by_width = Size::new(reach_x, reach_x / aspect);
    let by_height = Size::new(reach_y * aspect, reach_y);
    let mut size = if by_width.area() >= by_height.area() {
        by_width
    } else {
        by_height
    };

    if size.width < min_size {
        size = Size::new(min_size, min_size / aspect);
    }
    if size.height < min_size {
        size = Size::new(min_size * aspect, min_size);
    }

    let dragged = Point::new(fixed.x + sx * size.width, fixed.y + sy * size.height);
    Rect::from_points(fixed, dragged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{BitmapRef, FixedMetrics, Pencil, Text};

    fn rect(a: (f64, f64), b: (f64, f64)) -> Element {
        Element::Rectangle(Rectangle::new(
            ElementId(1),
            Point::new(a.0, a.1),
            Point::new(b.0, b.1),
        ))
    }

    fn image(a: (f64, f64), b: (f64, f64)) -> Element {
        Element::Image(Image::new(
            ElementId(2),
            Point::new(a.0, a.1),
            Point::new(b.0, b.1),
            BitmapRef("photo".into()),
        ))
    }

    fn assert_bounds(element: &Element, expected: Rect) {
        let bounds = element.bounds();
        assert!((bounds.x0 - expected.x0).abs() < 1e-9, "{bounds:?} != {expected:?}");
        assert!((bounds.y0 - expected.y0).abs() < 1e-9, "{bounds:?} != {expected:?}");
        assert!((bounds.x1 - expected.x1).abs() < 1e-9, "{bounds:?} != {expected:?}");
        assert!((bounds.y1 - expected.y1).abs() < 1e-9, "{bounds:?} != {expected:?}");
    }

    #[test]
    fn test_move_rectangle_keeps_size() {
        let element = rect((100.0, 100.0), (200.0, 300.0));
        let anchor = capture_move(&element, Point::new(150.0, 100.0));
        let moved = apply_move(&anchor, &element, Point::new(160.0, 130.0), &FixedMetrics::default())
            .unwrap();
        assert_bounds(&moved, Rect::new(110.0, 130.0, 210.0, 330.0));
    }

    #[test]
    fn test_move_has_no_drift() {
        let metrics = FixedMetrics::default();
        let original = Element::Linear(Linear::arrow(
            ElementId(3),
            Point::new(10.0, 10.0),
            Point::new(40.0, 70.0),
        ));
        let grab = Point::new(25.0, 40.0);
        let anchor = capture_move(&original, grab);

        let mut live = original.clone();
        for step in 1..=500 {
            let pointer = grab + Vec2::new(step as f64 * 0.37, step as f64 * -0.11);
            live = apply_move(&anchor, &live, pointer, &metrics).unwrap();
        }
        let direct = apply_move(
            &anchor,
            &original,
            grab + Vec2::new(500.0 * 0.37, 500.0 * -0.11),
            &metrics,
        )
        .unwrap();
        assert_eq!(live, direct);
    }

    #[test]
    fn test_move_pencil_shifts_every_point() {
        let element = Element::Pencil(Pencil::new(
            ElementId(4),
            vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(20.0, 0.0)],
        ));
        let anchor = capture_move(&element, Point::new(10.0, 5.0));
        let moved = apply_move(&anchor, &element, Point::new(15.0, 25.0), &FixedMetrics::default())
            .unwrap();
        let Element::Pencil(pencil) = moved else {
            panic!("Expected Pencil element");
        };
        assert_eq!(
            pencil.points,
            vec![Point::new(5.0, 20.0), Point::new(15.0, 25.0), Point::new(25.0, 20.0)]
        );
    }

    #[test]
    fn test_move_text_relayouts() {
        let metrics = FixedMetrics::default();
        let element = Element::Text(Text::from_content(
            ElementId(5),
            Point::new(0.0, 0.0),
            "one\ntwo",
            &metrics,
        ));
        let anchor = capture_move(&element, Point::new(5.0, 5.0));
        let moved = apply_move(&anchor, &element, Point::new(105.0, 55.0), &metrics).unwrap();
        let Element::Text(text) = moved else {
            panic!("Expected Text element");
        };
        assert_eq!(text.lines[0].position, Point::new(100.0, 50.0));
        assert_eq!(text.lines[1].position, Point::new(100.0, 74.0));
    }

    #[test]
    fn test_move_kind_mismatch() {
        let element = rect((0.0, 0.0), (10.0, 10.0));
        let anchor = capture_move(&element, Point::ZERO);
        let impostor = Element::Pencil(Pencil::new(ElementId(1), vec![Point::ZERO]));
        let result = apply_move(&anchor, &impostor, Point::ZERO, &FixedMetrics::default());
        assert!(matches!(
            result,
            Err(EditorError::KindMismatch {
                found: ElementKind::Pencil,
                ..
            })
        ));
    }

    #[test]
    fn test_resize_line_endpoint() {
        let element = Element::Linear(Linear::line(
            ElementId(1),
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        ));
        let anchor = capture_resize(&element, Handle::End).unwrap();
        let resized = apply_resize(&anchor, &element, Point::new(110.0, 120.0), 24.0).unwrap();
        let Element::Linear(line) = resized else {
            panic!("Expected Linear element");
        };
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(110.0, 120.0));
    }

    #[test]
    fn test_resize_rectangle_top_left() {
        let element = rect((100.0, 100.0), (200.0, 300.0));
        let anchor = capture_resize(&element, Handle::TopLeft).unwrap();
        let resized = apply_resize(&anchor, &element, Point::new(50.0, 50.0), 24.0).unwrap();
        let Element::Rectangle(r) = resized else {
            panic!("Expected Rectangle element");
        };
        assert_eq!(r.p1, Point::new(50.0, 50.0));
        assert_eq!(r.p2, Point::new(200.0, 300.0));
    }

    #[test]
    fn test_resize_rectangle_top_right() {
        let element = rect((100.0, 100.0), (200.0, 300.0));
        let anchor = capture_resize(&element, Handle::TopRight).unwrap();
        let resized = apply_resize(&anchor, &element, Point::new(250.0, 80.0), 24.0).unwrap();
        assert_bounds(&resized, Rect::new(100.0, 80.0, 250.0, 300.0));
    }

    #[test]
    fn test_resize_rectangle_flips_then_canonicalizes() {
        let element = rect((100.0, 100.0), (200.0, 300.0));
        let anchor = capture_resize(&element, Handle::BottomRight).unwrap();
        let resized = apply_resize(&anchor, &element, Point::new(50.0, 40.0), 24.0).unwrap();
        let Element::Rectangle(flipped) = &resized else {
            panic!("Expected Rectangle element");
        };
        assert!(flipped.is_flipped());

        let Element::Rectangle(canonical) = canonicalize(&resized) else {
            panic!("Expected Rectangle element");
        };
        assert!(canonical.p1.x < canonical.p2.x);
        assert!(canonical.p1.y < canonical.p2.y);
        assert_eq!(canonical.p1, Point::new(50.0, 40.0));
        assert_eq!(canonical.p2, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_resize_image_picks_larger_candidate() {
        // 2:1 image
        let element = image((0.0, 0.0), (200.0, 100.0));
        let anchor = capture_resize(&element, Handle::BottomRight).unwrap();
        assert!((anchor.aspect - 2.0).abs() < f64::EPSILON);

        // Horizontal reach wins: 300 wide -> 150 tall
        let resized = apply_resize(&anchor, &element, Point::new(300.0, 120.0), 24.0).unwrap();
        assert_bounds(&resized, Rect::new(0.0, 0.0, 300.0, 150.0));

        // Vertical reach wins: 200 tall -> 400 wide
        let resized = apply_resize(&anchor, &element, Point::new(210.0, 200.0), 24.0).unwrap();
        assert_bounds(&resized, Rect::new(0.0, 0.0, 400.0, 200.0));
    }

    #[test]
    fn test_resize_image_from_top_left() {
        let element = image((0.0, 0.0), (200.0, 100.0));
        let anchor = capture_resize(&element, Handle::TopLeft).unwrap();
        let resized = apply_resize(&anchor, &element, Point::new(-10.0, 90.0), 24.0).unwrap();
        assert_bounds(&resized, Rect::new(-10.0, -5.0, 200.0, 100.0));
    }

    #[test]
    fn test_resize_image_clamps_to_minimum() {
        let element = image((0.0, 0.0), (200.0, 100.0));
        let anchor = capture_resize(&element, Handle::BottomRight).unwrap();

        let tiny = apply_resize(&anchor, &element, Point::new(5.0, 5.0), 24.0).unwrap();
        assert_bounds(&tiny, Rect::new(0.0, 0.0, 48.0, 24.0));

        // Dragging past the fixed corner never flips an image
        let crossed = apply_resize(&anchor, &element, Point::new(-50.0, -50.0), 24.0).unwrap();
        assert_bounds(&crossed, Rect::new(0.0, 0.0, 48.0, 24.0));
    }

    #[test]
    fn test_resize_rejects_wrong_handle_or_kind() {
        let element = rect((0.0, 0.0), (10.0, 10.0));
        assert!(capture_resize(&element, Handle::Start).is_err());

        let pencil = Element::Pencil(Pencil::new(ElementId(1), vec![Point::ZERO]));
        assert!(matches!(
            capture_resize(&pencil, Handle::TopLeft),
            Err(EditorError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_canonicalize_leaves_other_kinds() {
        let element = image((0.0, 0.0), (10.0, 10.0));
        assert_eq!(canonicalize(&element), element);
    }
}
