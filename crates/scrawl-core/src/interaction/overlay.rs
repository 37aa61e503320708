//! Renderer-facing outputs: selection outlines and cursor hints.

use crate::elements::{Element, ElementId};
use crate::hit::{Handle, HitZone, handle_positions};
use kurbo::{Point, Rect};

/// A dashed selection outline around one selected element.
#[derive(Debug, Clone, PartialEq)]
pub struct DashedOutline {
    pub id: ElementId,
    /// Element bounds grown by the configured padding.
    pub rect: Rect,
    /// Handle markers, present only for a single resizable selection.
    pub handles: Vec<(Handle, Point)>,
}

impl DashedOutline {
    pub(crate) fn around(element: &Element, padding: f64, with_handles: bool) -> Self {
        Self {
            id: element.id(),
            rect: element.bounds().inflate(padding, padding),
            handles: if with_handles {
                handle_positions(element)
            } else {
                Vec::new()
            },
        }
    }
}

/// Cursor style suggested to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    /// Over a line endpoint.
    Crosshair,
    /// Top-left/bottom-right diagonal.
    ResizeNwse,
    /// Top-right/bottom-left diagonal.
    ResizeNesw,
}

impl CursorHint {
    /// Cursor for a hovered zone. `resizable` is false when the hovered element
    /// is not the single selection, in which case a handle only moves it.
    pub fn for_zone(zone: Option<HitZone>, resizable: bool) -> Self {
        match zone {
            None => CursorHint::Default,
            Some(HitZone::Handle(handle)) if resizable => match handle {
                Handle::Start | Handle::End => CursorHint::Crosshair,
                Handle::TopLeft | Handle::BottomRight => CursorHint::ResizeNwse,
                Handle::TopRight | Handle::BottomLeft => CursorHint::ResizeNesw,
            },
            Some(_) => CursorHint::Move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Rectangle;

    #[test]
    fn test_cursor_for_zone() {
        assert_eq!(CursorHint::for_zone(None, true), CursorHint::Default);
        assert_eq!(
            CursorHint::for_zone(Some(HitZone::Handle(Handle::TopRight)), true),
            CursorHint::ResizeNesw
        );
        assert_eq!(
            CursorHint::for_zone(Some(HitZone::Handle(Handle::BottomRight)), true),
            CursorHint::ResizeNwse
        );
        assert_eq!(
            CursorHint::for_zone(Some(HitZone::Handle(Handle::TopRight)), false),
            CursorHint::Move
        );
        assert_eq!(CursorHint::for_zone(Some(HitZone::OnLine), true), CursorHint::Move);
    }

    #[test]
    fn test_outline_padding() {
        let element = Element::Rectangle(Rectangle::new(
            ElementId(1),
            Point::new(10.0, 10.0),
            Point::new(20.0, 30.0),
        ));
        let outline = DashedOutline::around(&element, 4.0, true);
        assert_eq!(outline.rect, Rect::new(6.0, 6.0, 24.0, 34.0));
        assert_eq!(outline.handles.len(), 4);
        assert!(DashedOutline::around(&element, 0.0, false).handles.is_empty());
    }
}
