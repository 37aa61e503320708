//! Multi-line text element and the text measurement seam.

use super::ElementId;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Measures a single line of text.
///
/// Layout lives with the renderer; the core only needs line extents to move
/// text and to hit test it.
pub trait TextMeasure {
    fn measure(&self, content: &str) -> Size;
}

impl<F: Fn(&str) -> Size> TextMeasure for F {
    fn measure(&self, content: &str) -> Size {
        self(content)
    }
}

/// Fixed advance per character and fixed line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            char_width: 10.0,
            line_height: 24.0,
        }
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, content: &str) -> Size {
        Size::new(
            content.chars().count() as f64 * self.char_width,
            self.line_height,
        )
    }
}

/// One laid-out line of a text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Top-left corner of the line box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub content: String,
}

impl TextLine {
    /// Create a measured line.
    pub fn new(position: Point, width: f64, height: f64, content: impl Into<String>) -> Self {
        Self {
            position,
            width,
            height,
            content: content.into(),
        }
    }

    /// The line box.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

/// A block of text lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Whether the text is currently being typed into.
    #[serde(default)]
    pub is_writing: bool,
    pub lines: Vec<TextLine>,
}

impl Text {
    /// Create a text block from already laid out lines.
    pub fn new(id: ElementId, lines: Vec<TextLine>) -> Self {
        Self {
            id,
            is_writing: false,
            lines,
        }
    }

    /// Lay out `content` (split on newlines) starting at `origin`.
    pub fn from_content(
        id: ElementId,
        origin: Point,
        content: &str,
        measure: &impl TextMeasure,
    ) -> Self {
        let lines = content
            .split('\n')
            .map(|line| TextLine::new(Point::ZERO, 0.0, 0.0, line))
            .collect();
        Self::new(id, lines).layout_at(origin, measure)
    }

    /// Get the element id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Top-left of the first line, or the zero point for empty text.
    pub fn origin(&self) -> Point {
        self.lines.first().map(|l| l.position).unwrap_or(Point::ZERO)
    }

    /// Union of all line boxes.
    pub fn bounds(&self) -> Rect {
        let mut lines = self.lines.iter().map(TextLine::rect);
        match lines.next() {
            Some(first) => lines.fold(first, |acc, r| acc.union(r)),
            None => Rect::ZERO,
        }
    }

    /// Re-measure every line and stack them vertically from `origin`.
    pub fn layout_at(&self, origin: Point, measure: &impl TextMeasure) -> Self {
        let mut y = origin.y;
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let size = measure.measure(&line.content);
                let laid_out =
                    TextLine::new(Point::new(origin.x, y), size.width, size.height, &*line.content);
                y += size.height;
                laid_out
            })
            .collect();
        Self {
            id: self.id,
            is_writing: self.is_writing,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_stacks_lines() {
        let text = Text::from_content(
            ElementId(1),
            Point::new(10.0, 10.0),
            "hello\nhi",
            &FixedMetrics::default(),
        );
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[0].position, Point::new(10.0, 10.0));
        assert_eq!(text.lines[1].position, Point::new(10.0, 34.0));
        assert!((text.lines[0].width - 50.0).abs() < f64::EPSILON);
        assert!((text.lines[1].width - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_is_union_of_lines() {
        let text = Text::from_content(ElementId(1), Point::ZERO, "abc\nabcdef", &FixedMetrics::default());
        let bounds = text.bounds();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 60.0, 48.0));
    }

    #[test]
    fn test_closure_measure() {
        let measure = |s: &str| Size::new(s.len() as f64, 5.0);
        let text = Text::from_content(ElementId(1), Point::ZERO, "ab\ncd", &measure);
        assert_eq!(text.bounds(), Rect::new(0.0, 0.0, 2.0, 10.0));
    }

    #[test]
    fn test_empty_text() {
        let text = Text::new(ElementId(1), Vec::new());
        assert_eq!(text.bounds(), Rect::ZERO);
        assert_eq!(text.origin(), Point::ZERO);
    }
}
