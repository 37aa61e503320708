//! Tunable constants for hit testing, transforms and history.

use crate::error::{EditorError, EditorResult};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Half-size of the square hit area around a handle, in scene units.
pub const HANDLE_THRESHOLD: f64 = 8.0;
/// Tolerance for hitting straight lines and rectangle edges.
pub const LINE_THRESHOLD: f64 = 1.0;
/// Tolerance for freehand strokes, wider to absorb point discretization.
pub const PENCIL_THRESHOLD: f64 = 6.0;
/// Smallest width/height an image can be resized to.
pub const MIN_IMAGE_SIZE: f64 = 24.0;
/// Maximum number of history entries kept.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Editor configuration.
///
/// Missing fields fall back to their defaults when deserializing, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Handle hit threshold.
    pub handle_threshold: f64,
    /// Line/edge hit threshold.
    pub line_threshold: f64,
    /// Freehand stroke hit threshold.
    pub pencil_threshold: f64,
    /// Minimum image side length during aspect-locked resize.
    pub min_image_size: f64,
    /// Offset applied to duplicated and pasted elements.
    pub duplicate_offset: Vec2,
    /// Padding between an element's bounds and its dashed selection outline.
    pub outline_padding: f64,
    /// History cap; the oldest entries are dropped beyond it.
    pub max_history_entries: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_threshold: HANDLE_THRESHOLD,
            line_threshold: LINE_THRESHOLD,
            pencil_threshold: PENCIL_THRESHOLD,
            min_image_size: MIN_IMAGE_SIZE,
            duplicate_offset: Vec2::new(0.0, 50.0),
            outline_padding: 4.0,
            max_history_entries: MAX_HISTORY_ENTRIES,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(EditorError::Config)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string_pretty(self).map_err(EditorError::Config)
    }
}
