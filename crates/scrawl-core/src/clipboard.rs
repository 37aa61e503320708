//! Copy and paste of selected elements as JSON.

use crate::camera::Viewport;
use crate::elements::{Element, ElementId, TextMeasure};
use crate::error::{EditorError, EditorResult};
use crate::interaction::Editor;
use serde::{Deserialize, Serialize};

/// Clipboard payload, tagged so foreign JSON is rejected on paste.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ClipboardPayload {
    #[serde(rename = "scrawl/clipboard")]
    Elements { elements: Vec<Element> },
}

impl<V: Viewport, M: TextMeasure> Editor<V, M> {
    /// Serialize the selected elements in z-order. `None` without a selection.
    pub fn copy_selection(&self) -> EditorResult<Option<String>> {
        let selected = self.selected_ids();
        if selected.is_empty() {
            return Ok(None);
        }

        let elements = self
            .snapshot()
            .iter()
            .filter(|element| selected.contains(&element.id()))
            .cloned()
            .collect();
        let json = serde_json::to_string(&ClipboardPayload::Elements { elements })
            .map_err(EditorError::Clipboard)?;
        Ok(Some(json))
    }

    /// Paste a payload produced by [`Editor::copy_selection`] as one history
    /// entry, offset by the duplicate offset. Leaves nothing selected.
    pub fn paste(&mut self, json: &str) -> EditorResult<Vec<ElementId>> {
        let ClipboardPayload::Elements { elements } =
            serde_json::from_str(json).map_err(EditorError::Clipboard)?;

        if self.state().is_gesture() {
            log::debug!("ignoring paste during {:?}", self.state().kind());
            return Ok(Vec::new());
        }
        if elements.is_empty() {
            return Ok(Vec::new());
        }

        let offset = self.config().duplicate_offset;
        let ids = self.add_elements(
            elements
                .iter()
                .map(|element| element.translated(offset))
                .collect(),
        )?;
        if !self.selected_ids().is_empty() {
            self.reset()?;
        }
        log::debug!("pasted {} elements", ids.len());
        Ok(ids)
    }
}
