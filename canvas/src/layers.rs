//! Layer panel projection: a read-only, top-first listing of the page's
//! elements for reordering and deleting without the pointer.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use serde::Serialize;

use crate::consts::LAYER_LABEL_CHARS;
use crate::doc::{Element, ElementBody, ElementId, ElementKind, ElementStore};

/// One row of the layer panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerEntry {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Text snippet, or "Photo".
    pub label: String,
    pub z_index: i64,
}

impl LayerEntry {
    /// Caption showing the stacking value, e.g. "Layer 3".
    #[must_use]
    pub fn layer_caption(&self) -> String {
        format!("Layer {}", self.z_index)
    }
}

/// Row buttons. Each maps onto an element store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerCommand {
    Raise(ElementId),
    Lower(ElementId),
    Delete(ElementId),
}

fn label_for(el: &Element) -> String {
    match &el.body {
        ElementBody::Photo(_) => "Photo".to_owned(),
        ElementBody::Text(body) => {
            let text = body.text.trim();
            if text.is_empty() {
                return "(empty text)".to_owned();
            }
            if text.chars().count() <= LAYER_LABEL_CHARS {
                return text.to_owned();
            }
            let mut snippet: String = text.chars().take(LAYER_LABEL_CHARS).collect();
            snippet.push('…');
            snippet
        }
    }
}

/// Rows for every element, highest z first. Equal z keeps insertion order.
#[must_use]
pub fn layer_entries(doc: &ElementStore) -> Vec<LayerEntry> {
    let mut entries: Vec<LayerEntry> = doc
        .elements()
        .iter()
        .map(|el| LayerEntry { id: el.id.clone(), kind: el.kind(), label: label_for(el), z_index: el.z_index })
        .collect();
    entries.sort_by(|a, b| b.z_index.cmp(&a.z_index));
    entries
}
