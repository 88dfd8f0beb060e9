//! Input model: mouse buttons, modifier keys, and the interaction state machine.
//!
//! `InteractionState` is the editor's single source of truth for what the
//! pointer is doing. Each active variant carries the gesture context needed to
//! compute geometry from the pointer position without accumulating drift:
//! drags always recompute from the original rectangle and the pointer
//! position where the gesture started.
//!
//! The pure gesture math (`move_rect`, `resize_rect`, `panel_placement`) lives
//! here so it can be tested without an engine.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_ELEMENT_SIZE, PANEL_FLIP_MARGIN};
use crate::doc::ElementId;
use crate::geometry::{Point, Rect};
use crate::hit::ResizeAnchor;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key deletes the current selection.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// What a drag gesture is doing to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "handle")]
pub enum DragMode {
    Move,
    Resize(ResizeAnchor),
}

/// Where the floating control panel sits relative to the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPlacement {
    Above,
    #[default]
    Below,
}

/// The interaction state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// An element is selected and no gesture is active.
    Selected { id: ElementId },
    /// The pointer is held down on an element and moving or resizing it.
    Dragging {
        id: ElementId,
        mode: DragMode,
        /// Surface-pixel pointer position at pointer-down.
        start_screen: Point,
        /// Element geometry at pointer-down.
        orig: Rect,
        /// Element scale at pointer-down; resize deltas are divided by it.
        scale: f64,
    },
    /// A text element's body is an editable field.
    EditingText { id: ElementId },
}

impl InteractionState {
    /// The element this state refers to, if any.
    #[must_use]
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Idle => None,
            Self::Selected { id } | Self::Dragging { id, .. } | Self::EditingText { id } => Some(id),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditingText { .. })
    }
}

/// Persistent UI state visible to the host chrome.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    /// Placement of the floating control panel, refreshed when a drag begins.
    pub panel: PanelPlacement,
}

/// Translate `orig` by a reference-space delta.
#[must_use]
pub fn move_rect(orig: Rect, delta: Point) -> Rect {
    Rect::new(orig.x + delta.x, orig.y + delta.y, orig.width, orig.height)
}

/// Resize `orig` by dragging `anchor` through a reference-space `delta`.
///
/// Edges not named by the anchor stay fixed. Width and height never drop
/// below [`MIN_ELEMENT_SIZE`]; when a left or top edge hits the floor the
/// opposite edge stays anchored. `scale` is the element's scale factor: the
/// stored size changes by `delta / scale` so the dragged edge tracks the
/// pointer on screen. A scale that is not a positive finite number counts
/// as 1.
#[must_use]
pub fn resize_rect(orig: Rect, anchor: ResizeAnchor, delta: Point, scale: f64) -> Rect {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let dw = delta.x / scale;
    let dh = delta.y / scale;
    let mut out = orig;

    if anchor.moves_right() {
        out.width = (orig.width + dw).max(MIN_ELEMENT_SIZE);
    } else if anchor.moves_left() {
        out.width = (orig.width - dw).max(MIN_ELEMENT_SIZE);
        out.x = orig.x + (orig.width - out.width) * scale;
    }

    if anchor.moves_bottom() {
        out.height = (orig.height + dh).max(MIN_ELEMENT_SIZE);
    } else if anchor.moves_top() {
        out.height = (orig.height - dh).max(MIN_ELEMENT_SIZE);
        out.y = orig.y + (orig.height - out.height) * scale;
    }

    out
}

/// Pick the control panel placement for an element whose visual bottom edge
/// is at `bottom` on a page `content_height` units tall.
#[must_use]
pub fn panel_placement(bottom: f64, content_height: f64) -> PanelPlacement {
    if bottom > content_height - PANEL_FLIP_MARGIN {
        PanelPlacement::Above
    } else {
        PanelPlacement::Below
    }
}
