//! Rendering: builds the editor's display list.
//!
//! The page surface is a DOM subtree scaled as a unit by the zoom transform,
//! so every box here is in reference units. This module receives read-only
//! views of the document, viewport and interaction state and produces a
//! [`RenderPlan`]. It mutates nothing. The browser bridge applies the plan to
//! the DOM; native callers can inspect it directly.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::doc::{Element, ElementBody, ElementId, ElementStore, FontStyle, FontWeight, TextAlign};
use crate::geometry::{Point, Size, rotate_about};
use crate::hit::ResizeAnchor;
use crate::input::{InteractionState, PanelPlacement, UiState};
use crate::viewport::Viewport;

/// What a box paints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemContent {
    Photo {
        src: String,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        font_family: &'static str,
        font_size: f64,
        font_weight: FontWeight,
        font_style: FontStyle,
        color: String,
        text_align: TextAlign,
    },
}

/// One positioned element box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    pub id: ElementId,
    /// Visual extent (scale applied), top-left anchored.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub z_index: i64,
    pub selected: bool,
    /// The host swaps this text box for an editable field.
    pub editing: bool,
    #[serde(flatten)]
    pub content: ItemContent,
}

impl RenderItem {
    /// Inline CSS for the element's absolutely positioned box.
    #[must_use]
    pub fn css(&self) -> String {
        let mut css = format!(
            "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
            self.x, self.y, self.width, self.height, self.z_index
        );
        if self.rotation != 0.0 {
            css.push_str(&format!("transform:rotate({}deg);", self.rotation));
        }
        if let ItemContent::Text { font_family, font_size, font_weight, font_style, color, text_align, .. } =
            &self.content
        {
            css.push_str(&format!(
                "font-family:'{font_family}';font-size:{font_size}px;font-weight:{};font-style:{};color:{color};text-align:{};",
                weight_css(*font_weight),
                style_css(*font_style),
                align_css(*text_align),
            ));
        }
        css
    }
}

fn weight_css(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

fn style_css(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
    }
}

fn align_css(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

/// A resize handle at its on-page position (rotation applied).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandlePos {
    pub anchor: ResizeAnchor,
    pub at: Point,
}

/// Selection chrome around the selected element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOverlay {
    pub id: ElementId,
    /// Empty while the element's text is being edited.
    pub handles: Vec<HandlePos>,
    pub panel: PanelPlacement,
}

/// Everything needed to draw the editor surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// On-screen size of the zoomed surface in pixels.
    pub surface: Size,
    /// CSS transform for the surface root.
    pub transform: String,
    /// Boxes in paint order, bottom first.
    pub items: Vec<RenderItem>,
    pub selection: Option<SelectionOverlay>,
}

fn item_content(el: &Element) -> ItemContent {
    match &el.body {
        ElementBody::Photo(photo) => ItemContent::Photo { src: photo.src.clone() },
        ElementBody::Text(body) => ItemContent::Text {
            text: body.text.clone(),
            font_family: body.font_family.css_name(),
            font_size: body.font_size,
            font_weight: body.font_weight,
            font_style: body.font_style,
            color: body.color.clone(),
            text_align: body.text_align,
        },
    }
}

/// Handle positions for `el`, rotated with the element about its centre.
#[must_use]
pub fn handle_positions(el: &Element) -> Vec<HandlePos> {
    let rect = el.visual_rect();
    let pivot = rect.center();
    ResizeAnchor::ALL
        .into_iter()
        .map(|anchor| HandlePos { anchor, at: rotate_about(anchor.position(&rect), pivot, el.rotation) })
        .collect()
}

/// Build the display list for the current frame.
#[must_use]
pub fn build_plan(doc: &ElementStore, viewport: &Viewport, state: &InteractionState, ui: &UiState) -> RenderPlan {
    let selected_id = state.element_id();
    let editing = state.is_editing();

    // Layer 1: elements in paint order.
    let items = doc
        .sorted_elements()
        .into_iter()
        .map(|el| {
            let rect = el.visual_rect();
            let selected = selected_id.is_some_and(|id| *id == el.id);
            RenderItem {
                id: el.id.clone(),
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                rotation: el.rotation,
                z_index: el.z_index,
                selected,
                editing: selected && editing,
                content: item_content(el),
            }
        })
        .collect();

    // Layer 2: selection chrome.
    let selection = selected_id.and_then(|id| doc.get(id)).map(|el| SelectionOverlay {
        id: el.id.clone(),
        handles: if editing { Vec::new() } else { handle_positions(el) },
        panel: ui.panel,
    });

    RenderPlan { surface: viewport.surface_size(), transform: viewport.css_transform(), items, selection }
}
