//! Document model: page elements, their wire format, and the in-memory store.
//!
//! This module defines what sits on a page (`Element`, `ElementBody`), a
//! sparse-update type for incremental edits (`PartialElement`), the content
//! string codec (`try_parse`, `load`, `serialize`), and the ordered store that
//! owns the active page's elements (`ElementStore`).
//!
//! Data flows into this layer from the persisted page content (JSON) and from
//! the interaction engine (mutations). The render plan, layer panel and
//! preview read from it via `sorted_elements` or `elements`.
//!
//! Older content may lack `fontFamily`, `fontStyle` or `textAlign`. Those are
//! filled with their defaults on load, so the next save writes them back.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_Z_INDEX;
use crate::geometry::Rect;

/// Opaque identifier of an element within a page.
pub type ElementId = String;

/// Failure to decode or encode a page content string.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid page content: {0}")]
    Json(#[from] serde_json::Error),
}

/// The kind of a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Photo,
    Text,
}

/// Font families offered by the text toolbar. The first is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Inter,
    PlayfairDisplay,
    Montserrat,
    Lora,
    DancingScript,
    CourierPrime,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        Self::Inter,
        Self::PlayfairDisplay,
        Self::Montserrat,
        Self::Lora,
        Self::DancingScript,
        Self::CourierPrime,
    ];

    /// The CSS family name, as stored in page content.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::PlayfairDisplay => "Playfair Display",
            Self::Montserrat => "Montserrat",
            Self::Lora => "Lora",
            Self::DancingScript => "Dancing Script",
            Self::CourierPrime => "Courier Prime",
        }
    }
}

impl From<String> for FontFamily {
    /// Unknown family names fall back to the default family.
    fn from(name: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|family| family.css_name() == name)
            .unwrap_or_default()
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.css_name().to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

fn default_scale() -> f64 {
    1.0
}

fn default_color() -> String {
    "#000000".to_owned()
}

/// A placed element as stored in page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier within the page.
    pub id: ElementId,
    /// Left edge in reference units.
    pub x: f64,
    /// Top edge in reference units.
    pub y: f64,
    /// Unscaled width in reference units.
    pub width: f64,
    /// Unscaled height in reference units.
    pub height: f64,
    /// Clockwise rotation in degrees around the element centre.
    #[serde(default)]
    pub rotation: f64,
    /// Multiplicative size factor applied on top of `width`/`height`.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Stacking order; higher values paint on top.
    pub z_index: i64,
    /// Kind-specific payload. Carries the `type` tag on the wire.
    #[serde(flatten)]
    pub body: ElementBody,
}

/// Kind-specific part of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementBody {
    Photo(PhotoBody),
    Text(TextBody),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoBody {
    /// Image URL or opaque upload handle.
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBody {
    pub text: String,
    #[serde(default)]
    pub font_family: FontFamily,
    /// Font size in pixels at the reference width.
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    /// Text color as a hex string.
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub text_align: TextAlign,
}

impl TextBody {
    /// A text body with default styling.
    #[must_use]
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_family: FontFamily::default(),
            font_size,
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            color: default_color(),
            text_align: TextAlign::default(),
        }
    }
}

impl Element {
    /// Create an element with a fresh id, unit scale and no rotation.
    #[must_use]
    pub fn new(body: ElementBody, rect: Rect, z_index: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: 0.0,
            scale: 1.0,
            z_index,
            body,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self.body {
            ElementBody::Photo(_) => ElementKind::Photo,
            ElementBody::Text(_) => ElementKind::Text,
        }
    }

    /// Unscaled geometry as stored.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// On-page extent after applying `scale`, anchored at the top-left corner.
    #[must_use]
    pub fn visual_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width * self.scale, self.height * self.scale)
    }

    /// The text body, if this is a text element.
    #[must_use]
    pub fn text(&self) -> Option<&TextBody> {
        match &self.body {
            ElementBody::Text(body) => Some(body),
            ElementBody::Photo(_) => None,
        }
    }
}

/// Sparse update for an element. Only present fields are applied; fields for
/// the other element kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl PartialElement {
    /// Geometry-only update, as produced by a drag.
    #[must_use]
    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    /// Merge the present fields into `el`.
    ///
    /// Non-finite numbers are ignored, as is a `scale` that is not positive.
    pub fn apply_to(&self, el: &mut Element) {
        if let Some(x) = finite(self.x) {
            el.x = x;
        }
        if let Some(y) = finite(self.y) {
            el.y = y;
        }
        if let Some(w) = finite(self.width) {
            el.width = w;
        }
        if let Some(h) = finite(self.height) {
            el.height = h;
        }
        if let Some(r) = finite(self.rotation) {
            el.rotation = r;
        }
        if let Some(s) = finite(self.scale).filter(|s| *s > 0.0) {
            el.scale = s;
        }
        if let Some(z) = self.z_index {
            el.z_index = z;
        }
        match &mut el.body {
            ElementBody::Photo(photo) => {
                if let Some(src) = &self.src {
                    photo.src.clone_from(src);
                }
            }
            ElementBody::Text(text) => {
                if let Some(value) = &self.text {
                    text.text.clone_from(value);
                }
                if let Some(family) = self.font_family {
                    text.font_family = family;
                }
                if let Some(size) = finite(self.font_size) {
                    text.font_size = size;
                }
                if let Some(weight) = self.font_weight {
                    text.font_weight = weight;
                }
                if let Some(style) = self.font_style {
                    text.font_style = style;
                }
                if let Some(color) = &self.color {
                    text.color.clone_from(color);
                }
                if let Some(align) = self.text_align {
                    text.text_align = align;
                }
            }
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

// =============================================================
// Content string codec
// =============================================================

/// Decode a content string, reporting why it failed.
///
/// An empty or whitespace-only string is an empty page, not an error.
///
/// # Errors
///
/// Returns [`ContentError::Json`] when the string is not a JSON array of elements.
pub fn try_parse(content: &str) -> Result<Vec<Element>, ContentError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(content)?)
}

/// Decode a content string, degrading to an empty list on any failure.
#[must_use]
pub fn load(content: &str) -> Vec<Element> {
    match try_parse(content) {
        Ok(elements) => elements,
        Err(e) => {
            log::warn!("discarding unreadable page content: {e}");
            Vec::new()
        }
    }
}

/// Encode an element list as a content string.
///
/// # Errors
///
/// Returns [`ContentError::Json`] if serialization fails.
pub fn serialize(elements: &[Element]) -> Result<String, ContentError> {
    Ok(serde_json::to_string(elements)?)
}

// =============================================================
// Store
// =============================================================

/// Ordered store of the active page's elements. Insertion order is kept and
/// breaks z-order ties.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Build a store from a content string. Unreadable content yields an empty store.
    #[must_use]
    pub fn load(content: &str) -> Self {
        Self { elements: load(content) }
    }

    /// Replace all elements with `elements`.
    pub fn replace(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// The z-order a newly created element receives.
    #[must_use]
    pub fn next_z_index(&self) -> i64 {
        self.elements
            .iter()
            .map(|el| el.z_index)
            .max()
            .map_or(MIN_Z_INDEX, |z| z.saturating_add(1).max(MIN_Z_INDEX))
    }

    /// Append an element and return its id.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Merge `partial` into the element with `id`. Returns false if absent.
    pub fn update(&mut self, id: &str, partial: &PartialElement) -> bool {
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        partial.apply_to(el);
        true
    }

    /// Remove the element with `id`, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let pos = self.elements.iter().position(|el| el.id == id)?;
        Some(self.elements.remove(pos))
    }

    /// Shift an element's z-order by `delta`, never below [`MIN_Z_INDEX`].
    /// Returns the new z-order, or `None` if the element is absent.
    pub fn reorder_z(&mut self, id: &str, delta: i64) -> Option<i64> {
        let el = self.get_mut(id)?;
        el.z_index = el.z_index.saturating_add(delta).max(MIN_Z_INDEX);
        Some(el.z_index)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements in paint order: ascending z, insertion order within ties.
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&Element> {
        let mut sorted: Vec<&Element> = self.elements.iter().collect();
        sorted.sort_by_key(|el| el.z_index);
        sorted
    }

    /// Full snapshot of the list, as handed to the save hook.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
