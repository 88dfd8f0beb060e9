//! Read-only album preview.
//!
//! Each page's content string is parsed on its own and every element is
//! re-projected from the 700-unit reference width onto the preview width.
//! Navigation walks the pages one at a time and clamps at both ends.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use serde::Serialize;

use crate::consts::PREVIEW_WIDTH;
use crate::doc::{self, Element, ElementBody, ElementId, FontStyle, FontWeight, TextAlign};
use crate::geometry::{Format, Projection};

/// What a projected element paints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreviewContent {
    Photo {
        src: String,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        font_family: &'static str,
        /// Font size in preview pixels.
        font_size: f64,
        font_weight: FontWeight,
        font_style: FontStyle,
        color: String,
        text_align: TextAlign,
    },
}

/// An element projected onto the preview surface, in preview pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub z_index: i64,
    #[serde(flatten)]
    pub content: PreviewContent,
}

/// Project one element through `projection`. Width and height include the
/// element's scale.
#[must_use]
pub fn project_element(el: &Element, projection: &Projection) -> PreviewElement {
    let rect = projection.rect(el.visual_rect());
    let content = match &el.body {
        ElementBody::Photo(photo) => PreviewContent::Photo { src: photo.src.clone() },
        ElementBody::Text(body) => PreviewContent::Text {
            text: body.text.clone(),
            font_family: body.font_family.css_name(),
            font_size: projection.font_size(body.font_size),
            font_weight: body.font_weight,
            font_style: body.font_style,
            color: body.color.clone(),
            text_align: body.text_align,
        },
    };
    PreviewElement {
        id: el.id.clone(),
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        rotation: el.rotation,
        z_index: el.z_index,
        content,
    }
}

/// Parse `content` and project it for a preview `width` pixels wide, in paint
/// order. Unreadable content renders nothing.
#[must_use]
pub fn render_content(content: &str, format: &Format, width: f64) -> Vec<PreviewElement> {
    let projection = Projection::new(format, width);
    let mut elements = doc::load(content);
    elements.sort_by_key(|el| el.z_index);
    elements.iter().map(|el| project_element(el, &projection)).collect()
}

/// Paginated preview over an album's page contents.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    format: Format,
    pages: Vec<String>,
    index: usize,
    width: f64,
}

impl PreviewRenderer {
    /// A preview at the default width, starting on the first page.
    #[must_use]
    pub fn new(format: Format, pages: Vec<String>) -> Self {
        Self::with_width(format, pages, PREVIEW_WIDTH)
    }

    #[must_use]
    pub fn with_width(format: Format, pages: Vec<String>, width: f64) -> Self {
        Self { format, pages, index: 0, width }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Preview surface size in pixels.
    #[must_use]
    pub fn surface(&self) -> Projection {
        Projection::new(&self.format, self.width)
    }

    /// Jump to `index`, clamped to the last page.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.index = index.min(self.pages.len().saturating_sub(1));
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.index + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.go_to(self.index.saturating_sub(1))
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.pages.len()
    }

    /// Footer text such as "Page 2 of 6".
    #[must_use]
    pub fn progress_label(&self) -> String {
        if self.pages.is_empty() {
            return "No pages".to_owned();
        }
        format!("Page {} of {}", self.index + 1, self.pages.len())
    }

    /// Progress bar fill in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.pages.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = (self.index + 1) as f64 / self.pages.len() as f64;
        fraction
    }

    /// Projected elements of page `index`, or `None` past the end.
    #[must_use]
    pub fn render_page(&self, index: usize) -> Option<Vec<PreviewElement>> {
        let content = self.pages.get(index)?;
        Some(render_content(content, &self.format, self.width))
    }

    /// Projected elements of the current page.
    #[must_use]
    pub fn render_current(&self) -> Vec<PreviewElement> {
        self.render_page(self.index).unwrap_or_default()
    }
}
