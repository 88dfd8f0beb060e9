//! Album and page records, the print format catalog, and the page overview
//! strip.
//!
//! These mirror the collaborator contract the editor consumes: an album with
//! a format and an ordered list of pages, each holding a content string. The
//! first page is the front cover and the last is the back cover. Covers are
//! never removed and an album never drops below [`MIN_ALBUM_PAGES`].

#[cfg(test)]
#[path = "pages_test.rs"]
mod pages_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_ALBUM_PAGES;
use crate::geometry::Format;

/// Why a page cannot be removed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageRemovalError {
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("page {0} is a cover and cannot be removed")]
    Cover(String),
    #[error("an album needs at least {MIN_ALBUM_PAGES} pages")]
    TooFewPages,
}

/// A named print format from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRecord {
    pub name: String,
    pub slug: String,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl FormatRecord {
    fn new(name: &str, slug: &str, width_cm: f64, height_cm: f64) -> Self {
        Self { name: name.to_owned(), slug: slug.to_owned(), width_cm, height_cm }
    }

    #[must_use]
    pub fn format(&self) -> Format {
        Format::new(self.width_cm, self.height_cm)
    }
}

/// Formats offered when creating an album.
#[must_use]
pub fn standard_formats() -> Vec<FormatRecord> {
    vec![
        FormatRecord::new("A4 Landscape", "a4-landscape", 29.7, 21.0),
        FormatRecord::new("A4 Portrait", "a4-portrait", 21.0, 29.7),
        FormatRecord::new("Square Small (20x20)", "square-20", 20.0, 20.0),
        FormatRecord::new("Square Large (30x30)", "square-30", 30.0, 30.0),
    ]
}

/// Look up a catalog format by slug.
#[must_use]
pub fn find_format(slug: &str) -> Option<FormatRecord> {
    standard_formats().into_iter().find(|f| f.slug == slug)
}

/// One page of an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: String,
    /// Ordering key, unique within the album. The front cover is 0.
    pub page_number: i64,
    /// Serialized element list. Absent means an empty page.
    #[serde(default)]
    pub content: Option<String>,
}

impl PageRecord {
    /// A blank page with a fresh id.
    #[must_use]
    pub fn blank(page_number: i64) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), page_number, content: None }
    }

    /// Content string, empty if the page was never saved.
    #[must_use]
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// An album as returned by `get_album`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    pub id: String,
    pub title: String,
    pub format: Format,
    pub pages: Vec<PageRecord>,
}

/// Response of `save_page_content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResult {
    pub success: bool,
}

impl AlbumRecord {
    /// A new album holding just its two covers.
    #[must_use]
    pub fn new(title: impl Into<String>, format: Format) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            format,
            pages: vec![PageRecord::blank(0), PageRecord::blank(1)],
        }
    }

    /// Order pages by page number.
    pub fn sort_pages(&mut self) {
        self.pages.sort_by_key(|p| p.page_number);
    }

    /// Page content strings in page order.
    #[must_use]
    pub fn contents(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.content_str().to_owned()).collect()
    }

    #[must_use]
    pub fn page(&self, page_id: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut PageRecord> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    /// Insert a blank page just before the back cover and return it.
    pub fn insert_page(&mut self) -> PageRecord {
        self.sort_pages();
        let at = self.pages.len().saturating_sub(1);
        let page = PageRecord::blank(0);
        self.pages.insert(at, page.clone());
        self.renumber();
        self.pages.get(at).cloned().unwrap_or(page)
    }

    /// Remove an inner page after checking [`check_page_removal`].
    ///
    /// # Errors
    ///
    /// Returns the guard's [`PageRemovalError`] and leaves the album untouched.
    pub fn remove_page(&mut self, page_id: &str) -> Result<PageRecord, PageRemovalError> {
        self.sort_pages();
        let index = check_page_removal(&self.pages, page_id)?;
        let removed = self.pages.remove(index);
        self.renumber();
        Ok(removed)
    }

    fn renumber(&mut self) {
        for (n, page) in (0_i64..).zip(self.pages.iter_mut()) {
            page.page_number = n;
        }
    }
}

/// Overview strip label for the page at `index` of `count`.
#[must_use]
pub fn page_label(index: usize, count: usize) -> String {
    if index == 0 {
        "Front Cover".to_owned()
    } else if index + 1 == count {
        "Back Cover".to_owned()
    } else {
        format!("Page {index}")
    }
}

fn is_cover(index: usize, count: usize) -> bool {
    index == 0 || index + 1 == count
}

/// One thumbnail in the page overview strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSlot {
    pub page_id: String,
    pub label: String,
    pub active: bool,
    /// Whether the slot shows a remove button.
    pub removable: bool,
}

/// Overview strip for `pages` (already in page order).
#[must_use]
pub fn overview(pages: &[PageRecord], active_index: usize) -> Vec<OverviewSlot> {
    let count = pages.len();
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| OverviewSlot {
            page_id: page.id.clone(),
            label: page_label(i, count),
            active: i == active_index,
            removable: !is_cover(i, count),
        })
        .collect()
}

/// Check that `page_id` may be removed from `pages` (in page order) and
/// return its index.
///
/// # Errors
///
/// [`PageRemovalError::NotFound`] for an unknown id,
/// [`PageRemovalError::TooFewPages`] when the album is already at its minimum
/// and [`PageRemovalError::Cover`] for either cover.
pub fn check_page_removal(pages: &[PageRecord], page_id: &str) -> Result<usize, PageRemovalError> {
    let index = pages
        .iter()
        .position(|p| p.id == page_id)
        .ok_or_else(|| PageRemovalError::NotFound(page_id.to_owned()))?;
    if pages.len() <= MIN_ALBUM_PAGES {
        return Err(PageRemovalError::TooFewPages);
    }
    if is_cover(index, pages.len()) {
        return Err(PageRemovalError::Cover(page_id.to_owned()));
    }
    Ok(index)
}
