//! Command bodies for the `photobook` CLI. Each returns a serializable report
//! so `main` only has to print it.

use canvas::doc::{self, ElementStore};
use canvas::geometry::Size;
use canvas::layers::{LayerEntry, layer_entries};
use canvas::pages::{AlbumRecord, PageRecord, overview, page_label};
use canvas::preview::{PreviewElement, PreviewRenderer};
use canvas::viewport::Viewport;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::CliError;
use crate::services::persistence::SaveDispatcher;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub index: usize,
    pub page_id: String,
    pub label: String,
    pub active: bool,
    pub removable: bool,
    /// Element count, or `None` if the content does not parse.
    pub elements: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub label: String,
    pub progress: f64,
    pub width: f64,
    pub height: f64,
    pub elements: Vec<PreviewElement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitReport {
    pub zoom: f64,
    pub percent: i64,
    pub surface: Size,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProblem {
    pub page_id: String,
    pub label: String,
    pub error: String,
}

/// The page at `index`.
///
/// # Errors
///
/// Returns [`CliError::PageIndex`] if the album has no such page.
pub fn page_at(album: &AlbumRecord, index: usize) -> Result<&PageRecord, CliError> {
    album.pages.get(index).ok_or(CliError::PageIndex { index, count: album.pages.len() })
}

/// Overview strip rows with element counts.
#[must_use]
pub fn page_summaries(album: &AlbumRecord, active_index: usize) -> Vec<PageSummary> {
    overview(&album.pages, active_index)
        .into_iter()
        .zip(&album.pages)
        .enumerate()
        .map(|(index, (slot, page))| PageSummary {
            index,
            page_id: slot.page_id,
            label: slot.label,
            active: slot.active,
            removable: slot.removable,
            elements: doc::try_parse(page.content_str()).map(|els| els.len()).ok(),
        })
        .collect()
}

/// Layer panel rows for one page.
///
/// # Errors
///
/// Returns [`CliError::PageIndex`] for an unknown page.
pub fn layers_for(album: &AlbumRecord, index: usize) -> Result<Vec<LayerEntry>, CliError> {
    let page = page_at(album, index)?;
    Ok(layer_entries(&ElementStore::load(page.content_str())))
}

/// Projected preview of one page.
///
/// # Errors
///
/// Returns [`CliError::PageIndex`] for an unknown page.
pub fn preview_for(album: &AlbumRecord, index: usize, width: f64) -> Result<PreviewReport, CliError> {
    page_at(album, index)?;
    let mut preview = PreviewRenderer::with_width(album.format, album.contents(), width);
    preview.go_to(index);
    let surface = preview.surface();
    Ok(PreviewReport {
        label: preview.progress_label(),
        progress: preview.progress(),
        width: surface.width,
        height: surface.height,
        elements: preview.render_current(),
    })
}

/// Fit-to-screen zoom for a container.
#[must_use]
pub fn fit_for(album: &AlbumRecord, container: Size) -> FitReport {
    let viewport = Viewport::new(container, album.format);
    FitReport { zoom: viewport.zoom(), percent: viewport.percent(), surface: viewport.surface_size() }
}

/// Pages whose content does not parse.
#[must_use]
pub fn check_album(album: &AlbumRecord) -> Vec<ContentProblem> {
    let count = album.pages.len();
    album
        .pages
        .iter()
        .enumerate()
        .filter_map(|(index, page)| match doc::try_parse(page.content_str()) {
            Ok(_) => None,
            Err(e) => Some(ContentProblem {
                page_id: page.id.clone(),
                label: page_label(index, count),
                error: e.to_string(),
            }),
        })
        .collect()
}

/// Re-save every readable page so missing optional fields are written back
/// with their defaults. Unreadable and never-saved pages are left alone.
///
/// # Errors
///
/// Returns [`CliError::Content`] if a page cannot be re-serialized.
pub fn migrate_album(album: &AlbumRecord, dispatcher: &SaveDispatcher) -> Result<Vec<JoinHandle<()>>, CliError> {
    let mut handles = Vec::new();
    for page in &album.pages {
        let Some(content) = page.content.as_deref() else {
            continue;
        };
        let elements = match doc::try_parse(content) {
            Ok(elements) => elements,
            Err(e) => {
                warn!(page_id = %page.id, error = %e, "skipping unreadable page");
                continue;
            }
        };
        handles.push(dispatcher.dispatch(&page.id, doc::serialize(&elements)?));
    }
    Ok(handles)
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
