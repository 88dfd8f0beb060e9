//! Viewport and zoom control for the editor surface.
//!
//! The page surface is drawn at reference size and scaled as a unit by the
//! zoom factor. This module decides that factor: automatically from the
//! container size and format (fit-to-screen), or manually through zoom
//! buttons. Stored element geometry is never touched.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{FIT_PADDING_PX, MAX_FIT_ZOOM, MAX_ZOOM, MIN_ZOOM, REFERENCE_WIDTH, ZOOM_STEP};
use crate::geometry::{Format, Size, content_height};

/// Zoom level that fits the whole page inside `container`.
///
/// Never exceeds [`MAX_FIT_ZOOM`] and never drops below [`MIN_ZOOM`].
#[must_use]
pub fn fit_to_screen(container: Size, format: &Format) -> f64 {
    let scale_x = (container.width - FIT_PADDING_PX) / REFERENCE_WIDTH;
    let scale_y = (container.height - FIT_PADDING_PX) / content_height(format);
    scale_x.min(scale_y).min(MAX_FIT_ZOOM).max(MIN_ZOOM)
}

/// Zoom state for one editor surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    container: Size,
    format: Format,
}

impl Viewport {
    /// Create a viewport already fitted to `container`.
    #[must_use]
    pub fn new(container: Size, format: Format) -> Self {
        Self { zoom: fit_to_screen(container, &format), container, format }
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn format(&self) -> &Format {
        &self.format
    }

    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Page height in reference units.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        content_height(&self.format)
    }

    /// The container changed size; refit.
    pub fn resize(&mut self, container: Size) {
        self.container = container;
        self.fit();
    }

    /// The album format changed; refit.
    pub fn set_format(&mut self, format: Format) {
        self.format = format;
        self.fit();
    }

    /// Reset to fit-to-screen.
    pub fn fit(&mut self) -> f64 {
        self.zoom = fit_to_screen(self.container, &self.format);
        self.zoom
    }

    /// Multiply the zoom by `factor`, clamped to the manual range.
    pub fn zoom_by(&mut self, factor: f64) -> f64 {
        self.set_zoom(self.zoom * factor)
    }

    /// One step of the zoom-in button.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    /// One step of the zoom-out button.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    /// Set an explicit zoom, clamped to the manual range.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom
    }

    /// On-screen size of the page surface in pixels.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        Size::new(REFERENCE_WIDTH * self.zoom, self.content_height() * self.zoom)
    }

    /// CSS transform applied to the page surface.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.zoom)
    }

    /// Zoom as a whole percentage, for the toolbar readout.
    #[must_use]
    pub fn percent(&self) -> i64 {
        #[allow(clippy::cast_possible_truncation)]
        let pct = (self.zoom * 100.0).round() as i64;
        pct
    }
}
