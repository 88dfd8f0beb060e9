//! Shared numeric constants for the canvas crate.

// ── Reference space ─────────────────────────────────────────────

/// Width of the page in reference units. All stored geometry uses this space.
pub const REFERENCE_WIDTH: f64 = 700.0;

/// Smallest width or height an element may be resized to, in reference units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Lowest z-order an element may be moved to.
pub const MIN_Z_INDEX: i64 = 1;

// ── Viewport ────────────────────────────────────────────────────

/// Space kept free around the page when fitting it into the container.
pub const FIT_PADDING_PX: f64 = 60.0;

/// Fit-to-screen never zooms past this factor.
pub const MAX_FIT_ZOOM: f64 = 1.5;

/// Lower bound for any zoom level.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper bound for manual zoom.
pub const MAX_ZOOM: f64 = 5.0;

/// Increment applied by the zoom step buttons.
pub const ZOOM_STEP: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Floating panel ──────────────────────────────────────────────

/// Elements whose bottom edge falls within this many reference units of the
/// page bottom get their control panel placed above instead of below.
pub const PANEL_FLIP_MARGIN: f64 = 120.0;

// ── Preview ─────────────────────────────────────────────────────

/// Width of the page in the paginated preview, in CSS pixels.
pub const PREVIEW_WIDTH: f64 = 600.0;

// ── Insert presets ──────────────────────────────────────────────

/// Width of a freshly dropped photo.
pub const DROP_PHOTO_WIDTH: f64 = 150.0;

/// Height of a freshly dropped photo.
pub const DROP_PHOTO_HEIGHT: f64 = 100.0;

/// Number of characters shown for a text element in the layer panel.
pub const LAYER_LABEL_CHARS: usize = 24;

// ── Album ───────────────────────────────────────────────────────

/// An album always keeps its front and back cover.
pub const MIN_ALBUM_PAGES: usize = 2;
