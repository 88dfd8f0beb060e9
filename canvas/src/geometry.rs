//! Reference-space geometry: points, print formats, and the projections that
//! map stored element geometry onto the editor surface and the preview.
//!
//! Every stored coordinate lives in a page that is [`REFERENCE_WIDTH`] units
//! wide and `height_cm / width_cm` times that tall. The editor scales the
//! whole page surface by the zoom factor in one transform, so nothing here
//! ever adjusts an individual element for zoom. The preview uses its own
//! reference width and re-projects each element proportionally.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_WIDTH;

/// A point in either surface-pixel or reference space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside or on the edge of the rectangle.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

/// Physical print format of an album. Only the aspect ratio matters here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    /// Physical page width in centimetres.
    pub width_cm: f64,
    /// Physical page height in centimetres.
    pub height_cm: f64,
}

impl Format {
    #[must_use]
    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self { width_cm, height_cm }
    }

    /// Height-to-width ratio of the printed page.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.height_cm / self.width_cm
    }
}

/// Page content height in reference units for `format`.
#[must_use]
pub fn content_height(format: &Format) -> f64 {
    format.aspect() * REFERENCE_WIDTH
}

/// Map a reference-space point onto the zoomed editor surface.
#[must_use]
pub fn to_screen(point: Point, zoom: f64) -> Point {
    Point::new(point.x * zoom, point.y * zoom)
}

/// Map a surface-pixel point back into reference space.
#[must_use]
pub fn to_reference(point: Point, zoom: f64) -> Point {
    Point::new(point.x / zoom, point.y / zoom)
}

/// Scale factor from reference space to a surface `width` pixels wide.
#[must_use]
pub fn preview_scale(width: f64) -> f64 {
    width / REFERENCE_WIDTH
}

/// A page surface of a given pixel width, with the height implied by the
/// format. Used to re-project reference geometry onto a surface that is not
/// [`REFERENCE_WIDTH`] wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    reference_height: f64,
}

impl Projection {
    #[must_use]
    pub fn new(format: &Format, width: f64) -> Self {
        Self {
            width,
            height: format.aspect() * width,
            reference_height: content_height(format),
        }
    }

    /// Horizontal reference coordinate to surface pixels.
    #[must_use]
    pub fn x(&self, reference_x: f64) -> f64 {
        reference_x / REFERENCE_WIDTH * self.width
    }

    /// Vertical reference coordinate to surface pixels.
    #[must_use]
    pub fn y(&self, reference_y: f64) -> f64 {
        reference_y / self.reference_height * self.height
    }

    /// Project a reference rectangle onto the surface.
    #[must_use]
    pub fn rect(&self, rect: Rect) -> Rect {
        Rect::new(self.x(rect.x), self.y(rect.y), self.x(rect.width), self.y(rect.height))
    }

    /// Scale a font size authored at the reference width.
    #[must_use]
    pub fn font_size(&self, reference_size: f64) -> f64 {
        reference_size * preview_scale(self.width)
    }
}

/// Rotate `pt` by `degrees` clockwise around `pivot` (screen convention, y down).
#[must_use]
pub fn rotate_about(pt: Point, pivot: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return pt;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = pt.x - pivot.x;
    let dy = pt.y - pivot.y;
    Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}
