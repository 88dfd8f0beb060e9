#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Element, ElementId, ElementStore};
use crate::geometry::{Point, Rect, rotate_about};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [ResizeAnchor; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// Handle position on `rect`, before rotation.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.x + rect.width
        } else {
            rect.x + rect.width * 0.5
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.y + rect.height
        } else {
            rect.y + rect.height * 0.5
        };
        Point::new(x, y)
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Map a reference point into `el`'s unrotated frame.
fn to_local(el: &Element, ref_pt: Point) -> Point {
    let rect = el.visual_rect();
    rotate_about(ref_pt, rect.center(), -el.rotation)
}

/// Which handle of `el` (if any) lies under `ref_pt`.
///
/// The hit slop is fixed in screen pixels, so it shrinks in reference units as
/// the zoom grows.
#[must_use]
pub fn handle_at(el: &Element, ref_pt: Point, zoom: f64) -> Option<ResizeAnchor> {
    let local = to_local(el, ref_pt);
    let rect = el.visual_rect();
    let slop = HANDLE_RADIUS_PX / zoom;
    ResizeAnchor::ALL.into_iter().find(|anchor| {
        let h = anchor.position(&rect);
        (local.x - h.x).abs() <= slop && (local.y - h.y).abs() <= slop
    })
}

/// Whether `ref_pt` lies on the body of `el`, honoring its rotation.
#[must_use]
pub fn body_contains(el: &Element, ref_pt: Point) -> bool {
    el.visual_rect().contains(to_local(el, ref_pt))
}

/// Test which element (if any) is under `ref_pt`, checking the selected
/// element's handles first, then bodies from the top of the paint order down.
#[must_use]
pub fn hit_test(ref_pt: Point, doc: &ElementStore, zoom: f64, selected_id: Option<&str>) -> Option<Hit> {
    if let Some(sel) = selected_id.and_then(|id| doc.get(id)) {
        if let Some(anchor) = handle_at(sel, ref_pt, zoom) {
            return Some(Hit { element_id: sel.id.clone(), part: HitPart::ResizeHandle(anchor) });
        }
    }

    doc.sorted_elements()
        .into_iter()
        .rev()
        .find(|el| body_contains(el, ref_pt))
        .map(|el| Hit { element_id: el.id.clone(), part: HitPart::Body })
}
