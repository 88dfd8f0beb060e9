#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{PhotoBody, TextBody};
use crate::geometry::Rect;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn square() -> Format {
    Format::new(20.0, 20.0)
}

fn content(elements: &[Element]) -> String {
    doc::serialize(elements).unwrap()
}

fn photo(rect: Rect, z: i64) -> Element {
    Element::new(ElementBody::Photo(PhotoBody { src: "a.jpg".into() }), rect, z)
}

fn pages(n: usize) -> Vec<String> {
    (0..n).map(|_| String::new()).collect()
}

// =============================================================
// Projection
// =============================================================

#[test]
fn projects_position_and_scaled_size() {
    let mut el = photo(Rect::new(350.0, 350.0, 100.0, 50.0), 1);
    el.scale = 2.0;
    let out = render_content(&content(&[el]), &square(), 600.0);
    assert_eq!(out.len(), 1);
    assert!(approx_eq(out[0].x, 300.0));
    assert!(approx_eq(out[0].y, 300.0));
    assert!(approx_eq(out[0].width, 200.0 / 700.0 * 600.0));
    assert!(approx_eq(out[0].height, 100.0 / 700.0 * 600.0));
}

#[test]
fn projects_y_through_format_height() {
    let format = Format::new(20.0, 30.0);
    let el = photo(Rect::new(0.0, 525.0, 10.0, 10.0), 1);
    let out = render_content(&content(&[el]), &format, 350.0);
    // Half of the 1050-unit page maps to half of the 525 px preview.
    assert!(approx_eq(out[0].y, 262.5));
}

#[test]
fn text_font_size_scales_with_width() {
    let el = Element::new(ElementBody::Text(TextBody::new("Hi", 35.0)), Rect::new(0.0, 0.0, 10.0, 10.0), 1);
    let out = render_content(&content(&[el]), &square(), 600.0);
    match &out[0].content {
        PreviewContent::Text { font_size, font_family, .. } => {
            assert!(approx_eq(*font_size, 30.0));
            assert_eq!(*font_family, "Inter");
        }
        PreviewContent::Photo { .. } => panic!("expected text"),
    }
}

#[test]
fn output_is_in_paint_order() {
    let top = photo(Rect::new(0.0, 0.0, 10.0, 10.0), 9);
    let bottom = photo(Rect::new(0.0, 0.0, 10.0, 10.0), 2);
    let out = render_content(&content(&[top, bottom]), &square(), 600.0);
    let zs: Vec<i64> = out.iter().map(|e| e.z_index).collect();
    assert_eq!(zs, vec![2, 9]);
}

#[test]
fn unreadable_page_renders_nothing() {
    assert!(render_content("not json", &square(), 600.0).is_empty());
    assert!(render_content("", &square(), 600.0).is_empty());
}

#[test]
fn preview_element_json_shape() {
    let el = photo(Rect::new(0.0, 0.0, 10.0, 10.0), 1);
    let out = render_content(&content(&[el]), &square(), 700.0);
    let json = serde_json::to_value(&out[0]).unwrap();
    assert_eq!(json["type"], "photo");
    assert_eq!(json["src"], "a.jpg");
    assert_eq!(json["zIndex"], 1);
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn starts_on_first_page() {
    let preview = PreviewRenderer::new(square(), pages(3));
    assert_eq!(preview.index(), 0);
    assert!(!preview.can_go_back());
    assert!(preview.can_go_forward());
    assert_eq!(preview.progress_label(), "Page 1 of 3");
}

#[test]
fn next_clamps_at_last_page() {
    let mut preview = PreviewRenderer::new(square(), pages(3));
    assert_eq!(preview.next(), 1);
    assert_eq!(preview.next(), 2);
    assert_eq!(preview.next(), 2);
    assert!(!preview.can_go_forward());
    assert_eq!(preview.progress(), 1.0);
}

#[test]
fn prev_clamps_at_first_page() {
    let mut preview = PreviewRenderer::new(square(), pages(3));
    assert_eq!(preview.prev(), 0);
    preview.go_to(2);
    assert_eq!(preview.prev(), 1);
    assert_eq!(preview.progress_label(), "Page 2 of 3");
}

#[test]
fn go_to_past_end_clamps() {
    let mut preview = PreviewRenderer::new(square(), pages(4));
    assert_eq!(preview.go_to(99), 3);
}

#[test]
fn progress_fraction() {
    let mut preview = PreviewRenderer::new(square(), pages(4));
    assert_eq!(preview.progress(), 0.25);
    preview.next();
    assert_eq!(preview.progress(), 0.5);
}

#[test]
fn empty_album() {
    let mut preview = PreviewRenderer::new(square(), Vec::new());
    assert_eq!(preview.next(), 0);
    assert_eq!(preview.progress_label(), "No pages");
    assert_eq!(preview.progress(), 0.0);
    assert!(preview.render_current().is_empty());
    assert!(preview.render_page(0).is_none());
}

#[test]
fn render_current_follows_index() {
    let el = photo(Rect::new(0.0, 0.0, 10.0, 10.0), 1);
    let mut preview = PreviewRenderer::new(square(), vec![String::new(), content(&[el])]);
    assert!(preview.render_current().is_empty());
    preview.next();
    assert_eq!(preview.render_current().len(), 1);
}

#[test]
fn default_width_is_600() {
    let preview = PreviewRenderer::new(Format::new(20.0, 30.0), pages(1));
    let surface = preview.surface();
    assert_eq!(surface.width, 600.0);
    assert!(approx_eq(surface.height, 900.0));
}
