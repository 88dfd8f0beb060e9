#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn portrait() -> Format {
    Format::new(20.0, 30.0)
}

// =============================================================
// fit_to_screen
// =============================================================

#[test]
fn fit_portrait_in_1000_by_800() {
    let container = Size::new(1000.0, 800.0);
    let zoom = fit_to_screen(container, &portrait());
    let scale_x = (1000.0 - 60.0) / 700.0;
    let scale_y = (800.0 - 60.0) / 1050.0;
    assert!(zoom <= 1.5);
    assert!(zoom <= scale_x);
    assert!(zoom <= scale_y);
    assert!(approx_eq(zoom, scale_y));
}

#[test]
fn fit_caps_at_150_percent() {
    let zoom = fit_to_screen(Size::new(5000.0, 5000.0), &Format::new(20.0, 20.0));
    assert_eq!(zoom, 1.5);
}

#[test]
fn fit_width_bound_for_landscape() {
    let zoom = fit_to_screen(Size::new(760.0, 2000.0), &Format::new(29.7, 21.0));
    assert!(approx_eq(zoom, 1.0));
}

#[test]
fn fit_tiny_container_floors_at_min() {
    let zoom = fit_to_screen(Size::new(10.0, 10.0), &portrait());
    assert_eq!(zoom, 0.1);
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn viewport_starts_fitted() {
    let vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    assert_eq!(vp.zoom(), fit_to_screen(Size::new(1000.0, 800.0), &portrait()));
}

#[test]
fn viewport_zoom_by_clamps() {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    assert_eq!(vp.zoom_by(100.0), 5.0);
    assert_eq!(vp.zoom_by(0.0001), 0.1);
}

#[test]
fn viewport_zoom_steps() {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    vp.set_zoom(1.0);
    assert!(approx_eq(vp.zoom_in(), 1.1));
    assert!(approx_eq(vp.zoom_out(), 1.0));
}

#[test]
fn viewport_step_clamped_at_bounds() {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    vp.set_zoom(5.0);
    assert_eq!(vp.zoom_in(), 5.0);
    vp.set_zoom(0.1);
    assert_eq!(vp.zoom_out(), 0.1);
}

#[test]
fn viewport_resize_refits() {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    vp.set_zoom(3.0);
    vp.resize(Size::new(2000.0, 2000.0));
    assert_eq!(vp.zoom(), fit_to_screen(Size::new(2000.0, 2000.0), &portrait()));
}

#[test]
fn viewport_format_change_refits() {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    vp.set_format(Format::new(30.0, 30.0));
    assert_eq!(vp.zoom(), fit_to_screen(Size::new(1000.0, 800.0), &Format::new(30.0, 30.0)));
    assert!(approx_eq(vp.content_height(), 700.0));
}

#[test]
fn viewport_surface_size_and_transform() {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), portrait());
    vp.set_zoom(0.5);
    assert_eq!(vp.surface_size(), Size::new(350.0, 525.0));
    assert_eq!(vp.css_transform(), "scale(0.5)");
    assert_eq!(vp.percent(), 50);
}
