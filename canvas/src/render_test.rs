#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{PhotoBody, TextBody};
use crate::geometry::{Format, Rect};

fn viewport() -> Viewport {
    let mut vp = Viewport::new(Size::new(1000.0, 800.0), Format::new(20.0, 20.0));
    vp.set_zoom(2.0);
    vp
}

fn photo(rect: Rect, z: i64) -> Element {
    Element::new(ElementBody::Photo(PhotoBody { src: "a.jpg".into() }), rect, z)
}

fn text(rect: Rect, z: i64) -> Element {
    let mut body = TextBody::new("Hi", 20.0);
    body.font_weight = FontWeight::Bold;
    body.text_align = TextAlign::Center;
    Element::new(ElementBody::Text(body), rect, z)
}

// =============================================================
// build_plan
// =============================================================

#[test]
fn items_in_paint_order_with_visual_extent() {
    let mut doc = ElementStore::new();
    let mut top = photo(Rect::new(10.0, 20.0, 100.0, 50.0), 3);
    top.scale = 1.5;
    doc.add(top);
    doc.add(photo(Rect::new(0.0, 0.0, 10.0, 10.0), 1));
    let plan = build_plan(&doc, &viewport(), &InteractionState::Idle, &UiState::default());
    let zs: Vec<i64> = plan.items.iter().map(|i| i.z_index).collect();
    assert_eq!(zs, vec![1, 3]);
    assert_eq!(plan.items[1].width, 150.0);
    assert_eq!(plan.items[1].height, 75.0);
    assert!(plan.selection.is_none());
}

#[test]
fn surface_follows_zoom() {
    let plan = build_plan(&ElementStore::new(), &viewport(), &InteractionState::Idle, &UiState::default());
    assert_eq!(plan.surface, Size::new(1400.0, 1400.0));
    assert_eq!(plan.transform, "scale(2)");
}

#[test]
fn selection_has_eight_handles() {
    let mut doc = ElementStore::new();
    let id = doc.add(photo(Rect::new(0.0, 0.0, 100.0, 50.0), 1));
    let state = InteractionState::Selected { id: id.clone() };
    let plan = build_plan(&doc, &viewport(), &state, &UiState::default());
    let sel = plan.selection.unwrap();
    assert_eq!(sel.id, id);
    assert_eq!(sel.handles.len(), 8);
    assert_eq!(sel.panel, PanelPlacement::Below);
    assert!(plan.items[0].selected);
    assert!(!plan.items[0].editing);
}

#[test]
fn editing_hides_handles_and_flags_item() {
    let mut doc = ElementStore::new();
    let id = doc.add(text(Rect::new(0.0, 0.0, 100.0, 50.0), 1));
    let state = InteractionState::EditingText { id };
    let plan = build_plan(&doc, &viewport(), &state, &UiState::default());
    assert!(plan.items[0].editing);
    assert!(plan.selection.unwrap().handles.is_empty());
}

#[test]
fn selection_of_missing_element_is_dropped() {
    let state = InteractionState::Selected { id: "gone".into() };
    let plan = build_plan(&ElementStore::new(), &viewport(), &state, &UiState::default());
    assert!(plan.selection.is_none());
}

// =============================================================
// handle_positions
// =============================================================

#[test]
fn handles_rotate_with_element() {
    let mut el = photo(Rect::new(0.0, 0.0, 100.0, 100.0), 1);
    el.rotation = 90.0;
    let handles = handle_positions(&el);
    let nw = handles.iter().find(|h| h.anchor == ResizeAnchor::Nw).unwrap();
    // Clockwise quarter turn about (50, 50) takes the top-left corner to the top-right.
    assert!((nw.at.x - 100.0).abs() < 1e-9);
    assert!(nw.at.y.abs() < 1e-9);
}

#[test]
fn handles_unrotated_sit_on_corners() {
    let el = photo(Rect::new(10.0, 10.0, 100.0, 40.0), 1);
    let handles = handle_positions(&el);
    let se = handles.iter().find(|h| h.anchor == ResizeAnchor::Se).unwrap();
    assert_eq!(se.at, Point::new(110.0, 50.0));
}

// =============================================================
// css
// =============================================================

#[test]
fn photo_css_positions_box() {
    let mut doc = ElementStore::new();
    doc.add(photo(Rect::new(10.0, 20.0, 30.0, 40.0), 2));
    let plan = build_plan(&doc, &viewport(), &InteractionState::Idle, &UiState::default());
    assert_eq!(plan.items[0].css(), "position:absolute;left:10px;top:20px;width:30px;height:40px;z-index:2;");
}

#[test]
fn text_css_carries_style_and_rotation() {
    let mut doc = ElementStore::new();
    let mut el = text(Rect::new(0.0, 0.0, 30.0, 40.0), 1);
    el.rotation = 15.0;
    doc.add(el);
    let plan = build_plan(&doc, &viewport(), &InteractionState::Idle, &UiState::default());
    let css = plan.items[0].css();
    assert!(css.contains("transform:rotate(15deg);"));
    assert!(css.contains("font-family:'Inter';"));
    assert!(css.contains("font-weight:bold;"));
    assert!(css.contains("text-align:center;"));
    assert!(css.contains("color:#000000;"));
}

#[test]
fn plan_serializes_for_host() {
    let mut doc = ElementStore::new();
    doc.add(photo(Rect::new(0.0, 0.0, 10.0, 10.0), 1));
    let plan = build_plan(&doc, &viewport(), &InteractionState::Idle, &UiState::default());
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["items"][0]["type"], "photo");
    assert_eq!(json["items"][0]["zIndex"], 1);
    assert_eq!(json["transform"], "scale(2)");
}
