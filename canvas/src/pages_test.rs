use super::*;

fn pages(n: usize) -> Vec<PageRecord> {
    (0_i64..).take(n).map(PageRecord::blank).collect()
}

fn album(n: usize) -> AlbumRecord {
    let mut album = AlbumRecord::new("Holiday", Format::new(20.0, 20.0));
    album.pages = pages(n);
    album
}

// =============================================================
// Labels and overview
// =============================================================

#[test]
fn labels_for_covers_and_inner_pages() {
    assert_eq!(page_label(0, 5), "Front Cover");
    assert_eq!(page_label(1, 5), "Page 1");
    assert_eq!(page_label(3, 5), "Page 3");
    assert_eq!(page_label(4, 5), "Back Cover");
}

#[test]
fn single_page_is_front_cover() {
    assert_eq!(page_label(0, 1), "Front Cover");
}

#[test]
fn overview_marks_active_and_removable() {
    let pages = pages(4);
    let slots = overview(&pages, 2);
    let removable: Vec<bool> = slots.iter().map(|s| s.removable).collect();
    assert_eq!(removable, vec![false, true, true, false]);
    let active: Vec<bool> = slots.iter().map(|s| s.active).collect();
    assert_eq!(active, vec![false, false, true, false]);
    assert_eq!(slots[3].label, "Back Cover");
    assert_eq!(slots[1].page_id, pages[1].id);
}

// =============================================================
// Removal guard
// =============================================================

#[test]
fn removal_rejected_with_two_pages() {
    let pages = pages(2);
    assert_eq!(check_page_removal(&pages, &pages[1].id), Err(PageRemovalError::TooFewPages));
}

#[test]
fn removal_rejects_covers() {
    let pages = pages(4);
    assert_eq!(check_page_removal(&pages, &pages[0].id), Err(PageRemovalError::Cover(pages[0].id.clone())));
    assert_eq!(check_page_removal(&pages, &pages[3].id), Err(PageRemovalError::Cover(pages[3].id.clone())));
}

#[test]
fn removal_rejects_unknown_page() {
    let pages = pages(4);
    assert_eq!(check_page_removal(&pages, "nope"), Err(PageRemovalError::NotFound("nope".into())));
}

#[test]
fn removal_allows_inner_page() {
    let pages = pages(3);
    assert_eq!(check_page_removal(&pages, &pages[1].id), Ok(1));
}

// =============================================================
// Album mutation
// =============================================================

#[test]
fn new_album_has_two_covers() {
    let album = AlbumRecord::new("Trip", Format::new(29.7, 21.0));
    assert_eq!(album.pages.len(), 2);
    assert_eq!(album.pages[0].page_number, 0);
    assert_eq!(album.pages[1].page_number, 1);
}

#[test]
fn insert_page_goes_before_back_cover() {
    let mut album = album(3);
    let back = album.pages[2].id.clone();
    let added = album.insert_page();
    assert_eq!(album.pages.len(), 4);
    assert_eq!(album.pages[2].id, added.id);
    assert_eq!(added.page_number, 2);
    assert_eq!(album.pages[3].id, back);
    let numbers: Vec<i64> = album.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![0, 1, 2, 3]);
}

#[test]
fn remove_page_renumbers() {
    let mut album = album(4);
    let target = album.pages[1].id.clone();
    let removed = album.remove_page(&target).unwrap();
    assert_eq!(removed.id, target);
    let numbers: Vec<i64> = album.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![0, 1, 2]);
}

#[test]
fn remove_page_error_leaves_album_untouched() {
    let mut album = album(2);
    let before = album.clone();
    let id = album.pages[0].id.clone();
    assert!(album.remove_page(&id).is_err());
    assert_eq!(album, before);
}

#[test]
fn sort_pages_orders_by_number() {
    let mut album = album(3);
    album.pages.reverse();
    album.sort_pages();
    let numbers: Vec<i64> = album.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![0, 1, 2]);
}

#[test]
fn contents_default_to_empty() {
    let mut album = album(2);
    album.pages[1].content = Some("[]".into());
    assert_eq!(album.contents(), vec![String::new(), "[]".to_owned()]);
}

// =============================================================
// Catalog and wire format
// =============================================================

#[test]
fn catalog_has_four_formats() {
    let formats = standard_formats();
    assert_eq!(formats.len(), 4);
    let a4 = find_format("a4-portrait").unwrap();
    assert_eq!(a4.format(), Format::new(21.0, 29.7));
    assert!(find_format("letter").is_none());
}

#[test]
fn album_json_uses_camel_case() {
    let json = r#"{
        "id": "al1",
        "title": "T",
        "format": { "widthCm": 20, "heightCm": 30 },
        "pages": [
            { "id": "p0", "pageNumber": 0, "content": null },
            { "id": "p1", "pageNumber": 1 }
        ]
    }"#;
    let album: AlbumRecord = serde_json::from_str(json).unwrap();
    assert_eq!(album.format, Format::new(20.0, 30.0));
    assert_eq!(album.pages[1].page_number, 1);
    assert!(album.pages[1].content.is_none());
}

#[test]
fn save_result_shape() {
    let json = serde_json::to_string(&SaveResult { success: true }).unwrap();
    assert_eq!(json, r#"{"success":true}"#);
}
