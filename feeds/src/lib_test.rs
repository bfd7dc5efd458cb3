use super::*;

fn page(has_more: bool) -> Page {
    Page { items: Vec::new(), has_more }
}

#[test]
fn cursor_starts_on_first_page_with_more() {
    let cursor = Cursor::new();
    assert_eq!(cursor.page, 1);
    assert!(cursor.has_more);
    assert!(!cursor.is_exhausted());
}

#[test]
fn cursor_advances_when_page_reports_more() {
    let mut cursor = Cursor::new();
    cursor.advance(&page(true));
    assert_eq!(cursor, Cursor { page: 2, has_more: true });
}

#[test]
fn cursor_holds_position_on_final_page() {
    let mut cursor = Cursor { page: 7, has_more: true };
    cursor.advance(&page(false));
    assert_eq!(cursor, Cursor { page: 7, has_more: false });
    assert!(cursor.is_exhausted());
}

#[test]
fn empty_page_reports_no_more() {
    let empty = Page::empty();
    assert!(empty.items.is_empty());
    assert!(!empty.has_more);
}

#[test]
fn item_serializes_with_snake_case_fields() {
    let item = Item { id: "api1-1".to_owned(), title: "API 1 Item 1".to_owned(), created_at: 42 };
    let json = serde_json::to_value(&item).expect("serialize");
    assert_eq!(json, serde_json::json!({ "id": "api1-1", "title": "API 1 Item 1", "created_at": 42 }));
}

#[test]
fn now_ms_is_after_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}
