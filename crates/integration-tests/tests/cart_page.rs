//! Cart page: line item rendering and delegated controls.

#![allow(clippy::unwrap_used)]

use cartkeeper_core::CartChange;
use cartkeeper_integration_tests::{cart_page, dialog_config};
use cartkeeper_storefront::PageSession;
use cartkeeper_storefront::dom::{EventTarget, NodeId};
use cartkeeper_storefront::presenters::{ITEM_REMOVE, PRODUCT_ID_ATTR, QUANTITY_MINUS, QUANTITY_PLUS};
use cartkeeper_storefront::storage::MemoryStorage;

const TWO_LINES: &str = r#"[
    {"id":"p1","name":"Чайник","price":1500,"image":"/static/img/kettle.jpg","quantity":1},
    {"id":"p2","name":"Кружка","price":349.5,"image":"/static/img/mug.jpg","quantity":3}
]"#;

/// Node handles of a loaded cart page.
struct Ids {
    badge: NodeId,
    container: NodeId,
    total: NodeId,
}

fn load(stored: &str) -> (PageSession<MemoryStorage>, Ids) {
    let page = cart_page();
    let ids = Ids {
        badge: page.header.badge,
        container: page.container,
        total: page.total,
    };
    let session = PageSession::load(
        page.document,
        MemoryStorage::with_entry("cart", stored),
        dialog_config(),
    );
    (session, ids)
}

fn html(session: &PageSession<MemoryStorage>, page: &Ids) -> String {
    session
        .document()
        .get(page.container)
        .unwrap()
        .inner_html
        .clone()
        .unwrap_or_default()
}

fn total(session: &PageSession<MemoryStorage>, page: &Ids) -> String {
    session.document().get(page.total).unwrap().text.clone()
}

fn target(class: &str, id: &str) -> EventTarget {
    EventTarget::new(class).with_data(PRODUCT_ID_ATTR, id)
}

#[test]
fn test_renders_stored_cart_on_load() {
    let (session, page) = load(TWO_LINES);

    let html = html(&session, &page);
    assert_eq!(html.matches("class=\"cart-item\"").count(), 2);
    assert!(html.contains("Чайник"));
    assert!(html.contains("1\u{a0}500 ₽"));
    assert!(html.contains("349,5 ₽"));
    assert_eq!(total(&session, &page), "2\u{a0}548,5 ₽");
    assert_eq!(session.document().get(page.badge).unwrap().text, "4");
}

#[test]
fn test_empty_cart_shows_message() {
    let (session, page) = load("[]");

    assert!(html(&session, &page).contains(r#"<p class="empty-cart-message">Ваша корзина пуста.</p>"#));
    assert_eq!(total(&session, &page), "0 ₽");
}

#[test]
fn test_plus_and_minus_update_totals() {
    let (mut session, page) = load(TWO_LINES);

    assert_eq!(
        session.click_within(page.container, &target(QUANTITY_PLUS, "p1")),
        Some(CartChange::QuantityChanged)
    );
    // 1500 * 2 + 349.5 * 3
    assert_eq!(total(&session, &page), "4\u{a0}048,5 ₽");

    session.click_within(page.container, &target(QUANTITY_MINUS, "p2"));
    // 1500 * 2 + 349.5 * 2
    assert_eq!(total(&session, &page), "3\u{a0}699 ₽");
    assert_eq!(session.document().get(page.badge).unwrap().text, "4");
}

#[test]
fn test_minus_at_one_removes_line() {
    let (mut session, page) = load(TWO_LINES);

    assert_eq!(
        session.click_within(page.container, &target(QUANTITY_MINUS, "p1")),
        Some(CartChange::Removed)
    );
    let html = html(&session, &page);
    assert!(!html.contains("Чайник"));
    assert_eq!(html.matches("class=\"cart-item\"").count(), 1);
}

#[test]
fn test_remove_last_line_empties_cart() {
    let (mut session, page) = load(TWO_LINES);

    session.click_within(page.container, &target(ITEM_REMOVE, "p1"));
    session.click_within(page.container, &target(ITEM_REMOVE, "p2"));

    assert!(session.store().cart().is_empty());
    assert!(html(&session, &page).contains("Ваша корзина пуста."));
    let badge = session.document().get(page.badge).unwrap();
    assert_eq!(badge.text, "0");
    assert_eq!(badge.display.as_deref(), Some("none"));
}

#[test]
fn test_stale_controls_do_nothing() {
    let (mut session, page) = load(TWO_LINES);
    session.click_within(page.container, &target(ITEM_REMOVE, "p1"));

    // A second click on the already-removed row.
    assert_eq!(
        session.click_within(page.container, &target(ITEM_REMOVE, "p1")),
        Some(CartChange::Unchanged)
    );
    assert_eq!(
        session.click_within(page.container, &target(QUANTITY_PLUS, "p1")),
        Some(CartChange::Unchanged)
    );
    assert_eq!(session.store().total_item_count(), 3);
}

#[test]
fn test_non_control_clicks_are_ignored() {
    let (mut session, page) = load(TWO_LINES);

    assert_eq!(
        session.click_within(page.container, &EventTarget::new("cart-item-image")),
        None
    );
    assert_eq!(session.store().total_item_count(), 4);
}

#[test]
fn test_changes_are_persisted() {
    let (mut session, page) = load(TWO_LINES);
    session.click_within(page.container, &target(ITEM_REMOVE, "p2"));

    let (_, storage) = session.close();
    let reloaded = PageSession::load(cart_page().document, storage, dialog_config());
    assert_eq!(reloaded.store().cart().len(), 1);
    assert_eq!(reloaded.store().total_item_count(), 1);
}
