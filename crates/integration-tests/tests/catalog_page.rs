//! Catalog page: add-to-cart buttons on product cards.

#![allow(clippy::unwrap_used)]

use cartkeeper_core::ProductId;
use cartkeeper_integration_tests::{KETTLE, MUG, catalog_page, dialog_config};
use cartkeeper_storefront::PageSession;
use cartkeeper_storefront::controller::Interaction;
use cartkeeper_storefront::dom::Element;
use cartkeeper_storefront::storage::{KeyValueStore, MemoryStorage};
use rust_decimal::Decimal;

#[test]
fn test_first_add_creates_line_and_shows_badge() {
    let page = catalog_page(&[KETTLE, MUG]);
    let badge = page.header.badge;
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());
    assert_eq!(session.document().get(badge).unwrap().display.as_deref(), Some("none"));

    session.click(page.buttons[0]);

    let cart = session.store().cart();
    assert_eq!(cart.len(), 1);
    let line = cart.get(&ProductId::parse("p1").unwrap()).unwrap();
    assert_eq!(line.name, "Чайник");
    assert_eq!(line.quantity.get(), 1);
    assert_eq!(session.store().total_price(), Decimal::from(1500));

    let el = session.document().get(badge).unwrap();
    assert_eq!(el.text, "1");
    assert_eq!(el.display.as_deref(), Some("flex"));
}

#[test]
fn test_repeated_adds_increment_one_line() {
    let page = catalog_page(&[KETTLE, MUG]);
    let badge = page.header.badge;
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());

    session.click(page.buttons[0]);
    session.click(page.buttons[0]);
    session.click(page.buttons[1]);

    assert_eq!(session.store().cart().len(), 2);
    assert_eq!(session.store().total_item_count(), 3);
    assert_eq!(session.document().get(badge).unwrap().text, "3");
    // 1500 * 2 + 349.5
    assert_eq!(session.store().total_price(), Decimal::new(33495, 1));

    let stored = session.store().persistence().storage().get("cart").unwrap().unwrap();
    let records: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(records[0]["id"], "p1");
    assert_eq!(records[0]["quantity"], 2);
    assert_eq!(records[1]["id"], "p2");
}

#[test]
fn test_every_add_is_confirmed() {
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());

    session.click(page.buttons[0]);
    session.click(page.buttons[0]);

    assert_eq!(
        session.document_mut().take_alerts(),
        vec!["Чайник добавлен в корзину!", "Чайник добавлен в корзину!"]
    );
}

#[test]
fn test_card_click_is_not_followed() {
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());

    let outcome = session.click(page.buttons[0]);
    assert!(outcome.default_prevented);
    assert!(outcome.propagation_stopped);
}

#[test]
fn test_invalid_product_data_is_ignored() {
    let mut page = catalog_page(&[KETTLE]);
    let broken = page.document.append(
        Element::new("button")
            .with_class("add-to-cart-btn")
            .with_data("product-name", "Без id")
            .with_data("product-price", "10"),
    );
    let badge = page.header.badge;
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());

    let outcome = session.click(broken);
    assert!(matches!(outcome.interaction, Interaction::Rejected(_)));
    assert!(session.store().cart().is_empty());
    assert_eq!(session.document().get(badge).unwrap().text, "0");
    assert!(session.document_mut().take_alerts().is_empty());
    assert!(session.store().persistence().storage().get("cart").unwrap().is_none());
}

#[test]
fn test_page_without_badge_still_works() {
    let mut document = cartkeeper_storefront::dom::Document::new();
    let button = document.append(KETTLE.tag(Element::new("button").with_class("add-to-cart-btn")));
    let mut session = PageSession::load(document, MemoryStorage::new(), dialog_config());

    session.click(button);
    assert_eq!(session.store().total_item_count(), 1);
}
