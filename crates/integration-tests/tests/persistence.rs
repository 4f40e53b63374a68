//! Cart survival across page loads.

#![allow(clippy::unwrap_used)]

use cartkeeper_integration_tests::{KETTLE, MUG, cart_page, catalog_page, detail_page, dialog_config};
use cartkeeper_storefront::PageSession;
use cartkeeper_storefront::storage::{FileStorage, KeyValueStore, MemoryStorage};
use rust_decimal::Decimal;
use tempfile::TempDir;

const ORIGIN: &str = "https://shop.example";

#[test]
fn test_cart_survives_reload_from_disk() {
    let dir = TempDir::new().unwrap();

    let page = catalog_page(&[KETTLE, MUG]);
    let storage = FileStorage::open(dir.path(), ORIGIN).unwrap();
    let mut session = PageSession::load(page.document, storage, dialog_config());
    session.click(page.buttons[0]);
    session.click(page.buttons[1]);
    session.click(page.buttons[1]);
    drop(session);

    // A new page view on another page of the same origin.
    let page = cart_page();
    let storage = FileStorage::open(dir.path(), ORIGIN).unwrap();
    let session = PageSession::load(page.document, storage, dialog_config());

    assert_eq!(session.store().total_item_count(), 3);
    // 1500 + 349.5 * 2
    assert_eq!(session.store().total_price(), Decimal::new(21990, 1));
    assert_eq!(session.document().get(page.header.badge).unwrap().text, "3");
    assert_eq!(
        session.document().get(page.total).unwrap().text,
        "2\u{a0}199 ₽"
    );
}

#[test]
fn test_origins_are_isolated() {
    let dir = TempDir::new().unwrap();

    let page = detail_page(KETTLE, "4");
    let storage = FileStorage::open(dir.path(), ORIGIN).unwrap();
    let mut session = PageSession::load(page.document, storage, dialog_config());
    session.click(page.add);

    let other = FileStorage::open(dir.path(), "https://other.example").unwrap();
    let session = PageSession::load(cart_page().document, other, dialog_config());
    assert!(session.store().cart().is_empty());
}

#[test]
fn test_stored_format_is_a_json_array_of_records() {
    let page = detail_page(KETTLE, "2");
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());
    session.click(page.add);

    let (_, storage) = session.close();
    let stored: serde_json::Value = serde_json::from_str(&storage.get("cart").unwrap().unwrap()).unwrap();
    let records = stored.as_array().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["id"], "p1");
    assert_eq!(record["name"], "Чайник");
    assert!((record["price"].as_f64().unwrap() - 1500.0).abs() < f64::EPSILON);
    assert_eq!(record["image"], "/static/img/kettle.jpg");
    assert_eq!(record["quantity"], 2);
}

#[test]
fn test_corrupt_storage_loads_empty_and_recovers() {
    let page = catalog_page(&[KETTLE]);
    let storage = MemoryStorage::with_entry("cart", r#"{"not": "a cart"}"#);
    let mut session = PageSession::load(page.document, storage, dialog_config());

    assert!(session.store().cart().is_empty());
    assert_eq!(session.document().get(page.header.badge).unwrap().text, "0");

    session.click(page.buttons[0]);
    let (_, storage) = session.close();
    let reloaded = PageSession::load(cart_page().document, storage, dialog_config());
    assert_eq!(reloaded.store().total_item_count(), 1);
}

#[test]
fn test_zero_quantity_record_is_treated_as_corrupt() {
    let storage = MemoryStorage::with_entry(
        "cart",
        r#"[{"id":"p1","name":"Чайник","price":1500,"image":"","quantity":0}]"#,
    );
    let session = PageSession::load(cart_page().document, storage, dialog_config());
    assert!(session.store().cart().is_empty());
}

#[test]
fn test_custom_storage_key() {
    let config = cartkeeper_storefront::StorefrontConfig {
        storage_key: "basket".to_string(),
        ..dialog_config()
    };
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), config);
    session.click(page.buttons[0]);

    let (_, storage) = session.close();
    assert!(storage.get("cart").unwrap().is_none());
    assert!(storage.get("basket").unwrap().is_some());
}
