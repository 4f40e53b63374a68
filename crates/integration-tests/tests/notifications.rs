//! Add-to-cart confirmations: dialogs and toasts.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use cartkeeper_integration_tests::{KETTLE, MUG, catalog_page, detail_page, dialog_config};
use cartkeeper_storefront::presenters::{NotificationTask, ToastPhase};
use cartkeeper_storefront::storage::MemoryStorage;
use cartkeeper_storefront::{PageSession, StorefrontConfig};
use tokio::time::Instant;

const HOST: &str = "toast-container";

#[test]
fn test_dialog_strategy_uses_alert() {
    let page = detail_page(KETTLE, "2");
    let mut session = PageSession::load(page.document, MemoryStorage::new(), dialog_config());

    session.click(page.add);

    assert_eq!(
        session.document_mut().take_alerts(),
        vec!["Чайник (2 шт.) добавлен в корзину!"]
    );
    assert!(session.document().get_element_by_id(HOST).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_toast_appears_fades_and_is_removed() {
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), StorefrontConfig::default());
    let start = Instant::now();

    session.click(page.buttons[0]);

    let host = session.document().get_element_by_id(HOST).unwrap();
    let toasts = session.document().children(host);
    assert_eq!(toasts.len(), 1);
    let toast = session.document().get(toasts[0]).unwrap();
    assert_eq!(toast.text, "Чайник добавлен в корзину!");
    assert!(toast.has_class("toast") && toast.has_class("show"));
    assert!(session.document_mut().take_alerts().is_empty());

    let (task, phase) = session.next_task().await.unwrap();
    assert!(matches!(task, NotificationTask::BeginFade(_)));
    assert_eq!(phase, ToastPhase::Fading);
    assert!(start.elapsed() >= Duration::from_secs(3));
    let toast = session.document().get(toasts[0]).unwrap();
    assert!(toast.has_class("hide") && !toast.has_class("show"));

    let (task, phase) = session.next_task().await.unwrap();
    assert!(matches!(task, NotificationTask::AnimationEnd(_)));
    assert_eq!(phase, ToastPhase::Removed);
    assert!(start.elapsed() >= Duration::from_millis(3_500));

    assert!(!session.document().is_attached(toasts[0]));
    assert!(session.document().get_element_by_id(HOST).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_adds_stack_toasts() {
    let page = catalog_page(&[KETTLE, MUG]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), StorefrontConfig::default());

    session.click(page.buttons[0]);
    session.click(page.buttons[1]);
    session.click(page.buttons[0]);

    let host = session.document().get_element_by_id(HOST).unwrap();
    assert_eq!(session.document().children(host).len(), 3);
    assert_eq!(session.notifier().active(), 3);

    while session.next_task().await.is_some() {}

    assert_eq!(session.notifier().active(), 0);
    assert!(session.document().get_element_by_id(HOST).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_drain_only_applies_fired_timers() {
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), StorefrontConfig::default());
    session.click(page.buttons[0]);

    assert_eq!(session.drain_ready_tasks(), 0);

    tokio::time::sleep(Duration::from_millis(3_100)).await;
    assert_eq!(session.drain_ready_tasks(), 1);
    assert_eq!(session.document().elements_by_class("hide").len(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(session.drain_ready_tasks(), 1);
    assert!(session.document().get_element_by_id(HOST).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_new_toast_after_host_removed_recreates_host() {
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), StorefrontConfig::default());

    session.click(page.buttons[0]);
    while session.next_task().await.is_some() {}
    assert!(session.document().get_element_by_id(HOST).is_none());

    session.click(page.buttons[0]);
    let host = session.document().get_element_by_id(HOST).unwrap();
    assert_eq!(session.document().children(host).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing() {
    let config = StorefrontConfig::from_json(
        r#"{"notifications": {"display_duration_ms": 1000, "exit_animation_ms": 200}}"#,
    )
    .unwrap();
    let page = catalog_page(&[KETTLE]);
    let mut session = PageSession::load(page.document, MemoryStorage::new(), config);
    let start = Instant::now();

    session.click(page.buttons[0]);
    while session.next_task().await.is_some() {}

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1_200));
    assert!(elapsed < Duration::from_millis(3_000));
}
