use cropform_core::service::notification_service::{CONTAINER_CLASS, NOTIFICATION_ID_ATTRIBUTE};
use cropform_core::{Document, MemoryDocument, NotificationCategory, Page, PageConfig};

fn ready_page() -> Page<MemoryDocument> {
    let mut page = Page::new(MemoryDocument::new(), PageConfig::default());
    page.initialize();
    page
}

#[test]
fn error_banner_uses_danger_styling_and_expires_after_five_seconds() {
    let mut page = ready_page();
    let handle = page
        .notify("Server unavailable", NotificationCategory::parse("error"))
        .expect("notify");

    let doc = page.document();
    assert!(doc.has_class(handle.node, "alert-danger"));
    assert!(doc.has_class(handle.node, "alert-dismissible"));
    let icon = doc
        .query_selector(handle.node, "i")
        .expect("query icon")
        .expect("icon present");
    assert!(doc.has_class(icon, "fa-exclamation-triangle"));
    assert_eq!(
        doc.attribute(handle.node, NOTIFICATION_ID_ATTRIBUTE),
        Some(handle.id.to_string())
    );

    page.advance_time(4_999);
    assert!(page.document().is_connected(handle.node));
    page.advance_time(1);
    assert!(!page.document().is_connected(handle.node));
}

#[test]
fn unknown_category_falls_back_to_info() {
    let mut page = ready_page();
    let handle = page
        .notify("Heads up", NotificationCategory::parse("celebration"))
        .expect("notify");
    let doc = page.document();
    assert!(doc.has_class(handle.node, "alert-info"));
    let icon = doc.children(handle.node)[0];
    assert!(doc.has_class(icon, "fa-info-circle"));
}

#[test]
fn manual_removal_before_expiry_is_harmless() {
    let mut page = ready_page();
    let handle = page
        .notify("Removed early", NotificationCategory::Warning)
        .expect("notify");
    let close = page
        .document()
        .query_selector(handle.node, "button.btn-close")
        .expect("query close")
        .expect("close button present");

    page.click(close);
    assert!(!page.document().is_connected(handle.node));

    assert_eq!(page.advance_time(5_000), 1, "expiry still runs");
    assert!(!page.dismiss_notification(handle.id).expect("dismiss after removal"));
}

#[test]
fn banners_share_one_container_and_expire_independently() {
    let mut page = ready_page();
    let first = page.notify("first", NotificationCategory::Info).expect("notify");
    page.advance_time(2_000);
    let second = page.notify("second", NotificationCategory::Success).expect("notify");

    let doc = page.document();
    let containers = doc
        .query_selector_all(doc.root(), &format!(".{CONTAINER_CLASS}"))
        .expect("query containers");
    assert_eq!(containers.len(), 1);
    assert_eq!(doc.parent(containers[0]), Some(doc.body()));

    page.advance_time(3_000);
    assert!(!page.document().is_connected(first.node));
    assert!(page.document().is_connected(second.node));
    page.advance_time(2_000);
    assert!(!page.document().is_connected(second.node));
}

#[test]
fn clicks_outside_close_buttons_keep_banners() {
    let mut page = ready_page();
    let handle = page.notify("stay", NotificationCategory::Info).expect("notify");
    let icon = page.document().children(handle.node)[0];

    page.click(icon);
    assert!(page.document().is_connected(handle.node));
}
