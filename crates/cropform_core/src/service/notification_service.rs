//! Dismissible, auto-expiring alert banners.
//!
//! # Responsibility
//! - Build alert banners inside a page-level container.
//! - Remove banners on close-button click, explicit dismissal or expiry.
//!
//! # Invariants
//! - The container is created at most once per page and then reused.
//! - Removal is idempotent; expiring an already removed banner is a no-op.
//! - Message text is inserted as a text node, never parsed as markup.

use crate::dom::{Document, DomResult, NodeId};
use crate::event::{DomEvent, EventKind, EventOutcome, EventTarget, ListenerRegistry, TimerTask};
use crate::model::notification::NotificationCategory;
use crate::page::UiContext;
use log::{debug, warn};
use uuid::Uuid;

pub const CONTAINER_CLASS: &str = "flash-messages";
pub const DISMISS_SELECTOR: &str = "[data-bs-dismiss=\"alert\"]";
pub const NOTIFICATION_ID_ATTRIBUTE: &str = "data-notification-id";

/// Handle to one emitted banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHandle {
    pub id: Uuid,
    pub node: NodeId,
}

/// Appends a banner for `message` and schedules its expiry.
///
/// # Contract
/// - Banner classes: `alert alert-<cls> alert-dismissible fade show`.
/// - Children: icon, message text, close button, in that order.
/// - Expiry fires after `PageConfig::notification_lifetime_ms`.
pub fn notify<D: Document>(
    ui: &mut UiContext<D>,
    message: &str,
    category: NotificationCategory,
) -> DomResult<NotificationHandle> {
    let container = ensure_container(ui)?;
    let id = Uuid::new_v4();
    let doc = ui.document_mut();

    let alert = doc.create_element("div");
    doc.set_attribute(
        alert,
        "class",
        &format!(
            "alert alert-{} alert-dismissible fade show",
            category.alert_class()
        ),
    )?;
    doc.set_attribute(alert, "role", "alert")?;
    doc.set_attribute(alert, NOTIFICATION_ID_ATTRIBUTE, &id.to_string())?;

    let icon = doc.create_element("i");
    doc.set_attribute(icon, "class", &format!("fas fa-{} me-2", category.icon()))?;
    doc.append_child(alert, icon)?;

    let text = doc.create_text(message);
    doc.append_child(alert, text)?;

    let close = doc.create_element("button");
    doc.set_attribute(close, "type", "button")?;
    doc.set_attribute(close, "class", "btn-close")?;
    doc.set_attribute(close, "data-bs-dismiss", "alert")?;
    doc.append_child(alert, close)?;

    doc.append_child(container, alert)?;

    let lifetime_ms = ui.config().notification_lifetime_ms;
    ui.timers_mut()
        .schedule(lifetime_ms, TimerTask::RemoveNotification(alert));

    debug!(
        "event=notification_shown module=notification status=ok category={} id={id} lifetime_ms={lifetime_ms}",
        category.as_str()
    );
    Ok(NotificationHandle { id, node: alert })
}

/// Removes the banner carrying `id`.
///
/// Returns `Ok(false)` when no attached banner has that id.
pub fn dismiss<D: Document>(ui: &mut UiContext<D>, id: Uuid) -> DomResult<bool> {
    let Some(node) = find_notification(ui, id)? else {
        return Ok(false);
    };
    let removed = ui.document_mut().remove(node)?;
    if removed {
        debug!("event=notification_dismissed module=notification status=ok id={id}");
    }
    Ok(removed)
}

/// Attached banner carrying `id`, if any.
pub fn find_notification<D: Document>(ui: &UiContext<D>, id: Uuid) -> DomResult<Option<NodeId>> {
    let doc = ui.document();
    let selector = format!("[{NOTIFICATION_ID_ATTRIBUTE}=\"{id}\"]");
    doc.query_selector(doc.root(), &selector)
}

/// Timer callback: removes `node` if it is still attached.
pub(crate) fn expire<D: Document>(ui: &mut UiContext<D>, node: NodeId) -> DomResult<bool> {
    let doc = ui.document_mut();
    if doc.parent(node).is_none() {
        return Ok(false);
    }
    let removed = doc.remove(node)?;
    debug!("event=notification_expired module=notification status=ok node={node}");
    Ok(removed)
}

/// Registers the close-button click handler on the window.
pub fn install<D: Document + 'static>(listeners: &mut ListenerRegistry<D>) {
    listeners.add(EventTarget::Window, EventKind::Click, |ui, event| {
        let DomEvent::Click { target } = event else {
            return EventOutcome::proceed();
        };
        if let Err(err) = close_from_click(ui, *target) {
            warn!("event=notification_close module=notification status=error error={err}");
        }
        EventOutcome::proceed()
    });
}

fn close_from_click<D: Document>(ui: &mut UiContext<D>, target: NodeId) -> DomResult<()> {
    let doc = ui.document_mut();
    if doc.closest(target, DISMISS_SELECTOR)?.is_none() {
        return Ok(());
    }
    if let Some(alert) = doc.closest(target, ".alert")? {
        doc.remove(alert)?;
    }
    Ok(())
}

fn ensure_container<D: Document>(ui: &mut UiContext<D>) -> DomResult<NodeId> {
    if let Some(container) = ui.notification_container() {
        if ui.document().is_connected(container) {
            return Ok(container);
        }
    }

    let doc = ui.document_mut();
    let container = match doc.query_selector(doc.root(), &format!(".{CONTAINER_CLASS}"))? {
        Some(existing) => existing,
        None => {
            let created = doc.create_element("div");
            doc.set_attribute(created, "class", CONTAINER_CLASS)?;
            let body = doc.body();
            doc.append_child(body, created)?;
            created
        }
    };
    ui.set_notification_container(container);
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::{dismiss, install, notify, CONTAINER_CLASS};
    use crate::config::PageConfig;
    use crate::dom::{Document, MemoryDocument};
    use crate::event::{DomEvent, ListenerRegistry};
    use crate::model::notification::NotificationCategory;
    use crate::page::UiContext;

    fn context() -> UiContext<MemoryDocument> {
        UiContext::new(MemoryDocument::new(), PageConfig::default())
    }

    #[test]
    fn banner_structure_matches_category() {
        let mut ui = context();
        let handle = notify(&mut ui, "Saved", NotificationCategory::Success).expect("notify");
        let doc = ui.document();

        assert_eq!(
            doc.attribute(handle.node, "class").as_deref(),
            Some("alert alert-success alert-dismissible fade show")
        );
        let children = doc.children(handle.node);
        assert_eq!(children.len(), 3);
        assert_eq!(
            doc.attribute(children[0], "class").as_deref(),
            Some("fas fa-check-circle me-2")
        );
        assert_eq!(doc.text_content(children[1]), "Saved");
        assert_eq!(doc.attribute(children[2], "data-bs-dismiss").as_deref(), Some("alert"));
    }

    #[test]
    fn container_is_created_once_and_reused() {
        let mut ui = context();
        notify(&mut ui, "one", NotificationCategory::Info).expect("notify");
        notify(&mut ui, "two", NotificationCategory::Warning).expect("notify");
        let doc = ui.document();

        let containers = doc
            .query_selector_all(doc.root(), &format!(".{CONTAINER_CLASS}"))
            .expect("query containers");
        assert_eq!(containers.len(), 1);
        assert_eq!(doc.children(containers[0]).len(), 2);
    }

    #[test]
    fn existing_container_in_markup_is_used() {
        let mut doc = MemoryDocument::new();
        let main = doc.create_element("main");
        let container = doc.create_element("div");
        doc.set_attribute(container, "class", CONTAINER_CLASS)
            .expect("class");
        doc.append_child(doc.body(), main).expect("append");
        doc.append_child(main, container).expect("append");
        let mut ui = UiContext::new(doc, PageConfig::default());

        let handle = notify(&mut ui, "hello", NotificationCategory::Info).expect("notify");
        assert_eq!(ui.document().parent(handle.node), Some(container));
    }

    #[test]
    fn message_is_inserted_as_text() {
        let mut ui = context();
        let handle = notify(&mut ui, "<b>bold</b>", NotificationCategory::Info).expect("notify");
        let doc = ui.document();
        assert!(doc.query_selector(handle.node, "b").expect("query").is_none());
        assert!(doc.text_content(handle.node).contains("<b>bold</b>"));
    }

    #[test]
    fn dismiss_is_idempotent_and_expiry_after_dismiss_is_noop() {
        let mut ui = context();
        let handle = notify(&mut ui, "bye", NotificationCategory::Error).expect("notify");

        assert!(dismiss(&mut ui, handle.id).expect("first dismiss"));
        assert!(!dismiss(&mut ui, handle.id).expect("second dismiss"));
        assert_eq!(ui.advance_time(5_000), 1);
        assert!(!ui.document().is_connected(handle.node));
    }

    #[test]
    fn close_button_click_removes_banner() {
        let mut ui = context();
        let mut listeners = ListenerRegistry::new();
        install(&mut listeners);
        let handle = notify(&mut ui, "close me", NotificationCategory::Info).expect("notify");
        let close = ui.document().children(handle.node)[2];

        listeners.dispatch(&mut ui, &DomEvent::Click { target: close });
        assert!(!ui.document().is_connected(handle.node));

        // Clicking a detached button again is harmless.
        listeners.dispatch(&mut ui, &DomEvent::Click { target: close });
    }

    #[test]
    fn banner_expires_after_configured_lifetime() {
        let config = PageConfig::from_json_str(r#"{ "notification_lifetime_ms": 1000 }"#)
            .expect("config");
        let mut ui = UiContext::new(MemoryDocument::new(), config);
        let handle = notify(&mut ui, "short", NotificationCategory::Info).expect("notify");

        ui.advance_time(999);
        assert!(ui.document().is_connected(handle.node));
        ui.advance_time(1);
        assert!(!ui.document().is_connected(handle.node));
    }
}
