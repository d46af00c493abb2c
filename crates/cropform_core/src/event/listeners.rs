//! Listener registry with bubbling dispatch.

use crate::dom::Document;
use crate::event::{DomEvent, EventKind, EventOutcome, EventTarget};
use crate::page::UiContext;

/// Boxed event callback. Listeners receive the page context mutably.
pub type Handler<D> = Box<dyn FnMut(&mut UiContext<D>, &DomEvent) -> EventOutcome + Send>;

struct Listener<D: Document> {
    target: EventTarget,
    kind: EventKind,
    handler: Handler<D>,
}

/// Registered listeners for one page, kept in registration order.
pub struct ListenerRegistry<D: Document> {
    listeners: Vec<Listener<D>>,
}

impl<D: Document> Default for ListenerRegistry<D> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<D: Document> std::fmt::Debug for ListenerRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.listeners.len())
            .finish()
    }
}

impl<D: Document> ListenerRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `kind` reaching `target`.
    pub fn add<F>(&mut self, target: EventTarget, kind: EventKind, handler: F)
    where
        F: FnMut(&mut UiContext<D>, &DomEvent) -> EventOutcome + Send + 'static,
    {
        self.listeners.push(Listener {
            target,
            kind,
            handler: Box::new(handler),
        });
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of listeners attached to `target` for `kind`.
    pub fn count_for(&self, target: EventTarget, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.target == target && listener.kind == kind)
            .count()
    }

    /// Delivers `event` along its propagation path.
    pub fn dispatch(&mut self, ui: &mut UiContext<D>, event: &DomEvent) -> EventOutcome {
        let kind = event.kind();
        let path = propagation_path(ui.document(), event);
        let mut outcome = EventOutcome::proceed();
        for target in path {
            for listener in self
                .listeners
                .iter_mut()
                .filter(|listener| listener.target == target && listener.kind == kind)
            {
                outcome.merge((listener.handler)(ui, event));
            }
        }
        outcome
    }
}

fn propagation_path<D: Document>(doc: &D, event: &DomEvent) -> Vec<EventTarget> {
    let Some(target) = event.target() else {
        return vec![EventTarget::Window];
    };
    if !event.kind().bubbles() {
        return vec![EventTarget::Node(target)];
    }

    let mut path = Vec::new();
    let mut cursor = Some(target);
    while let Some(node) = cursor {
        path.push(EventTarget::Node(node));
        cursor = doc.parent(node);
    }
    path.push(EventTarget::Window);
    path
}

#[cfg(test)]
mod tests {
    use super::ListenerRegistry;
    use crate::config::PageConfig;
    use crate::dom::{Document, MemoryDocument};
    use crate::event::{DomEvent, EventKind, EventOutcome, EventTarget};
    use crate::page::UiContext;
    use std::sync::{Arc, Mutex};

    #[test]
    fn click_bubbles_from_target_to_window() {
        let mut doc = MemoryDocument::new();
        let button = doc.create_element("button");
        doc.append_child(doc.body(), button).expect("append");
        let body = doc.body();
        let mut ui = UiContext::new(doc, PageConfig::default());

        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        for (label, target) in [
            ("window", EventTarget::Window),
            ("body", EventTarget::Node(body)),
            ("button", EventTarget::Node(button)),
        ] {
            let order = Arc::clone(&order);
            registry.add(target, EventKind::Click, move |_, _| {
                order.lock().expect("order lock").push(label);
                EventOutcome::proceed()
            });
        }

        let outcome = registry.dispatch(&mut ui, &DomEvent::Click { target: button });
        assert!(!outcome.default_prevented);
        assert_eq!(
            *order.lock().expect("order lock"),
            vec!["button", "body", "window"]
        );
    }

    #[test]
    fn blur_reaches_only_its_target() {
        let mut doc = MemoryDocument::new();
        let input = doc.create_element("input");
        doc.append_child(doc.body(), input).expect("append");
        let body = doc.body();
        let mut ui = UiContext::new(doc, PageConfig::default());

        let mut registry = ListenerRegistry::new();
        registry.add(EventTarget::Node(body), EventKind::Blur, |_, _| {
            EventOutcome::prevent_default()
        });
        let outcome = registry.dispatch(&mut ui, &DomEvent::Blur { target: input });
        assert!(!outcome.default_prevented);
        assert_eq!(registry.count_for(EventTarget::Node(body), EventKind::Blur), 1);
    }
}
