//! Page lifecycle: installation on page-ready and event routing.

use crate::config::PageConfig;
use crate::dom::{Document, DomResult, NodeId};
use crate::event::{DomEvent, EventOutcome, IntersectionEntry, ListenerRegistry};
use crate::extension::capability::HostCapability;
use crate::extension::tooltip::TooltipActivator;
use crate::model::notification::NotificationCategory;
use crate::page::UiContext;
use crate::service::form_controller::{self, FormController};
use crate::service::notification_service::{self, NotificationHandle};
use crate::service::scroll_reveal::{self, ElementBox};
use crate::service::{autocomplete, loading_overlay, navigation, tooltip_installer};
use crate::validation::validator::ValidationResult;
use log::{info, warn};
use std::fmt::Display;
use uuid::Uuid;

/// A document with every page behavior attached.
///
/// # Invariants
/// - [`Page::initialize`] installs behaviors at most once.
/// - Installers are independent; one failing does not stop the others.
pub struct Page<D: Document + 'static> {
    ui: UiContext<D>,
    listeners: ListenerRegistry<D>,
    initialized: bool,
}

impl<D: Document + 'static> std::fmt::Debug for Page<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("ui", &self.ui)
            .field("listeners", &self.listeners)
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl<D: Document + 'static> Page<D> {
    /// Creates an uninitialized page with no host capabilities declared.
    pub fn new(document: D, config: PageConfig) -> Self {
        Self {
            ui: UiContext::new(document, config),
            listeners: ListenerRegistry::new(),
            initialized: false,
        }
    }

    /// Declares host capabilities before initialization.
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = HostCapability>) -> Self {
        for capability in capabilities {
            self.ui.declare_capability(capability);
        }
        self
    }

    pub fn with_tooltip_activator(mut self, activator: Box<dyn TooltipActivator + Send>) -> Self {
        self.ui.set_tooltip_activator(activator);
        self
    }

    /// Runs every installer once (the page-ready step).
    ///
    /// Returns `false` when the page was already initialized.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;

        notification_service::install(&mut self.listeners);
        let form = run_installer(
            "form",
            FormController::install(&mut self.ui, &mut self.listeners),
        );
        run_installer("reveal", scroll_reveal::install(&mut self.ui, &mut self.listeners));
        run_installer("tooltip", tooltip_installer::install(&mut self.ui));
        run_installer("navigation", navigation::install(&self.ui, &mut self.listeners));
        run_installer("autocomplete", autocomplete::install(self.ui.document_mut()));

        info!(
            "event=page_ready module=page status=ok form={} listeners={}",
            form.unwrap_or(false),
            self.listeners.len()
        );
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Delivers one host event to the registered listeners.
    pub fn dispatch(&mut self, event: &DomEvent) -> EventOutcome {
        self.listeners.dispatch(&mut self.ui, event)
    }

    /// Sets an input's value and fires `input`, as typing would.
    pub fn fill(&mut self, input: NodeId, value: &str) -> DomResult<EventOutcome> {
        self.ui.document_mut().set_value(input, value)?;
        Ok(self.dispatch(&DomEvent::Input { target: input }))
    }

    pub fn blur(&mut self, input: NodeId) -> EventOutcome {
        self.dispatch(&DomEvent::Blur { target: input })
    }

    pub fn click(&mut self, target: NodeId) -> EventOutcome {
        self.dispatch(&DomEvent::Click { target })
    }

    /// Fires `submit`; the host submits natively unless the outcome is
    /// default-prevented.
    pub fn submit(&mut self, form: NodeId) -> EventOutcome {
        self.dispatch(&DomEvent::Submit { target: form })
    }

    pub fn scroll_to(&mut self, scroll_y: f64) -> EventOutcome {
        self.dispatch(&DomEvent::Scroll { scroll_y })
    }

    pub fn report_intersections(&mut self, entries: Vec<IntersectionEntry>) -> EventOutcome {
        self.dispatch(&DomEvent::Intersection { entries })
    }

    /// Converts element positions into intersection entries and dispatches
    /// them.
    pub fn report_positions(
        &mut self,
        positions: &[(NodeId, ElementBox)],
        viewport_height: f64,
    ) -> EventOutcome {
        let reveal = &self.ui.config().reveal;
        let entries = positions
            .iter()
            .map(|(node, element)| {
                scroll_reveal::intersection_entry(*node, *element, viewport_height, reveal)
            })
            .collect();
        self.report_intersections(entries)
    }

    /// Advances the page clock, running due timers.
    pub fn advance_time(&mut self, elapsed_ms: u64) -> usize {
        self.ui.advance_time(elapsed_ms)
    }

    pub fn notify(&mut self, message: &str, category: NotificationCategory) -> DomResult<NotificationHandle> {
        notification_service::notify(&mut self.ui, message, category)
    }

    pub fn dismiss_notification(&mut self, id: Uuid) -> DomResult<bool> {
        notification_service::dismiss(&mut self.ui, id)
    }

    pub fn hide_loading_overlay(&mut self) -> DomResult<bool> {
        loading_overlay::hide_loading_overlay(&mut self.ui)
    }

    /// Validates one input and applies its visual state.
    pub fn validate_input(&mut self, input: NodeId) -> DomResult<ValidationResult> {
        form_controller::validate_input(self.ui.document_mut(), input)
    }

    pub fn ui(&self) -> &UiContext<D> {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiContext<D> {
        &mut self.ui
    }

    pub fn document(&self) -> &D {
        self.ui.document()
    }

    pub fn listeners(&self) -> &ListenerRegistry<D> {
        &self.listeners
    }

    pub fn into_document(self) -> D {
        self.ui.into_document()
    }
}

fn run_installer<T, E: Display>(name: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("event=install module=page status=error installer={name} error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Page;
    use crate::config::PageConfig;
    use crate::dom::{Document, MemoryDocument};
    use crate::event::{EventKind, EventTarget};

    #[test]
    fn initialize_runs_once() {
        let mut page = Page::new(MemoryDocument::new(), PageConfig::default());
        assert!(page.initialize());
        let listeners = page.listeners().len();
        assert!(!page.initialize());
        assert_eq!(page.listeners().len(), listeners);
        assert_eq!(
            page.listeners()
                .count_for(EventTarget::Window, EventKind::Click),
            1
        );
    }

    #[test]
    fn empty_page_initializes_without_form_or_navbar() {
        let mut page = Page::new(MemoryDocument::new(), PageConfig::default());
        page.initialize();
        assert_eq!(
            page.listeners().count_for(EventTarget::Window, EventKind::Scroll),
            0
        );
        // Reveal styles are injected even with nothing to reveal.
        assert!(page.document().element_by_id("dynamic-animations").is_some());
    }
}
