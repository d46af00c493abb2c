//! Explicitly owned page state handed to every component.

use crate::config::PageConfig;
use crate::dom::{Document, NodeId};
use crate::event::{TimerQueue, TimerTask};
use crate::extension::capability::HostCapability;
use crate::extension::tooltip::{NoopTooltipActivator, TooltipActivator};
use crate::service::notification_service;
use log::warn;
use std::collections::BTreeSet;

/// Document plus every piece of page-level state the components share.
///
/// # Invariants
/// - The notification container handle, when set, was created or found by
///   the notification service; it is re-resolved once detached.
/// - `reveal_targets` only holds elements still waiting for their first
///   intersection.
pub struct UiContext<D: Document> {
    document: D,
    config: PageConfig,
    timers: TimerQueue,
    capabilities: BTreeSet<HostCapability>,
    tooltip_activator: Box<dyn TooltipActivator + Send>,
    notification_container: Option<NodeId>,
    reveal_targets: BTreeSet<NodeId>,
}

impl<D: Document> std::fmt::Debug for UiContext<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("config", &self.config)
            .field("now_ms", &self.timers.now_ms())
            .field("capabilities", &self.capabilities)
            .field("notification_container", &self.notification_container)
            .field("reveal_targets", &self.reveal_targets.len())
            .finish_non_exhaustive()
    }
}

impl<D: Document> UiContext<D> {
    /// Creates a context with no host capabilities and a no-op tooltip activator.
    pub fn new(document: D, config: PageConfig) -> Self {
        Self {
            document,
            config,
            timers: TimerQueue::new(),
            capabilities: BTreeSet::new(),
            tooltip_activator: Box::new(NoopTooltipActivator),
            notification_container: None,
            reveal_targets: BTreeSet::new(),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub(crate) fn timers_mut(&mut self) -> &mut TimerQueue {
        &mut self.timers
    }

    pub fn has_capability(&self, capability: HostCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn capabilities(&self) -> &BTreeSet<HostCapability> {
        &self.capabilities
    }

    pub fn declare_capability(&mut self, capability: HostCapability) {
        self.capabilities.insert(capability);
    }

    pub fn set_tooltip_activator(&mut self, activator: Box<dyn TooltipActivator + Send>) {
        self.tooltip_activator = activator;
    }

    pub(crate) fn tooltip_activator_mut(&mut self) -> &mut (dyn TooltipActivator + Send + 'static) {
        self.tooltip_activator.as_mut()
    }

    pub(crate) fn notification_container(&self) -> Option<NodeId> {
        self.notification_container
    }

    pub(crate) fn set_notification_container(&mut self, container: NodeId) {
        self.notification_container = Some(container);
    }

    /// Elements still waiting to be revealed.
    pub fn reveal_targets(&self) -> &BTreeSet<NodeId> {
        &self.reveal_targets
    }

    pub(crate) fn reveal_targets_mut(&mut self) -> &mut BTreeSet<NodeId> {
        &mut self.reveal_targets
    }

    /// Advances the page clock and runs every timer that became due.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance_time(&mut self, elapsed_ms: u64) -> usize {
        let due = self.timers.advance(elapsed_ms);
        let count = due.len();
        for task in due {
            match task {
                TimerTask::RemoveNotification(node) => {
                    if let Err(err) = notification_service::expire(self, node) {
                        warn!(
                            "event=timer_task module=page status=error task=remove_notification error={err}"
                        );
                    }
                }
            }
        }
        count
    }
}
