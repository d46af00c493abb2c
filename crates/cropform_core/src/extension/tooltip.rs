//! Tooltip activation seam.

use crate::dom::NodeId;
use std::sync::{Arc, Mutex};

/// Activates a tooltip behavior instance on one annotated element.
///
/// Only invoked when the host declares `HostCapability::Tooltip`.
pub trait TooltipActivator {
    fn activate(&mut self, element: NodeId, title: &str);
}

/// Default activator; annotations stay inert decoration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTooltipActivator;

impl TooltipActivator for NoopTooltipActivator {
    fn activate(&mut self, _element: NodeId, _title: &str) {}
}

/// Activator that records every activation in a shared list.
///
/// Clones share the list, so a host can keep one clone and read back which
/// elements were activated after the page initialized.
#[derive(Debug, Clone, Default)]
pub struct RecordingTooltipActivator {
    activations: Arc<Mutex<Vec<(NodeId, String)>>>,
}

impl RecordingTooltipActivator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(element, title)` pairs in activation order.
    pub fn activations(&self) -> Vec<(NodeId, String)> {
        match self.activations.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TooltipActivator for RecordingTooltipActivator {
    fn activate(&mut self, element: NodeId, title: &str) {
        let mut guard = match self.activations.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((element, title.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingTooltipActivator, TooltipActivator};
    use crate::dom::NodeId;

    #[test]
    fn clones_share_recorded_activations() {
        let observer = RecordingTooltipActivator::new();
        let mut activator = observer.clone();
        activator.activate(NodeId::from_raw(7), "help");

        assert_eq!(
            observer.activations(),
            vec![(NodeId::from_raw(7), "help".to_string())]
        );
    }
}
