//! Typed page events and listener dispatch.
//!
//! # Responsibility
//! - Describe the user/environment events the page reacts to.
//! - Route events to listeners registered on nodes or the window.
//!
//! # Invariants
//! - Node-targeted events that bubble visit the target, then each ancestor,
//!   then window listeners, in that order.
//! - A listener can only cancel the default action; it cannot stop dispatch.

use crate::dom::NodeId;

pub mod listeners;
pub mod timers;

pub use listeners::ListenerRegistry;
pub use timers::{TimerQueue, TimerTask};

/// Event category used for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Blur,
    Submit,
    Click,
    Scroll,
    Intersection,
}

impl EventKind {
    /// Whether node-targeted events of this kind propagate to ancestors.
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Blur)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Node(NodeId),
    Window,
}

/// Viewport intersection report for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    /// Visible fraction of the element, in `[0, 1]`.
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

/// Event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    /// The value of an input changed.
    Input { target: NodeId },
    /// An input lost focus.
    Blur { target: NodeId },
    /// A form is about to be submitted natively.
    Submit { target: NodeId },
    Click { target: NodeId },
    /// The window scrolled to `scroll_y` pixels.
    Scroll { scroll_y: f64 },
    /// Observed elements crossed an intersection threshold.
    Intersection { entries: Vec<IntersectionEntry> },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Input { .. } => EventKind::Input,
            Self::Blur { .. } => EventKind::Blur,
            Self::Submit { .. } => EventKind::Submit,
            Self::Click { .. } => EventKind::Click,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Intersection { .. } => EventKind::Intersection,
        }
    }

    /// Node the event was fired at; `None` for window-level events.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Input { target }
            | Self::Blur { target }
            | Self::Submit { target }
            | Self::Click { target } => Some(*target),
            Self::Scroll { .. } | Self::Intersection { .. } => None,
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Some listener cancelled the default action (navigation, submission).
    pub default_prevented: bool,
}

impl EventOutcome {
    /// Lets the default action proceed.
    pub fn proceed() -> Self {
        Self::default()
    }

    pub fn prevent_default() -> Self {
        Self {
            default_prevented: true,
        }
    }

    /// Folds another listener's outcome into this one.
    pub fn merge(&mut self, other: EventOutcome) {
        self.default_prevented |= other.default_prevented;
    }
}

#[cfg(test)]
mod tests {
    use super::{DomEvent, EventKind, EventOutcome};
    use crate::dom::NodeId;

    #[test]
    fn blur_is_the_only_non_bubbling_kind() {
        assert!(!EventKind::Blur.bubbles());
        assert!(EventKind::Input.bubbles());
        assert!(EventKind::Click.bubbles());
    }

    #[test]
    fn window_events_have_no_target() {
        assert_eq!(DomEvent::Scroll { scroll_y: 10.0 }.target(), None);
        let node = NodeId::from_raw(3);
        assert_eq!(DomEvent::Submit { target: node }.target(), Some(node));
    }

    #[test]
    fn merged_outcome_remembers_any_prevention() {
        let mut outcome = EventOutcome::proceed();
        outcome.merge(EventOutcome::prevent_default());
        outcome.merge(EventOutcome::proceed());
        assert!(outcome.default_prevented);
    }
}
