//! Behavior layer for the crop recommendation input page.
//!
//! Page components (validation, notifications, reveal animations, tooltips,
//! navigation and autocomplete) operate on any [`dom::Document`]; the
//! in-memory [`dom::MemoryDocument`] backs tests and headless hosts.

pub mod config;
pub mod dom;
pub mod event;
pub mod extension;
pub mod logging;
pub mod model;
pub mod page;
pub mod service;
pub mod validation;

pub use config::{ConfigError, ConfigResult, PageConfig};
pub use dom::{Document, DomError, DomResult, MemoryDocument, NodeId};
pub use event::{DomEvent, EventOutcome, IntersectionEntry};
pub use extension::capability::{parse_host_capabilities, HostCapability, HostCapabilityError};
pub use extension::tooltip::{NoopTooltipActivator, TooltipActivator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::field::{display_name, format_input_value, FieldName, NumericRange};
pub use model::notification::NotificationCategory;
pub use page::{build_prediction_page, Page, PredictionPage, UiContext};
pub use service::form_controller::{validate_input, SubmitVerdict};
pub use service::loading_overlay::{hide_loading_overlay, show_loading_overlay};
pub use service::notification_service::{notify, NotificationHandle};
pub use validation::validator::{check_value, validate_value, ValidationIssue, ValidationResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
