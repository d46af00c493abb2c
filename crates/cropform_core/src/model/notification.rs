//! Notification severity categories.

use serde::{Deserialize, Serialize};

/// Severity of one notification banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationCategory {
    /// Stable string id accepted by [`NotificationCategory::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Parses a category name; anything unrecognized falls back to `Info`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Alert modifier class suffix (`alert-<suffix>`).
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Error => "danger",
            other => other.as_str(),
        }
    }

    /// Font Awesome icon name (`fa-<icon>`).
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-triangle",
            Self::Warning => "exclamation-circle",
            Self::Info => "info-circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationCategory;

    #[test]
    fn error_maps_to_danger_styling() {
        let category = NotificationCategory::parse("error");
        assert_eq!(category.alert_class(), "danger");
        assert_eq!(category.icon(), "exclamation-triangle");
    }

    #[test]
    fn unknown_category_defaults_to_info() {
        assert_eq!(NotificationCategory::parse("fatal"), NotificationCategory::Info);
        assert_eq!(NotificationCategory::default().icon(), "info-circle");
    }

    #[test]
    fn non_error_categories_keep_their_name() {
        assert_eq!(NotificationCategory::Success.alert_class(), "success");
        assert_eq!(NotificationCategory::Warning.alert_class(), "warning");
        assert_eq!(NotificationCategory::Warning.icon(), "exclamation-circle");
    }
}
