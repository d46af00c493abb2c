//! Page behavior configuration.
//!
//! # Responsibility
//! - Hold the selectors, thresholds and lifetimes the components read.
//! - Load partial JSON overrides on top of the built-in defaults.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object yields `PageConfig::default()`.
//! - A config returned by [`PageConfig::from_json_str`] has passed [`PageConfig::validate`].

use crate::dom::Selector;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_FORM_SELECTOR: &str = ".prediction-form";
pub const DEFAULT_NOTIFICATION_LIFETIME_MS: u64 = 5_000;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REVEAL_ROOT_MARGIN_BOTTOM_PX: f64 = 50.0;
pub const DEFAULT_NAVBAR_SELECTOR: &str = ".navbar";
pub const DEFAULT_NAVBAR_SOLID_AFTER_PX: f64 = 50.0;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Scroll reveal observation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Element categories that start hidden and reveal on intersection.
    pub selectors: Vec<String>,
    /// Visible fraction that triggers the reveal, in `(0, 1]`.
    pub threshold: f64,
    /// Pixels trimmed from the bottom of the viewport before intersecting.
    pub root_margin_bottom_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: vec![".feature-card".to_string(), ".parameter-group".to_string()],
            threshold: DEFAULT_REVEAL_THRESHOLD,
            root_margin_bottom_px: DEFAULT_REVEAL_ROOT_MARGIN_BOTTOM_PX,
        }
    }
}

/// Fixed navigation bar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavbarConfig {
    pub selector: String,
    /// Scroll offset above which the navbar turns opaque.
    pub solid_after_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_NAVBAR_SELECTOR.to_string(),
            solid_after_px: DEFAULT_NAVBAR_SOLID_AFTER_PX,
        }
    }
}

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub form_selector: String,
    pub notification_lifetime_ms: u64,
    pub reveal: RevealConfig,
    pub navbar: NavbarConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            form_selector: DEFAULT_FORM_SELECTOR.to_string(),
            notification_lifetime_ms: DEFAULT_NOTIFICATION_LIFETIME_MS,
            reveal: RevealConfig::default(),
            navbar: NavbarConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parses a (possibly partial) JSON document and validates the result.
    ///
    /// # Errors
    /// - `ConfigError::Parse` for malformed JSON or unknown keys.
    /// - Any error reported by [`PageConfig::validate`].
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and selector syntax.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.notification_lifetime_ms == 0 {
            return Err(ConfigError::InvalidNotificationLifetime);
        }
        let threshold = self.reveal.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidRevealThreshold(threshold));
        }
        if !self.reveal.root_margin_bottom_px.is_finite() {
            return Err(ConfigError::InvalidPixelOffset("reveal.root_margin_bottom_px"));
        }
        if !self.navbar.solid_after_px.is_finite() {
            return Err(ConfigError::InvalidPixelOffset("navbar.solid_after_px"));
        }

        check_selector("form_selector", &self.form_selector)?;
        check_selector("navbar.selector", &self.navbar.selector)?;
        if self.reveal.selectors.is_empty() {
            return Err(ConfigError::InvalidSelector {
                field: "reveal.selectors",
                selector: String::new(),
            });
        }
        for selector in &self.reveal.selectors {
            check_selector("reveal.selectors", selector)?;
        }
        Ok(())
    }

    /// Reveal selectors joined into one selector list.
    pub fn reveal_selector_list(&self) -> String {
        self.reveal.selectors.join(", ")
    }
}

fn check_selector(field: &'static str, selector: &str) -> ConfigResult<()> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidSelector {
            field,
            selector: selector.to_string(),
        })
}

/// Configuration load/validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidNotificationLifetime,
    InvalidRevealThreshold(f64),
    InvalidPixelOffset(&'static str),
    InvalidSelector {
        field: &'static str,
        selector: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "invalid page config: {details}"),
            Self::InvalidNotificationLifetime => {
                write!(f, "notification_lifetime_ms must be greater than zero")
            }
            Self::InvalidRevealThreshold(value) => {
                write!(f, "reveal.threshold must be in (0, 1], got {value}")
            }
            Self::InvalidPixelOffset(field) => write!(f, "{field} must be a finite number"),
            Self::InvalidSelector { field, selector } => {
                write!(f, "{field} has unsupported selector `{selector}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PageConfig, DEFAULT_NOTIFICATION_LIFETIME_MS};

    #[test]
    fn empty_object_yields_defaults() {
        let config = PageConfig::from_json_str("{}").expect("empty config");
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.notification_lifetime_ms, DEFAULT_NOTIFICATION_LIFETIME_MS);
        assert_eq!(config.reveal_selector_list(), ".feature-card, .parameter-group");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = PageConfig::from_json_str(
            r#"{ "notification_lifetime_ms": 1500, "navbar": { "solid_after_px": 80 } }"#,
        )
        .expect("partial config");
        assert_eq!(config.notification_lifetime_ms, 1500);
        assert_eq!(config.navbar.solid_after_px, 80.0);
        assert_eq!(config.navbar.selector, ".navbar");
        assert_eq!(config.form_selector, ".prediction-form");
    }

    #[test]
    fn rejects_unknown_keys_and_bad_json() {
        let err = PageConfig::from_json_str(r#"{ "lifetime": 1 }"#).expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = PageConfig::from_json_str("{").expect_err("bad json");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = PageConfig::from_json_str(r#"{ "notification_lifetime_ms": 0 }"#)
            .expect_err("zero lifetime");
        assert_eq!(err, ConfigError::InvalidNotificationLifetime);

        let err = PageConfig::from_json_str(r#"{ "reveal": { "threshold": 1.5 } }"#)
            .expect_err("threshold too large");
        assert_eq!(err, ConfigError::InvalidRevealThreshold(1.5));
    }

    #[test]
    fn rejects_unsupported_selectors() {
        let err = PageConfig::from_json_str(r#"{ "form_selector": "form > div" }"#)
            .expect_err("combinator selector");
        assert!(err.to_string().contains("form_selector"));

        let err = PageConfig::from_json_str(r#"{ "reveal": { "selectors": [] } }"#)
            .expect_err("empty reveal list");
        assert!(matches!(err, ConfigError::InvalidSelector { .. }));
    }
}
