//! Single-field validity check.
//!
//! # Responsibility
//! - Decide whether one raw input value is acceptable for a named field.
//! - Produce the user-facing message for the first failing rule.
//!
//! # Invariants
//! - Rules run in fixed order and the first failure wins:
//!   required, numeric, declared bounds, agronomic sub-range.
//! - The check never panics and never touches the document.

use crate::model::field::{display_name, FieldName, NumericRange};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NUMERIC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid numeric prefix regex")
});

/// Message used when a domain rule exists without a dedicated message.
pub const GENERIC_DOMAIN_MESSAGE: &str = "Invalid value";

/// Reason one value was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// Value is empty or whitespace only.
    Required { field: String },
    /// Value has no numeric prefix.
    NotANumber,
    /// Value lies outside the declared `min`/`max`.
    OutOfRange { field: String, bounds: NumericRange },
    /// Value passes declared bounds but is agronomically implausible.
    OutsideDomain { field: FieldName },
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", display_name(field)),
            Self::NotANumber => write!(f, "Please enter a valid number"),
            Self::OutOfRange { field, bounds } => write!(
                f,
                "{} must be between {} and {}",
                display_name(field),
                number_to_display(bounds.min),
                number_to_display(bounds.max)
            ),
            Self::OutsideDomain { field } => write!(f, "{}", domain_message(field.as_str())),
        }
    }
}

impl Error for ValidationIssue {}

/// Verdict for one validation call.
///
/// Created per check and discarded once its visual state is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

impl From<Result<f64, ValidationIssue>> for ValidationResult {
    fn from(value: Result<f64, ValidationIssue>) -> Self {
        match value {
            Ok(_) => Self::valid(),
            Err(issue) => Self::invalid(issue.to_string()),
        }
    }
}

/// Checks `raw` against `bounds` and the rules of `field_name`.
///
/// Returns the parsed value on success.
///
/// # Errors
/// - Returns the first failing [`ValidationIssue`].
pub fn check_value(raw: &str, bounds: NumericRange, field_name: &str) -> Result<f64, ValidationIssue> {
    if raw.trim().is_empty() {
        return Err(ValidationIssue::Required {
            field: field_name.to_string(),
        });
    }

    let value = parse_number(raw).ok_or(ValidationIssue::NotANumber)?;

    if !bounds.contains(value) {
        return Err(ValidationIssue::OutOfRange {
            field: field_name.to_string(),
            bounds,
        });
    }

    if let Some(field) = FieldName::parse(field_name) {
        if !passes_domain_range(field, value) {
            return Err(ValidationIssue::OutsideDomain { field });
        }
    }

    Ok(value)
}

/// Validity check returning the `{is_valid, message}` verdict shape.
pub fn validate_value(raw: &str, bounds: NumericRange, field_name: &str) -> ValidationResult {
    check_value(raw, bounds, field_name).into()
}

/// Returns whether `value` lies in the field's agronomic sub-range.
///
/// Fields without a sub-range always pass.
pub fn passes_domain_range(field: FieldName, value: f64) -> bool {
    field
        .descriptor()
        .domain_range
        .map(|domain| domain.range.contains(value))
        .unwrap_or(true)
}

/// Message shown when the agronomic sub-range check fails.
pub fn domain_message(field_name: &str) -> &'static str {
    FieldName::parse(field_name)
        .and_then(|field| field.descriptor().domain_range)
        .map(|domain| domain.message)
        .unwrap_or(GENERIC_DOMAIN_MESSAGE)
}

/// Parses the longest numeric prefix of `raw` after leading whitespace.
///
/// Returns `None` when no numeric prefix exists. Trailing garbage after a
/// valid prefix is ignored (`"12kg"` parses as `12`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let matched = NUMERIC_PREFIX_RE.find(trimmed)?.as_str();
    if let Some(sign) = matched.strip_suffix("Infinity") {
        return Some(if sign == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    matched.parse::<f64>().ok()
}

/// Renders a bound in shortest numeric form (`0`, `4.5`, `Infinity`).
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent form with a
/// signed exponent (`1e+21`, `1.5e-7`), as browsers print numbers.
pub fn number_to_display(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value != 0.0 && (value.abs() >= 1e21 || value.abs() < 1e-6) {
        let rendered = format!("{value:e}");
        match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => rendered,
        }
    } else {
        format!("{value}")
    }
}
