//! Host capability declarations.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment feature a host page may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostCapability {
    /// Third-party tooltip activation is available.
    Tooltip,
    /// The host reports viewport intersections for observed elements.
    IntersectionObserver,
}

impl HostCapability {
    /// Stable string id used in host declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tooltip => HOST_CAPABILITY_TOOLTIP,
            Self::IntersectionObserver => HOST_CAPABILITY_INTERSECTION_OBSERVER,
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Tooltip => "Activate hover tooltips for annotated form fields.",
            Self::IntersectionObserver => {
                "Report when observed elements scroll into the viewport."
            }
        }
    }
}

/// Declaration string for tooltip activation.
pub const HOST_CAPABILITY_TOOLTIP: &str = "tooltip";
/// Declaration string for viewport intersection reporting.
pub const HOST_CAPABILITY_INTERSECTION_OBSERVER: &str = "intersection_observer";

const SUPPORTED_HOST_CAPABILITY_STRINGS: &[&str] = &[
    HOST_CAPABILITY_TOOLTIP,
    HOST_CAPABILITY_INTERSECTION_OBSERVER,
];

/// Returns supported host capability declaration strings.
pub fn supported_host_capability_strings() -> &'static [&'static str] {
    SUPPORTED_HOST_CAPABILITY_STRINGS
}

/// Parses one host capability declaration.
pub fn parse_host_capability(value: &str) -> Result<HostCapability, HostCapabilityError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(HostCapabilityError::EmptyCapability);
    }

    match normalized {
        HOST_CAPABILITY_TOOLTIP => Ok(HostCapability::Tooltip),
        HOST_CAPABILITY_INTERSECTION_OBSERVER => Ok(HostCapability::IntersectionObserver),
        other => Err(HostCapabilityError::UnsupportedCapability(other.to_string())),
    }
}

/// Parses a list of declarations into a set; the first invalid entry fails.
pub fn parse_host_capabilities<S: AsRef<str>>(
    values: &[S],
) -> Result<BTreeSet<HostCapability>, HostCapabilityError> {
    values
        .iter()
        .map(|value| parse_host_capability(value.as_ref()))
        .collect()
}

/// Host capability parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCapabilityError {
    EmptyCapability,
    UnsupportedCapability(String),
}

impl Display for HostCapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCapability => write!(f, "host capability value must not be empty"),
            Self::UnsupportedCapability(value) => {
                write!(f, "host capability is unsupported: {value}")
            }
        }
    }
}

impl Error for HostCapabilityError {}

#[cfg(test)]
mod tests {
    use super::{
        parse_host_capabilities, parse_host_capability, supported_host_capability_strings,
        HostCapability, HostCapabilityError,
    };

    #[test]
    fn parses_all_supported_capabilities() {
        for value in supported_host_capability_strings() {
            let capability = parse_host_capability(value).expect("supported capability");
            assert_eq!(capability.as_str(), *value);
        }
    }

    #[test]
    fn rejects_empty_and_unknown_values() {
        assert_eq!(
            parse_host_capability("  "),
            Err(HostCapabilityError::EmptyCapability)
        );
        assert_eq!(
            parse_host_capability("Tooltip"),
            Err(HostCapabilityError::UnsupportedCapability(
                "Tooltip".to_string()
            ))
        );
    }

    #[test]
    fn parses_declaration_lists_into_sets() {
        let set = parse_host_capabilities(&["tooltip", " tooltip ", "intersection_observer"])
            .expect("valid list");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&HostCapability::IntersectionObserver));

        let err = parse_host_capabilities(&["tooltip", "geolocation"]).expect_err("invalid list");
        assert!(err.to_string().contains("geolocation"));
    }

    #[test]
    fn exposes_descriptions() {
        assert!(HostCapability::Tooltip.description().contains("tooltips"));
        assert!(HostCapability::IntersectionObserver
            .description()
            .contains("viewport"));
    }
}
