//! Crop input field catalog.
//!
//! # Responsibility
//! - Define the seven soil/climate inputs accepted by the prediction form.
//! - Provide static display names, declared bounds, help text and example values.
//! - Format raw numeric values to each field's display precision.
//!
//! # Invariants
//! - Descriptors are static and never mutated.
//! - Display-name lookup passes unknown names through unchanged.
//! - Declared bounds mirror the server-side acceptance ranges.

use serde::{Deserialize, Serialize};

/// Stable identifier of one prediction-form input.
///
/// The string form doubles as the input's `id` and `name` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl FieldName {
    /// All fields in form order.
    pub const ALL: [FieldName; 7] = [
        Self::Nitrogen,
        Self::Phosphorus,
        Self::Potassium,
        Self::Temperature,
        Self::Humidity,
        Self::Ph,
        Self::Rainfall,
    ];

    /// Attribute-level identifier (`id` / `name`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nitrogen => "nitrogen",
            Self::Phosphorus => "phosphorus",
            Self::Potassium => "potassium",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Ph => "ph",
            Self::Rainfall => "rainfall",
        }
    }

    /// Parses an attribute value. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }

    /// Static descriptor for this field.
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELD_DESCRIPTORS[self as usize]
    }
}

/// Inclusive numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range with no effective limits; used when bound attributes are absent.
    pub const fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Returns whether `value` lies inside the range, bounds included.
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Narrower agronomic sub-range with its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainRange {
    pub range: NumericRange,
    pub message: &'static str,
}

/// Static metadata for one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: FieldName,
    pub display_name: &'static str,
    /// Declared `min`/`max` written into the page markup.
    pub bounds: NumericRange,
    /// Plausibility range checked after the declared bounds pass.
    pub domain_range: Option<DomainRange>,
    /// Hover help shown by the tooltip installer.
    pub help_text: &'static str,
    /// Suggestion values offered by the autocomplete hinter.
    pub examples: &'static [f64],
    /// Decimal places kept by [`format_input_value`].
    pub decimals: u32,
}

static FIELD_DESCRIPTORS: [FieldDescriptor; 7] = [
    FieldDescriptor {
        name: FieldName::Nitrogen,
        display_name: "Nitrogen",
        bounds: NumericRange::new(0.0, 200.0),
        domain_range: None,
        help_text: "Nitrogen content in soil (mg/kg). Essential for leaf growth and chlorophyll production.",
        examples: &[40.0, 60.0, 80.0, 100.0, 120.0],
        decimals: 0,
    },
    FieldDescriptor {
        name: FieldName::Phosphorus,
        display_name: "Phosphorus",
        bounds: NumericRange::new(0.0, 200.0),
        domain_range: None,
        help_text: "Phosphorus content in soil (mg/kg). Important for root development and flowering.",
        examples: &[20.0, 40.0, 60.0, 80.0, 100.0],
        decimals: 0,
    },
    FieldDescriptor {
        name: FieldName::Potassium,
        display_name: "Potassium",
        bounds: NumericRange::new(0.0, 200.0),
        domain_range: None,
        help_text: "Potassium content in soil (mg/kg). Helps with water regulation and disease resistance.",
        examples: &[20.0, 40.0, 60.0, 80.0, 100.0],
        decimals: 0,
    },
    FieldDescriptor {
        name: FieldName::Temperature,
        display_name: "Temperature",
        bounds: NumericRange::new(0.0, 50.0),
        domain_range: Some(DomainRange {
            range: NumericRange::new(10.0, 45.0),
            message: "Temperature should be between 10°C and 45°C for crop cultivation",
        }),
        help_text: "Average temperature in Celsius. Critical for crop growth and development.",
        examples: &[20.0, 25.0, 30.0, 35.0],
        decimals: 1,
    },
    FieldDescriptor {
        name: FieldName::Humidity,
        display_name: "Humidity",
        bounds: NumericRange::new(0.0, 100.0),
        domain_range: Some(DomainRange {
            range: NumericRange::new(20.0, 100.0),
            message: "Humidity should be between 20% and 100%",
        }),
        help_text: "Relative humidity percentage. Affects water uptake and disease susceptibility.",
        examples: &[50.0, 60.0, 70.0, 80.0, 90.0],
        decimals: 1,
    },
    FieldDescriptor {
        name: FieldName::Ph,
        display_name: "pH",
        bounds: NumericRange::new(0.0, 14.0),
        domain_range: Some(DomainRange {
            range: NumericRange::new(4.0, 9.0),
            message: "pH should typically be between 4 and 9 for optimal crop growth",
        }),
        help_text: "Soil pH level (0-14). Determines nutrient availability to plants.",
        examples: &[5.5, 6.0, 6.5, 7.0, 7.5],
        decimals: 1,
    },
    FieldDescriptor {
        name: FieldName::Rainfall,
        display_name: "Rainfall",
        bounds: NumericRange::new(0.0, 500.0),
        domain_range: None,
        help_text: "Annual rainfall in millimeters. Essential for crop water requirements.",
        examples: &[50.0, 100.0, 150.0, 200.0, 250.0],
        decimals: 1,
    },
];

/// Returns the user-facing label for a field attribute name.
///
/// Unknown names are returned unchanged.
pub fn display_name(field_name: &str) -> &str {
    match FieldName::parse(field_name) {
        Some(field) => field.descriptor().display_name,
        None => field_name,
    }
}

/// Rounds `value` to the display precision of `field_name`.
///
/// `ph`, `temperature`, `humidity` and `rainfall` keep one decimal; every
/// other name (nutrients and unknown fields) rounds to an integer. Halves
/// round toward positive infinity.
pub fn format_input_value(field_name: &str, value: f64) -> f64 {
    let decimals = FieldName::parse(field_name)
        .map(|field| field.descriptor().decimals)
        .unwrap_or(0);
    round_half_up(value, decimals)
}

fn round_half_up(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded / factor
}

#[cfg(test)]
mod tests {
    use super::{display_name, format_input_value, FieldName, NumericRange};

    #[test]
    fn display_names_follow_fixed_lookup() {
        assert_eq!(display_name("nitrogen"), "Nitrogen");
        assert_eq!(display_name("ph"), "pH");
        assert_eq!(display_name("rainfall"), "Rainfall");
        assert_eq!(display_name("salinity"), "salinity");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(FieldName::parse("humidity"), Some(FieldName::Humidity));
        assert_eq!(FieldName::parse("Humidity"), None);
    }

    #[test]
    fn descriptors_are_indexed_by_variant() {
        for field in FieldName::ALL {
            assert_eq!(field.descriptor().name, field);
            assert!((4..=5).contains(&field.descriptor().examples.len()));
        }
    }

    #[test]
    fn nutrients_round_to_integers() {
        assert_eq!(format_input_value("nitrogen", 83.7), 84.0);
        assert_eq!(format_input_value("potassium", 83.2), 83.0);
        assert_eq!(format_input_value("unknown", 2.5), 3.0);
    }

    #[test]
    fn climate_fields_keep_one_decimal() {
        assert_eq!(format_input_value("ph", 6.55), 6.6);
        assert_eq!(format_input_value("temperature", 21.04), 21.0);
        assert_eq!(format_input_value("rainfall", 120.25), 120.3);
    }

    #[test]
    fn halves_round_toward_positive_infinity() {
        assert_eq!(format_input_value("nitrogen", -2.5), -2.0);
        assert_eq!(format_input_value("nitrogen", 2.5), 3.0);
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = NumericRange::new(4.0, 9.0);
        assert!(range.contains(4.0));
        assert!(range.contains(9.0));
        assert!(!range.contains(9.1));
        assert!(NumericRange::unbounded().contains(1e300));
    }
}
