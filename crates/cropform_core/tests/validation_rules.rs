use cropform_core::{check_value, display_name, format_input_value, validate_value, NumericRange, ValidationIssue};

fn declared(field: &str) -> NumericRange {
    cropform_core::FieldName::parse(field)
        .expect("known field")
        .descriptor()
        .bounds
}

#[test]
fn rules_apply_in_order_and_first_failure_wins() {
    let bounds = declared("ph");
    assert_eq!(
        validate_value("", bounds, "ph").message.as_deref(),
        Some("pH is required")
    );
    assert_eq!(
        validate_value("acid", bounds, "ph").message.as_deref(),
        Some("Please enter a valid number")
    );
    assert_eq!(
        validate_value("15", bounds, "ph").message.as_deref(),
        Some("pH must be between 0 and 14")
    );
    assert_eq!(
        validate_value("3.5", bounds, "ph").message.as_deref(),
        Some("pH should typically be between 4 and 9 for optimal crop growth")
    );
    assert!(validate_value("6.5", bounds, "ph").is_valid);
}

#[test]
fn domain_bounds_are_inclusive() {
    let temperature = declared("temperature");
    assert!(validate_value("10", temperature, "temperature").is_valid);
    assert!(validate_value("45", temperature, "temperature").is_valid);
    assert!(!validate_value("45.1", temperature, "temperature").is_valid);

    let humidity = declared("humidity");
    assert!(validate_value("20", humidity, "humidity").is_valid);
    assert!(validate_value("100", humidity, "humidity").is_valid);
    assert!(!validate_value("19.9", humidity, "humidity").is_valid);
}

#[test]
fn fields_without_domain_rules_only_check_bounds() {
    let bounds = NumericRange::new(0.0, 500.0);
    assert!(validate_value("0", bounds, "rainfall").is_valid);
    assert!(validate_value("500", bounds, "rainfall").is_valid);
    assert!(validate_value("1", bounds, "nitrogen").is_valid);
}

#[test]
fn lenient_parsing_accepts_numeric_prefixes() {
    let bounds = NumericRange::new(0.0, 200.0);
    assert_eq!(check_value("  12kg", bounds, "nitrogen"), Ok(12.0));
    assert_eq!(check_value(".5", bounds, "nitrogen"), Ok(0.5));
    assert_eq!(check_value("1e2", bounds, "nitrogen"), Ok(100.0));
    assert_eq!(
        check_value("kg12", bounds, "nitrogen"),
        Err(ValidationIssue::NotANumber)
    );
}

#[test]
fn unknown_field_names_pass_through() {
    assert_eq!(display_name("wind"), "wind");
    assert_eq!(display_name("ph"), "pH");
    let verdict = validate_value(" ", NumericRange::new(0.0, 1.0), "wind");
    assert_eq!(verdict.message.as_deref(), Some("wind is required"));
}

#[test]
fn formatter_rounds_half_up_to_field_precision() {
    assert_eq!(format_input_value("nitrogen", 83.7), 84.0);
    assert_eq!(format_input_value("ph", 6.55), 6.6);
    assert_eq!(format_input_value("potassium", -2.5), -2.0);
    assert_eq!(format_input_value("rainfall", 202.94), 202.9);
    assert_eq!(format_input_value("humidity", 81.25), 81.3);
    assert_eq!(format_input_value("wind", 2.5), 3.0);
}
