//! FFI API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the page behavior surface to Dart via FRB as sync calls.
//! - Keep one headless prediction page per process as the session.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures map to empty strings, `false` or an error message.

use cropform_core::{
    build_prediction_page, core_version as core_version_inner, format_input_value as format_inner,
    init_logging as init_logging_inner, validate_value, Document, DomResult, FieldName, MemoryDocument,
    NotificationCategory, NumericRange, Page, PageConfig, ValidationResult,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

static SESSION_PAGE: OnceLock<Mutex<Page<MemoryDocument>>> = OnceLock::new();

/// Verdict returned by [`validate_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    /// User-facing message; empty when valid.
    pub message: String,
}

/// Version of the linked `cropform_core`.
///
/// # FFI contract
/// - Sync call, non-blocking; never fails.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Starts rolling file logs for the host process.
///
/// `level` is `trace|debug|info|warn|error` in any case; `log_dir` must be
/// absolute.
///
/// # FFI contract
/// - Sync call; creates `log_dir` when missing.
/// - Repeating the same `level` and `log_dir` is a no-op.
/// - Returns an empty string on success, the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Types `value` into the session page's `field_name` input and validates it.
///
/// Unknown field names are checked without bounds or domain rules.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Updates the session page's validity classes and feedback.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_input(field_name: String, value: String) -> FieldValidation {
    let input = FieldName::parse(field_name.as_str())
        .and_then(|_| with_session(|page| page.document().element_by_id(&field_name)));
    let Some(input) = input else {
        return validate_value(&value, NumericRange::unbounded(), &field_name).into();
    };

    let verdict = with_session(|page| -> DomResult<ValidationResult> {
        page.fill(input, &value)?;
        page.validate_input(input)
    });
    match verdict {
        Ok(result) => result.into(),
        Err(err) => {
            warn!("event=ffi_validate module=ffi status=error error={err}");
            FieldValidation {
                is_valid: false,
                message: err.to_string(),
            }
        }
    }
}

/// Rounds `value` to the display precision of `field_name`.
#[flutter_rust_bridge::frb(sync)]
pub fn format_input_value(field_name: String, value: f64) -> f64 {
    format_inner(field_name.as_str(), value)
}

/// Shows a notification banner on the session page.
///
/// `category` is `success|error|warning|info`; anything else is `info`.
/// Returns the banner id, or an empty string on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn show_notification(message: String, category: String) -> String {
    let category = NotificationCategory::parse(category.as_str());
    match with_session(|page| page.notify(message.as_str(), category)) {
        Ok(handle) => handle.id.to_string(),
        Err(err) => {
            warn!("event=ffi_notify module=ffi status=error error={err}");
            String::new()
        }
    }
}

/// Removes the banner with `notification_id`. Returns whether one was removed.
#[flutter_rust_bridge::frb(sync)]
pub fn dismiss_notification(notification_id: String) -> bool {
    let Ok(id) = Uuid::parse_str(notification_id.trim()) else {
        return false;
    };
    with_session(|page| page.dismiss_notification(id)).unwrap_or(false)
}

/// Submits the session page's prediction form.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Returns `true` when every field passed and the loading overlay is shown;
///   `false` when the submit was cancelled or the page has no form.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_session_form() -> bool {
    with_session(|page| {
        let lookup = {
            let doc = page.document();
            doc.query_selector(doc.root(), &page.ui().config().form_selector)
        };
        match lookup {
            Ok(Some(form)) => !page.submit(form).default_prevented,
            Ok(None) => false,
            Err(err) => {
                warn!("event=ffi_submit module=ffi status=error error={err}");
                false
            }
        }
    })
}

/// Removes the loading overlay shown by [`submit_session_form`]. Returns
/// whether one was present.
#[flutter_rust_bridge::frb(sync)]
pub fn hide_loading_overlay() -> bool {
    with_session(|page| page.hide_loading_overlay()).unwrap_or(false)
}

/// Advances the session clock. Returns the number of timers that ran.
#[flutter_rust_bridge::frb(sync)]
pub fn advance_clock(elapsed_ms: u64) -> u32 {
    let ran = with_session(|page| page.advance_time(elapsed_ms));
    u32::try_from(ran).unwrap_or(u32::MAX)
}

/// Serialized HTML of the session page.
#[flutter_rust_bridge::frb(sync)]
pub fn session_snapshot_html() -> String {
    with_session(|page| page.document().document_html())
}

impl From<ValidationResult> for FieldValidation {
    fn from(value: ValidationResult) -> Self {
        Self {
            is_valid: value.is_valid,
            message: value.message.unwrap_or_default(),
        }
    }
}

fn with_session<T>(f: impl FnOnce(&mut Page<MemoryDocument>) -> T) -> T {
    let mut guard = lock_session(SESSION_PAGE.get_or_init(|| Mutex::new(new_session_page())));
    f(&mut guard)
}

fn lock_session(session: &Mutex<Page<MemoryDocument>>) -> MutexGuard<'_, Page<MemoryDocument>> {
    match session.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn new_session_page() -> Page<MemoryDocument> {
    let mut document = MemoryDocument::new();
    if let Err(err) = build_prediction_page(&mut document) {
        warn!("event=ffi_session_init module=ffi status=error error={err}");
    }
    let mut page = Page::new(document, PageConfig::default());
    page.initialize();
    page
}

#[cfg(test)]
mod tests {
    use super::{
        advance_clock, core_version, dismiss_notification, format_input_value, hide_loading_overlay,
        init_logging, session_snapshot_html, show_notification, submit_session_form, validate_input,
    };
    use std::sync::{Mutex, MutexGuard};

    // Serializes tests that edit the shared session form.
    static FORM_LOCK: Mutex<()> = Mutex::new(());

    fn form_lock() -> MutexGuard<'static, ()> {
        FORM_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/cropform-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn validate_input_reports_domain_message() {
        let _guard = form_lock();
        let verdict = validate_input("ph".to_string(), "3".to_string());
        assert!(!verdict.is_valid);
        assert_eq!(
            verdict.message,
            "pH should typically be between 4 and 9 for optimal crop growth"
        );

        let verdict = validate_input("rainfall".to_string(), "120.5".to_string());
        assert!(verdict.is_valid, "{}", verdict.message);
        assert!(verdict.message.is_empty());
    }

    #[test]
    fn validate_input_for_unknown_field_checks_number_only() {
        let verdict = validate_input("wind".to_string(), "abc".to_string());
        assert_eq!(verdict.message, "Please enter a valid number");
        assert!(validate_input("wind".to_string(), "9000".to_string()).is_valid);
    }

    #[test]
    fn format_input_value_uses_field_precision() {
        assert_eq!(format_input_value("nitrogen".to_string(), 83.7), 84.0);
        assert_eq!(format_input_value("ph".to_string(), 6.55), 6.6);
    }

    #[test]
    fn notification_can_be_dismissed_by_id() {
        let id = show_notification("Saved".to_string(), "success".to_string());
        assert!(!id.is_empty());
        assert!(session_snapshot_html().contains(id.as_str()));
        assert!(dismiss_notification(id.clone()));
        assert!(!dismiss_notification(id));
        assert!(!dismiss_notification("not-a-uuid".to_string()));
    }

    #[test]
    fn clock_and_overlay_calls_never_fail() {
        let _guard = form_lock();
        let _ = advance_clock(10);
        let _ = hide_loading_overlay();
        assert!(session_snapshot_html().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn submit_shows_overlay_only_for_valid_form() {
        let _guard = form_lock();
        validate_input("ph".to_string(), String::new());
        assert!(!submit_session_form());
        assert!(!hide_loading_overlay());

        for (field, value) in [
            ("nitrogen", "90"),
            ("phosphorus", "42"),
            ("potassium", "43"),
            ("temperature", "20.8"),
            ("humidity", "82"),
            ("ph", "6.5"),
            ("rainfall", "202.9"),
        ] {
            let verdict = validate_input(field.to_string(), value.to_string());
            assert!(verdict.is_valid, "{field}: {}", verdict.message);
        }
        assert!(submit_session_form());
        assert!(session_snapshot_html().contains("id=\"loading-overlay\""));
        assert!(hide_loading_overlay());
    }
}
