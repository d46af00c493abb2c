//! Prediction form wiring: live validation, submit enablement, submission.
//!
//! # Responsibility
//! - Validate required inputs on `input`/`blur` and mirror the verdict in
//!   validity classes and feedback nodes.
//! - Keep the submit button enabled only while every required field is
//!   filled and not marked invalid, from install onward.
//! - Gate submission: cancel and notify on failure, show loading state on
//!   success.
//!
//! # Invariants
//! - At most one `.invalid-feedback` node sits under an input's parent after
//!   validation.
//! - A field carries exactly one of `is-valid` / `is-invalid` after validation.
//! - Field values are never logged.

use crate::dom::{Document, DomResult, NodeId};
use crate::event::{DomEvent, EventKind, EventOutcome, EventTarget, ListenerRegistry};
use crate::model::field::NumericRange;
use crate::model::notification::NotificationCategory;
use crate::page::UiContext;
use crate::service::{loading_overlay, notification_service};
use crate::validation::validator::{parse_number, validate_value, ValidationResult};
use log::{debug, info, warn};

pub const VALID_CLASS: &str = "is-valid";
pub const INVALID_CLASS: &str = "is-invalid";
pub const FEEDBACK_CLASS: &str = "invalid-feedback";
pub const REQUIRED_INPUT_SELECTOR: &str = "input[required]";
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
pub const CORRECTION_MESSAGE: &str = "Please correct the highlighted fields";
pub const PROCESSING_LABEL: &str = "Processing...";

/// Outcome of one submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitVerdict {
    /// Every field passed; native submission proceeds.
    Accepted,
    /// At least one field failed; submission was cancelled.
    Rejected { invalid_fields: usize },
}

/// Handles located for one prediction form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    pub form: NodeId,
    pub inputs: Vec<NodeId>,
    /// `None` disables only the enablement and loading-label logic.
    pub submit_button: Option<NodeId>,
}

impl FormController {
    /// Finds the form matching `PageConfig::form_selector`.
    ///
    /// Returns `Ok(None)` when the page has no such form.
    pub fn locate<D: Document>(ui: &UiContext<D>) -> DomResult<Option<Self>> {
        let doc = ui.document();
        let Some(form) = doc.query_selector(doc.root(), &ui.config().form_selector)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            form,
            inputs: doc.query_selector_all(form, REQUIRED_INPUT_SELECTOR)?,
            submit_button: doc.query_selector(form, SUBMIT_BUTTON_SELECTOR)?,
        }))
    }

    /// Locates the form, sets the initial submit state and registers the
    /// form's listeners.
    ///
    /// Returns whether a form was found.
    pub fn install<D: Document + 'static>(
        ui: &mut UiContext<D>,
        listeners: &mut ListenerRegistry<D>,
    ) -> DomResult<bool> {
        let Some(controller) = Self::locate(ui)? else {
            debug!("event=form_install module=form status=skipped reason=no_form");
            return Ok(false);
        };
        controller.refresh_submit_button(ui.document_mut())?;

        for input in &controller.inputs {
            let input = *input;
            let on_input = controller.clone();
            listeners.add(EventTarget::Node(input), EventKind::Input, move |ui, _| {
                if let Err(err) = on_input.revalidate(ui.document_mut(), input) {
                    warn!("event=form_input module=form status=error error={err}");
                }
                EventOutcome::proceed()
            });
            let on_blur = controller.clone();
            listeners.add(EventTarget::Node(input), EventKind::Blur, move |ui, _| {
                if let Err(err) = on_blur.revalidate(ui.document_mut(), input) {
                    warn!("event=form_blur module=form status=error error={err}");
                }
                EventOutcome::proceed()
            });
        }

        let form = controller.form;
        let field_count = controller.inputs.len();
        listeners.add(EventTarget::Node(form), EventKind::Submit, move |ui, event| {
            if event.target() != Some(controller.form) {
                return EventOutcome::proceed();
            }
            match controller.handle_submit(ui) {
                Ok(SubmitVerdict::Accepted) => EventOutcome::proceed(),
                Ok(SubmitVerdict::Rejected { .. }) => EventOutcome::prevent_default(),
                Err(err) => {
                    warn!("event=form_submit module=form status=error error={err}");
                    EventOutcome::proceed()
                }
            }
        });

        info!("event=form_install module=form status=ok fields={field_count}");
        Ok(true)
    }

    /// Re-validates every required field, applying visual state to each.
    ///
    /// Returns the number of invalid fields.
    pub fn validate_all<D: Document>(&self, doc: &mut D) -> DomResult<usize> {
        let mut invalid = 0;
        for input in &self.inputs {
            if !validate_input(doc, *input)?.is_valid {
                invalid += 1;
            }
        }
        Ok(invalid)
    }

    /// Validates one field, then recomputes the submit button.
    fn revalidate<D: Document>(&self, doc: &mut D, input: NodeId) -> DomResult<()> {
        validate_input(doc, input)?;
        self.refresh_submit_button(doc)
    }

    /// Whether `input` currently counts toward enabling submission.
    pub fn field_ready<D: Document>(doc: &D, input: NodeId) -> bool {
        !doc.value(input).trim().is_empty() && !doc.has_class(input, INVALID_CLASS)
    }

    /// Enables the submit button iff every required field is ready.
    pub fn refresh_submit_button<D: Document>(&self, doc: &mut D) -> DomResult<()> {
        let Some(button) = self.submit_button else {
            return Ok(());
        };
        let ready = self
            .inputs
            .iter()
            .all(|input| Self::field_ready(doc, *input));
        doc.set_disabled(button, !ready)
    }

    /// Runs the submit gate.
    ///
    /// # Contract
    /// - Rejected: error notification, caller cancels the native submit.
    /// - Accepted: submit button disabled and relabelled, overlay shown.
    pub fn handle_submit<D: Document>(&self, ui: &mut UiContext<D>) -> DomResult<SubmitVerdict> {
        let invalid_fields = self.validate_all(ui.document_mut())?;
        if invalid_fields > 0 {
            notification_service::notify(ui, CORRECTION_MESSAGE, NotificationCategory::Error)?;
            info!("event=form_submit module=form status=rejected invalid_fields={invalid_fields}");
            return Ok(SubmitVerdict::Rejected { invalid_fields });
        }

        if let Some(button) = self.submit_button {
            let doc = ui.document_mut();
            doc.set_disabled(button, true)?;
            doc.clear_children(button)?;
            let spinner = doc.create_element("i");
            doc.set_attribute(spinner, "class", "fas fa-spinner fa-spin me-2")?;
            doc.append_child(button, spinner)?;
            let label = doc.create_text(PROCESSING_LABEL);
            doc.append_child(button, label)?;
        }
        loading_overlay::show_loading_overlay(ui)?;
        info!("event=form_submit module=form status=ok");
        Ok(SubmitVerdict::Accepted)
    }
}

/// Validates one input against its live `min`/`max`/`name` attributes and
/// applies the verdict to the document.
///
/// # Contract
/// - Clears `is-valid`/`is-invalid` and the first `.invalid-feedback` under
///   the input's parent before applying the new state.
/// - Invalid: adds `is-invalid` and appends `div.invalid-feedback` with the
///   message to the input's parent.
/// - Valid: adds `is-valid`.
/// - Missing `min`/`max` attributes leave that side unbounded.
pub fn validate_input<D: Document>(doc: &mut D, input: NodeId) -> DomResult<ValidationResult> {
    let raw = doc.value(input);
    let bounds = declared_bounds(doc, input);
    let field_name = doc.attribute(input, "name").unwrap_or_default();
    let result = validate_value(&raw, bounds, &field_name);

    doc.remove_class(input, VALID_CLASS)?;
    doc.remove_class(input, INVALID_CLASS)?;
    let parent = doc.parent(input);
    if let Some(parent) = parent {
        if let Some(existing) = doc.query_selector(parent, &format!(".{FEEDBACK_CLASS}"))? {
            doc.remove(existing)?;
        }
    }

    match result.message.as_deref() {
        Some(message) if !result.is_valid => {
            doc.add_class(input, INVALID_CLASS)?;
            if let Some(parent) = parent {
                let feedback = doc.create_element("div");
                doc.set_attribute(feedback, "class", FEEDBACK_CLASS)?;
                doc.set_text_content(feedback, message)?;
                doc.append_child(parent, feedback)?;
            }
        }
        _ => doc.add_class(input, VALID_CLASS)?,
    }
    Ok(result)
}

fn declared_bounds<D: Document>(doc: &D, input: NodeId) -> NumericRange {
    let read = |name: &str| doc.attribute(input, name).as_deref().and_then(parse_number);
    let unbounded = NumericRange::unbounded();
    NumericRange::new(
        read("min").unwrap_or(unbounded.min),
        read("max").unwrap_or(unbounded.max),
    )
}
