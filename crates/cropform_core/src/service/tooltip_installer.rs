//! Help-text annotations on the prediction inputs.

use crate::dom::{Document, DomResult};
use crate::extension::capability::HostCapability;
use crate::model::field::FieldName;
use crate::page::UiContext;
use log::debug;

pub const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";

/// Counts reported by [`install`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TooltipInstallReport {
    /// Known fields found and annotated.
    pub annotated: usize,
    /// Elements handed to the tooltip activator.
    pub activated: usize,
}

/// Annotates every known field present by id, then activates tooltips when
/// the host declares the capability.
///
/// Activation covers every `[data-bs-toggle="tooltip"]` element, including
/// ones the page markup annotated itself.
pub fn install<D: Document>(ui: &mut UiContext<D>) -> DomResult<TooltipInstallReport> {
    let mut report = TooltipInstallReport::default();
    for field in FieldName::ALL {
        let doc = ui.document_mut();
        let Some(input) = doc.element_by_id(field.as_str()) else {
            continue;
        };
        doc.set_attribute(input, "title", field.descriptor().help_text)?;
        doc.set_attribute(input, "data-bs-toggle", "tooltip")?;
        doc.set_attribute(input, "data-bs-placement", "top")?;
        report.annotated += 1;
    }

    if ui.has_capability(HostCapability::Tooltip) {
        let triggers = {
            let doc = ui.document();
            doc.query_selector_all(doc.root(), TOOLTIP_SELECTOR)?
                .into_iter()
                .map(|node| (node, doc.attribute(node, "title").unwrap_or_default()))
                .collect::<Vec<_>>()
        };
        let activator = ui.tooltip_activator_mut();
        for (node, title) in &triggers {
            activator.activate(*node, title);
        }
        report.activated = triggers.len();
    }

    debug!(
        "event=tooltip_install module=tooltip status=ok annotated={} activated={}",
        report.annotated, report.activated
    );
    Ok(report)
}
