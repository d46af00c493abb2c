//! Full-page loading overlay shown while a submission is in flight.
//!
//! # Invariants
//! - At most one element with id [`LOADING_OVERLAY_ID`] exists.
//! - Showing while present returns the existing overlay unchanged.

use crate::dom::{Document, DomResult, NodeId};
use crate::page::UiContext;
use log::debug;

pub const LOADING_OVERLAY_ID: &str = "loading-overlay";

const OVERLAY_STYLE: [(&str, &str); 10] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background", "rgba(255, 255, 255, 0.9)"),
    ("display", "flex"),
    ("justify-content", "center"),
    ("align-items", "center"),
    ("z-index", "9999"),
];

/// Appends the overlay to the body, or returns the one already present.
pub fn show_loading_overlay<D: Document>(ui: &mut UiContext<D>) -> DomResult<NodeId> {
    let doc = ui.document_mut();
    if let Some(existing) = doc.element_by_id(LOADING_OVERLAY_ID) {
        debug!("event=overlay_show module=overlay status=skipped reason=already_present");
        return Ok(existing);
    }

    let overlay = doc.create_element("div");
    doc.set_attribute(overlay, "id", LOADING_OVERLAY_ID)?;
    for (property, value) in OVERLAY_STYLE {
        doc.set_style_property(overlay, property, value)?;
    }
    doc.set_style_property(overlay, "backdrop-filter", "blur(5px)")?;

    let content = doc.create_element("div");
    doc.set_attribute(content, "class", "loading-content")?;
    doc.append_child(overlay, content)?;

    let spinner = doc.create_element("div");
    doc.set_attribute(spinner, "class", "spinner-border text-primary")?;
    doc.set_attribute(spinner, "role", "status")?;
    doc.append_child(content, spinner)?;

    let hidden_label = doc.create_element("span");
    doc.set_attribute(hidden_label, "class", "visually-hidden")?;
    doc.set_text_content(hidden_label, "Loading...")?;
    doc.append_child(spinner, hidden_label)?;

    let caption = doc.create_element("p");
    doc.set_attribute(caption, "class", "mt-3 text-primary fw-bold")?;
    doc.set_text_content(caption, "Analyzing your data...")?;
    doc.append_child(content, caption)?;

    let body = doc.body();
    doc.append_child(body, overlay)?;
    debug!("event=overlay_show module=overlay status=ok");
    Ok(overlay)
}

/// Removes the overlay if present. Returns whether one was removed.
pub fn hide_loading_overlay<D: Document>(ui: &mut UiContext<D>) -> DomResult<bool> {
    let doc = ui.document_mut();
    let Some(overlay) = doc.element_by_id(LOADING_OVERLAY_ID) else {
        return Ok(false);
    };
    let removed = doc.remove(overlay)?;
    debug!("event=overlay_hide module=overlay status=ok");
    Ok(removed)
}
