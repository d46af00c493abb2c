//! Reveal-on-scroll animation for feature cards and parameter groups.
//!
//! # Responsibility
//! - Inject the hidden/revealed style rules once per document.
//! - Mark observed elements `animate-in` the first time they intersect.
//! - Translate element geometry into intersection entries for hosts that
//!   cannot observe intersections themselves.
//!
//! # Invariants
//! - The style element with id [`REVEAL_STYLE_ID`] exists at most once.
//! - Each element is revealed at most once and then stops being observed.
//!
//! Observation is opt-in: a page built with [`crate::Page::new`] declares no
//! host capabilities, so its targets are revealed at install. Hosts that report
//! intersections declare [`HostCapability::IntersectionObserver`] through
//! `Page::with_capabilities`.

use crate::config::RevealConfig;
use crate::dom::{Document, DomResult, NodeId};
use crate::event::{DomEvent, EventKind, EventOutcome, EventTarget, IntersectionEntry, ListenerRegistry};
use crate::extension::capability::HostCapability;
use crate::page::UiContext;
use log::{debug, warn};

pub const REVEALED_CLASS: &str = "animate-in";
pub const REVEAL_STYLE_ID: &str = "dynamic-animations";

/// Viewport-relative vertical box of one element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

/// Injects styles and starts observing every reveal target.
///
/// Without the intersection-observer capability every target is revealed
/// immediately. Returns the number of targets found.
pub fn install<D: Document + 'static>(
    ui: &mut UiContext<D>,
    listeners: &mut ListenerRegistry<D>,
) -> DomResult<usize> {
    inject_reveal_styles(ui)?;

    let selector_list = ui.config().reveal_selector_list();
    let targets = {
        let doc = ui.document();
        doc.query_selector_all(doc.root(), &selector_list)?
    };

    if !ui.has_capability(HostCapability::IntersectionObserver) {
        for target in &targets {
            ui.document_mut().add_class(*target, REVEALED_CLASS)?;
        }
        debug!(
            "event=reveal_install module=reveal status=ok mode=immediate targets={}",
            targets.len()
        );
        return Ok(targets.len());
    }

    ui.reveal_targets_mut().extend(targets.iter().copied());
    listeners.add(EventTarget::Window, EventKind::Intersection, |ui, event| {
        if let DomEvent::Intersection { entries } = event {
            if let Err(err) = handle_intersections(ui, entries) {
                warn!("event=reveal_intersection module=reveal status=error error={err}");
            }
        }
        EventOutcome::proceed()
    });
    debug!(
        "event=reveal_install module=reveal status=ok mode=observed targets={}",
        targets.len()
    );
    Ok(targets.len())
}

/// Appends the reveal stylesheet to `<head>` unless already present.
///
/// Returns whether a style element was created.
pub fn inject_reveal_styles<D: Document>(ui: &mut UiContext<D>) -> DomResult<bool> {
    let css = reveal_stylesheet(&ui.config().reveal.selectors);
    let doc = ui.document_mut();
    if doc.element_by_id(REVEAL_STYLE_ID).is_some() {
        return Ok(false);
    }
    let style = doc.create_element("style");
    doc.set_attribute(style, "id", REVEAL_STYLE_ID)?;
    doc.set_text_content(style, &css)?;
    let head = doc.head();
    doc.append_child(head, style)?;
    Ok(true)
}

/// Style rules hiding `selectors` until they carry [`REVEALED_CLASS`].
pub fn reveal_stylesheet(selectors: &[String]) -> String {
    let hidden = selectors.join(", ");
    let revealed = selectors
        .iter()
        .map(|selector| format!("{selector}.{REVEALED_CLASS}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{hidden} {{\n    opacity: 0;\n    transform: translateY(30px);\n    transition: all 0.6s ease-out;\n}}\n\
         {revealed} {{\n    opacity: 1;\n    transform: translateY(0);\n}}\n"
    )
}

/// Reveals every observed target reported as intersecting.
///
/// Returns the number of newly revealed elements.
pub fn handle_intersections<D: Document>(
    ui: &mut UiContext<D>,
    entries: &[IntersectionEntry],
) -> DomResult<usize> {
    let mut revealed = 0;
    for entry in entries.iter().filter(|entry| entry.is_intersecting) {
        if !ui.reveal_targets_mut().remove(&entry.target) {
            continue;
        }
        ui.document_mut().add_class(entry.target, REVEALED_CLASS)?;
        revealed += 1;
    }
    Ok(revealed)
}

/// Computes the intersection entry of `element` against a viewport of
/// `viewport_height` whose bottom is shrunk by the configured margin.
pub fn intersection_entry(
    target: NodeId,
    element: ElementBox,
    viewport_height: f64,
    config: &RevealConfig,
) -> IntersectionEntry {
    let root_bottom = viewport_height - config.root_margin_bottom_px;
    let element_bottom = element.top + element.height;
    let visible = (element_bottom.min(root_bottom) - element.top.max(0.0)).max(0.0);

    let intersection_ratio = if element.height > 0.0 {
        (visible / element.height).clamp(0.0, 1.0)
    } else if element.top >= 0.0 && element.top <= root_bottom {
        1.0
    } else {
        0.0
    };

    IntersectionEntry {
        target,
        intersection_ratio,
        is_intersecting: intersection_ratio > 0.0 && intersection_ratio >= config.threshold,
    }
}
