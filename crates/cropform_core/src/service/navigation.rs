//! Same-page anchor scrolling and scroll-dependent navbar treatment.
//!
//! # Invariants
//! - Same-page anchor clicks never trigger native navigation, even when the
//!   target cannot be resolved.
//! - The navbar treatment is recomputed on every scroll event.

use crate::dom::{Document, DomResult, NodeId, ScrollIntoView};
use crate::event::{DomEvent, EventKind, EventOutcome, EventTarget, ListenerRegistry};
use crate::page::UiContext;
use log::{debug, warn};

pub const SAME_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Navbar appearance for a given scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarTreatment {
    /// Page scrolled past the threshold.
    Solid,
    /// Near the top of the page.
    Translucent,
}

impl NavbarTreatment {
    /// Solid strictly above `solid_after_px`.
    pub fn for_offset(scroll_y: f64, solid_after_px: f64) -> Self {
        if scroll_y > solid_after_px {
            Self::Solid
        } else {
            Self::Translucent
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Solid => "rgba(255, 255, 255, 0.95)",
            Self::Translucent => "rgba(255, 255, 255, 0.1)",
        }
    }

    pub fn backdrop_filter(self) -> &'static str {
        match self {
            Self::Solid => "blur(20px)",
            Self::Translucent => "blur(10px)",
        }
    }
}

/// Counts reported by [`install`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInstallReport {
    pub anchors: usize,
    pub navbar: bool,
}

/// Registers anchor click handlers and, when a navbar exists, the window
/// scroll handler.
pub fn install<D: Document + 'static>(
    ui: &UiContext<D>,
    listeners: &mut ListenerRegistry<D>,
) -> DomResult<NavigationInstallReport> {
    let doc = ui.document();
    let anchors = doc.query_selector_all(doc.root(), SAME_PAGE_ANCHOR_SELECTOR)?;
    for anchor in &anchors {
        let anchor = *anchor;
        listeners.add(EventTarget::Node(anchor), EventKind::Click, move |ui, _| {
            if let Err(err) = scroll_to_anchor_target(ui.document_mut(), anchor) {
                warn!("event=anchor_scroll module=navigation status=error error={err}");
            }
            EventOutcome::prevent_default()
        });
    }

    let navbar = doc.query_selector(doc.root(), &ui.config().navbar.selector)?;
    if let Some(navbar) = navbar {
        listeners.add(EventTarget::Window, EventKind::Scroll, move |ui, event| {
            let DomEvent::Scroll { scroll_y } = event else {
                return EventOutcome::proceed();
            };
            let treatment = NavbarTreatment::for_offset(*scroll_y, ui.config().navbar.solid_after_px);
            if let Err(err) = apply_navbar_treatment(ui.document_mut(), navbar, treatment) {
                warn!("event=navbar_scroll module=navigation status=error error={err}");
            }
            EventOutcome::proceed()
        });
    }

    let report = NavigationInstallReport {
        anchors: anchors.len(),
        navbar: navbar.is_some(),
    };
    debug!(
        "event=navigation_install module=navigation status=ok anchors={} navbar={}",
        report.anchors, report.navbar
    );
    Ok(report)
}

/// Smooth-scrolls to the element the anchor's `href` selects.
///
/// Returns the scrolled target. Unparsable or unmatched hrefs yield
/// `Ok(None)`.
pub fn scroll_to_anchor_target<D: Document>(doc: &mut D, anchor: NodeId) -> DomResult<Option<NodeId>> {
    let Some(href) = doc.attribute(anchor, "href") else {
        return Ok(None);
    };
    let target = match doc.query_selector(doc.root(), &href) {
        Ok(Some(target)) => target,
        Ok(None) => return Ok(None),
        Err(_) => {
            debug!("event=anchor_scroll module=navigation status=skipped reason=unparsable_href");
            return Ok(None);
        }
    };
    doc.scroll_into_view(target, ScrollIntoView::smooth_start())?;
    Ok(Some(target))
}

/// Writes the treatment's inline `background` and `backdrop-filter`.
pub fn apply_navbar_treatment<D: Document>(
    doc: &mut D,
    navbar: NodeId,
    treatment: NavbarTreatment,
) -> DomResult<()> {
    doc.set_style_property(navbar, "background", treatment.background())?;
    doc.set_style_property(navbar, "backdrop-filter", treatment.backdrop_filter())
}

#[cfg(test)]
mod tests {
    use super::{scroll_to_anchor_target, NavbarTreatment};
    use crate::dom::{Document, MemoryDocument, ScrollIntoView};

    #[test]
    fn threshold_is_strictly_greater_than() {
        assert_eq!(NavbarTreatment::for_offset(50.0, 50.0), NavbarTreatment::Translucent);
        assert_eq!(NavbarTreatment::for_offset(51.0, 50.0), NavbarTreatment::Solid);
        assert_eq!(NavbarTreatment::for_offset(0.0, 50.0), NavbarTreatment::Translucent);
    }

    #[test]
    fn anchor_scrolls_to_matching_section() {
        let mut doc = MemoryDocument::new();
        let section = doc.create_element("section");
        doc.set_attribute(section, "id", "predict").expect("id");
        let anchor = doc.create_element("a");
        doc.set_attribute(anchor, "href", "#predict").expect("href");
        doc.append_child(doc.body(), section).expect("append");
        doc.append_child(doc.body(), anchor).expect("append");

        let target = scroll_to_anchor_target(&mut doc, anchor).expect("scroll");
        assert_eq!(target, Some(section));
        assert_eq!(
            doc.scroll_requests(),
            &[(section, ScrollIntoView::smooth_start())]
        );
    }

    #[test]
    fn bare_hash_and_missing_targets_are_ignored() {
        let mut doc = MemoryDocument::new();
        let bare = doc.create_element("a");
        doc.set_attribute(bare, "href", "#").expect("href");
        let dangling = doc.create_element("a");
        doc.set_attribute(dangling, "href", "#nowhere").expect("href");

        assert_eq!(scroll_to_anchor_target(&mut doc, bare).expect("bare"), None);
        assert_eq!(scroll_to_anchor_target(&mut doc, dangling).expect("dangling"), None);
        assert!(doc.scroll_requests().is_empty());
    }
}
