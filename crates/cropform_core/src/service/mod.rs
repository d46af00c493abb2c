//! Page behavior services.
//!
//! # Responsibility
//! - Install one behavior each onto a page (listeners, annotations, styles).
//! - Expose the imperative operations hosts call directly (notify, overlay).
//!
//! # Invariants
//! - Services share state only through the `UiContext` they are handed.
//! - Absent optional elements are skipped without error.

pub mod autocomplete;
pub mod form_controller;
pub mod loading_overlay;
pub mod navigation;
pub mod notification_service;
pub mod scroll_reveal;
pub mod tooltip_installer;
