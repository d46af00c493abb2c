//! Optional host collaborators.
//!
//! A host page declares which environment features it provides; components
//! consult the declared set and degrade to no-ops when a feature is absent.

pub mod capability;
pub mod tooltip;
