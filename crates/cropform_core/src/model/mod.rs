//! Static domain model for the prediction page.
//!
//! # Responsibility
//! - Describe the seven crop input fields and their presentation metadata.
//! - Describe notification categories and their banner styling.
//!
//! # Invariants
//! - Model values are static or ephemeral; nothing here owns page state.

pub mod field;
pub mod notification;
