//! Field validation rules.
//!
//! This module is pure: it maps raw text to a verdict. Applying validity
//! classes and feedback nodes is the form controller's job.

pub mod validator;
