//! Page-level state and lifecycle.
//!
//! # Responsibility
//! - Own everything a page's behaviors share ([`UiContext`]).
//! - Install behaviors on page-ready and route host events ([`Page`]).
//! - Build the canonical prediction page markup ([`build_prediction_page`]).

pub mod context;
pub mod markup;
pub mod runtime;

pub use context::UiContext;
pub use markup::{build_prediction_page, PredictionPage};
pub use runtime::Page;
