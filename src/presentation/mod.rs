//! Presentation layer with the composition root and HTML widgets.

/// Composition root.
pub mod app;
/// Reusable widgets.
pub mod widgets;

pub use app::{AppContext, Diagnostics, Ports};
