//! Folio - asset loading and notification core for a portfolio site.
//!
//! This crate provides image preloading with request coalescing, lazy images
//! with fallback chains, route-driven prefetching and an auto-expiring toast
//! queue, organised in clean architecture layers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the composition root and widgets.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "folio";
