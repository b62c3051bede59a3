//! Image handling infrastructure.
//!
//! This module provides:
//! - HTTP image fetching with a decode check
//! - Host format support detection

pub mod format_probe;
pub mod http_fetcher;

pub use format_probe::FormatProbe;
pub use http_fetcher::{HttpImageFetcher, HttpImageFetcherConfig};
