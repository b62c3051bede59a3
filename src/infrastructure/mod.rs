//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Contact form email client.
pub mod contact;
/// Content API client.
pub mod content;
/// Document head adapter.
pub mod document;
/// Image fetching and format support.
pub mod image;
/// Viewport visibility tracking.
pub mod viewport;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigSource, LogLevel, StorageManager};
pub use contact::EmailClient;
pub use content::ContentApiClient;
pub use document::HeadDocument;
pub use image::{FormatProbe, HttpImageFetcher, HttpImageFetcherConfig};
pub use viewport::ViewportTracker;
