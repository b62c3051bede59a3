//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, AssetsConfig, ContactConfig, ContentConfig, LogLevel, ToastsConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, ConfigSource, StorageManager};
