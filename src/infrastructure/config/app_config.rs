//! Application configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::default_routes;
use crate::domain::entities::{AssetCatalog, ImageFormat, PageKey};

use super::args::CliArgs;

const APP_NAME: &str = "folio";
const APP_QUALIFIER: &str = "dev";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Asset loading configuration.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Toast configuration.
    #[serde(default)]
    pub toasts: ToastsConfig,

    /// Content API configuration.
    #[serde(default)]
    pub content: ContentConfig,

    /// Contact form delivery configuration.
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Asset loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Origin relative asset paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origins that get a preconnect hint at startup.
    #[serde(default = "default_preconnect_origins")]
    pub preconnect_origins: Vec<String>,

    /// Images preloaded at startup.
    #[serde(default = "default_critical_assets")]
    pub critical_assets: Vec<String>,

    /// Image used when neither the optimized nor the original image loads.
    #[serde(default = "default_fallback_src")]
    pub fallback_src: String,

    /// Per-request timeout for image fetches, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with image fetches.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Formats the host can decode. Probed from the image decoder when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_formats: Option<Vec<ImageFormat>>,

    /// Route path to page key.
    #[serde(default = "default_routes")]
    pub routes: BTreeMap<String, PageKey>,

    /// Page key to the images prefetched on entry.
    #[serde(default = "default_page_assets")]
    pub page_assets: BTreeMap<PageKey, Vec<String>>,
}

impl AssetsConfig {
    /// Builds the asset catalog described by this section.
    #[must_use]
    pub fn catalog(&self) -> AssetCatalog {
        AssetCatalog {
            preconnect_origins: self.preconnect_origins.clone(),
            critical_assets: self.critical_assets.clone(),
            page_assets: self.page_assets.clone(),
        }
    }

    /// Fetch timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            preconnect_origins: default_preconnect_origins(),
            critical_assets: default_critical_assets(),
            fallback_src: default_fallback_src(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            supported_formats: None,
            routes: default_routes(),
            page_assets: default_page_assets(),
        }
    }
}

/// Toast configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastsConfig {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_toast_duration_ms")]
    pub default_duration_ms: u64,
}

impl ToastsConfig {
    /// Default toast lifetime as a duration.
    #[must_use]
    pub const fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_toast_duration_ms(),
        }
    }
}

/// Content API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base URL of the content API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

/// Contact form delivery through an EmailJS compatible REST endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Send endpoint.
    #[serde(default = "default_email_endpoint")]
    pub endpoint: String,

    /// Email service id.
    #[serde(default)]
    pub service_id: String,

    /// Email template id.
    #[serde(default)]
    pub template_id: String,

    /// Public key identifying the account.
    #[serde(default)]
    pub public_key: String,

    /// Name the message is addressed to.
    #[serde(default)]
    pub recipient_name: Option<String>,

    /// Address shown to visitors when sending fails.
    #[serde(default)]
    pub direct_email: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ContactConfig {
    /// Whether all credentials are set and none is a template placeholder.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|value| {
                let value = value.trim();
                !value.is_empty() && !(value.starts_with("your_") && value.ends_with("_here"))
            })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_email_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            recipient_name: None,
            direct_email: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_email_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_preconnect_origins() -> Vec<String> {
    AssetCatalog::default().preconnect_origins
}

fn default_critical_assets() -> Vec<String> {
    AssetCatalog::default().critical_assets
}

fn default_page_assets() -> BTreeMap<PageKey, Vec<String>> {
    AssetCatalog::default().page_assets
}

fn default_fallback_src() -> String {
    "/images/placeholder.svg".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

#[allow(clippy::cast_possible_truncation)]
const fn default_toast_duration_ms() -> u64 {
    crate::domain::entities::DEFAULT_TOAST_DURATION.as_millis() as u64
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.assets.base_url.clone_from(base_url);
        }
        if let Some(api_base_url) = &args.api_base_url {
            self.content.api_base_url.clone_from(api_base_url);
        }
        if let Some(duration) = args.toast_duration_ms {
            self.toasts.default_duration_ms = duration;
        }
        if let Some(timeout) = args.timeout_secs {
            self.assets.timeout_secs = timeout;
        }
        if let Some(service_id) = &args.email_service_id {
            self.contact.service_id.clone_from(service_id);
        }
        if let Some(template_id) = &args.email_template_id {
            self.contact.template_id.clone_from(template_id);
        }
        if let Some(public_key) = &args.email_public_key {
            self.contact.public_key.clone_from(public_key);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("folio.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [assets]
            base_url = "https://portfolio.example"
            critical_assets = ["/images/hero.webp"]
            supported_formats = ["webp"]

            [assets.page_assets]
            projects = ["/images/p1.png", "/images/p2.png"]

            [toasts]
            default_duration_ms = 3000
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.assets.base_url, "https://portfolio.example");
        assert_eq!(config.assets.supported_formats, Some(vec![ImageFormat::Webp]));
        assert_eq!(config.toasts.default_duration(), Duration::from_millis(3000));
        assert_eq!(config.content.api_base_url, "http://localhost:5000/api");

        let catalog = config.assets.catalog();
        assert_eq!(catalog.critical_assets, vec!["/images/hero.webp"]);
        assert_eq!(catalog.assets_for(&PageKey::new("projects")).len(), 2);
        assert!(catalog.assets_for(&PageKey::new("achievements")).is_empty());
        assert_eq!(config.assets.routes.get("/about"), Some(&PageKey::new("about")));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.assets.catalog(), AssetCatalog::default());
        assert_eq!(config.assets.fallback_src, "/images/placeholder.svg");
        assert_eq!(config.toasts.default_duration_ms, 5000);
        assert!(config.assets.user_agent.starts_with("folio/"));
    }

    #[test]
    fn test_default_config_survives_toml_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.assets.catalog(), config.assets.catalog());
        assert_eq!(parsed.assets.routes, config.assets.routes);
    }

    #[test]
    fn test_merge_with_args() {
        let args = CliArgs::parse_from([
            "folio",
            "--base-url",
            "https://cdn.example",
            "--toast-duration-ms",
            "1500",
            "--log-level",
            "trace",
        ]);

        let mut config = AppConfig::default();
        config.merge_with_args(&args);

        assert_eq!(config.assets.base_url, "https://cdn.example");
        assert_eq!(config.toasts.default_duration_ms, 1500);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.content.api_base_url, "http://localhost:5000/api");
        assert!(!config.contact.is_configured());
    }

    #[test]
    fn test_contact_credentials() {
        let toml_content = r#"
            [contact]
            service_id = "service_abc"
            template_id = "template_xyz"
            public_key = "your_public_key_here"
            direct_email = "owner@example.com"
        "#;

        let mut config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.contact.endpoint, "https://api.emailjs.com/api/v1.0/email/send");
        assert!(!config.contact.is_configured());

        let args = CliArgs::parse_from(["folio", "--email-public-key", "pk_live"]);
        config.merge_with_args(&args);

        assert_eq!(config.contact.public_key, "pk_live");
        assert!(config.contact.is_configured());
    }
}
