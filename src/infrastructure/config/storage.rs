//! Configuration file persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

/// Configuration storage errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the existing file.
    File,
    /// No file existed; defaults were written to it.
    Created,
    /// The file did not parse; defaults are used and the file is left alone.
    Defaults {
        /// Parser message.
        reason: String,
    },
}

/// Owns the location of `config.toml` and reads or writes it.
#[derive(Debug, Clone)]
pub struct StorageManager {
    path: PathBuf,
}

impl StorageManager {
    /// Store for the platform config file, e.g. `~/.config/folio/config.toml`.
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` when the platform has no config
    /// directory.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_path()
            .map(Self::at)
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Store for an explicit file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `path` when given, otherwise the platform file.
    ///
    /// # Errors
    /// See [`StorageManager::new`].
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(Self::new, |path| Ok(Self::at(path)))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, writing the defaults on first run.
    ///
    /// A malformed file never aborts startup: the defaults are returned and
    /// the file is kept for the user to fix.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` when the file exists but cannot be read, or
    /// when the defaults cannot be written.
    pub fn load(&self) -> Result<(AppConfig, ConfigSource), ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Writing default configuration");
                let config = AppConfig::default();
                self.save(&config)?;
                return Ok((config, ConfigSource::Created));
            }
            Err(e) => return Err(ConfigError::io(&self.path, e)),
        };

        match toml::from_str::<AppConfig>(&text) {
            Ok(config) => {
                debug!(path = %self.path.display(), "Configuration loaded");
                Ok((config, ConfigSource::File))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed configuration");
                Ok((
                    AppConfig::default(),
                    ConfigSource::Defaults {
                        reason: e.to_string(),
                    },
                ))
            }
        }
    }

    /// Replaces the file with `config`. The write is atomic: readers see the
    /// old or the new file, never a partial one.
    ///
    /// # Errors
    /// Returns `ConfigError` when serialization or any filesystem step fails.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(config)?;
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
        staged
            .write_all(text.as_bytes())
            .map_err(|e| ConfigError::io(staged.path(), e))?;
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }
}
