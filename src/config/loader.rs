use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/entity-store/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("entity-store").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `api.base_url` is an absolute URL and `api.version` is non-empty
    /// - Resource names are non-empty and unique
    /// - Resource overrides carry a non-empty version and a valid `list_url`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid api.base_url '{}'", self.api.base_url),
            });
        }

        if self.api.version.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "api.version must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            if resource.name.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Resource name must not be empty".to_string(),
                });
            }

            if !seen.insert(resource.name.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Resource '{}' is configured more than once", resource.name),
                });
            }

            if resource
                .version
                .as_deref()
                .is_some_and(|v| v.trim().is_empty())
            {
                return Err(ConfigError::ValidationError {
                    message: format!("Resource '{}' has an empty version", resource.name),
                });
            }

            if let Some(url) = &resource.list_url {
                if reqwest::Url::parse(url).is_err() {
                    return Err(ConfigError::ValidationError {
                        message: format!(
                            "Resource '{}' has invalid list_url '{}'",
                            resource.name, url
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
