//! Configuration module for tagsel
//!
//! Configuration is stored as TOML in the user's config directory
//! (`~/.config/tagsel/config.toml` on Linux). A missing file is created with
//! defaults on first load.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted by [`TagselConfig::get`] and [`TagselConfig::set`]
pub const KEYS: &[&str] = &["stale_item_policy", "log_filter", "quiet", "catalog"];

/// What a range selector does when a click names an item that is no longer listed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StaleItemPolicy {
    /// Return an error to the caller
    Strict,
    /// Log a warning and ignore the click
    Warn,
}

impl Default for StaleItemPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Warn
        }
    }
}

impl std::str::FromStr for StaleItemPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "warn" => Ok(Self::Warn),
            _ => Err(ConfigError::Message(format!(
                "Invalid stale item policy: '{value}'. Use 'strict' or 'warn'"
            ))),
        }
    }
}

impl std::fmt::Display for StaleItemPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TagselConfig {
    /// Handling of clicks on items missing from the current list
    #[serde(default)]
    pub stale_item_policy: StaleItemPolicy,

    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Catalog used when `--catalog` is not given
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Default for TagselConfig {
    fn default() -> Self {
        Self {
            stale_item_policy: StaleItemPolicy::default(),
            log_filter: default_log_filter(),
            quiet: false,
            catalog: None,
        }
    }
}

impl TagselConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("tagsel").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Read a setting as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "stale_item_policy" => Ok(self.stale_item_policy.to_string()),
            "log_filter" => Ok(self.log_filter.clone()),
            "quiet" => Ok(self.quiet.to_string()),
            "catalog" => Ok(self
                .catalog
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default()),
            _ => Err(ConfigError::NotFound(key.to_string())),
        }
    }

    /// Update a setting from text; an empty `catalog` value unsets it
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key, or
    /// `ConfigError::Message` if the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "stale_item_policy" => self.stale_item_policy = value.parse()?,
            "log_filter" => self.log_filter = value.to_string(),
            "quiet" => {
                self.quiet = value.parse::<bool>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
            }
            "catalog" => {
                self.catalog = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }
}
