//! Configuration management for wayfinder.
//!
//! This module provides configuration loading and validation using
//! figment, supporting TOML config files, environment variables, and
//! defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matcher::MatcherConfig;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "wayfinder";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "catalog.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables, prefixed with `WAYFINDER_` and the section
///    separated by a double underscore, e.g.
///    `WAYFINDER_MATCHER__WIFI_WEIGHT=2.0`
/// 2. TOML config file at `~/.config/wayfinder/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Matcher weights and cutoffs.
    pub matcher: MatcherConfig,
    /// Speech synthesis hints for the presentation layer.
    pub speech: SpeechConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/wayfinder/catalog.db`
    pub database_path: Option<PathBuf>,
    /// Seed the built-in demo catalog when the store is empty.
    pub seed_defaults: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            seed_defaults: true,
        }
    }
}

/// Speech synthesis hints.
///
/// The crate never speaks; these values are stored so the presentation
/// layer announces steps consistently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// BCP 47 language tag for announcements.
    pub language: String,
    /// Speech rate, where 1.0 is the engine's normal speed.
    pub rate: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            rate: 0.8,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        // Sections in env keys split on a double underscore so field
        // names may themselves contain underscores.
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("WAYFINDER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.matcher.wifi_weight < 0.0 || self.matcher.gps_weight < 0.0 {
            return Err(Error::ConfigValidation {
                message: "matcher weights must not be negative".to_string(),
            });
        }

        if self.matcher.wifi_weight + self.matcher.gps_weight <= 0.0 {
            return Err(Error::ConfigValidation {
                message: "at least one matcher weight must be positive".to_string(),
            });
        }

        if self.matcher.max_gps_range_m <= 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_gps_range_m must be positive, got {}",
                    self.matcher.max_gps_range_m
                ),
            });
        }

        if self.speech.rate <= 0.0 || self.speech.rate > 2.0 {
            return Err(Error::ConfigValidation {
                message: format!("speech rate must be in (0, 2], got {}", self.speech.rate),
            });
        }

        if self.speech.language.is_empty() {
            return Err(Error::ConfigValidation {
                message: "speech language must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
