#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Configuration for the air health tools.
//!
//! The defaults live in `config/default.toml`, which is baked into the
//! binary at compile time via [`include_str!`]. A user file is merged over
//! them table by table, so it only needs to name the values it changes.

use std::path::{Path, PathBuf};

use air_health_dataset::DataPaths;
use air_health_dataset::influenza::InfluenzaSettings;
use air_health_dataset_models::Pollutant;
use air_health_stats_models::{StrengthThresholds, TrendSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration embedded at compile time.
const DEFAULT_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The effective configuration could not be rendered as TOML.
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The values parsed but are inconsistent.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

/// The effective configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Years covered by the matrix and trend reports.
    pub years: Vec<i32>,
    /// Year used when a command is not given one.
    pub default_year: i32,
    /// Pollutants included in the matrix.
    pub pollutants: Vec<Pollutant>,
    /// Source file locations.
    pub data: DataPaths,
    /// Trend detection tunables.
    pub trend: TrendSettings,
    /// Correlation strength breakpoints.
    pub strength: StrengthThresholds,
    /// Influenza feed filtering and apportioning.
    pub influenza: InfluenzaSettings,
}

impl AppConfig {
    /// The embedded defaults on their own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the embedded TOML does not match
    /// [`AppConfig`].
    pub fn embedded() -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(DEFAULT_TOML)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration, merging the file at `path` (if any) over
    /// the embedded defaults.
    ///
    /// Relative data paths are resolved against the directory containing
    /// `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// the merged values fail [`Self::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            log::debug!("[config] Using embedded defaults");
            return Self::embedded();
        };

        log::info!("[config] Loading {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_overrides(&content)?;
        if let Some(base) = path.parent() {
            config.data = config.data.relative_to(base);
        }
        Ok(config)
    }

    /// Merges `content` over the embedded defaults without touching the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or mistyped values
    /// and [`ConfigError::Invalid`] if validation fails.
    pub fn from_overrides(content: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::de::from_str(DEFAULT_TOML)?;
        let overrides: toml::Table = toml::de::from_str(content)?;
        merge(&mut table, overrides);

        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem
    /// found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.to_string(),
            })
        };

        if self.years.is_empty() {
            return invalid("years must not be empty");
        }
        if self.pollutants.is_empty() {
            return invalid("pollutants must not be empty");
        }
        if !self.strength.is_valid() {
            return invalid("strength breakpoints must ascend strictly within (0, 1]");
        }
        let threshold = self.trend.significance_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return invalid("trend.significance_threshold must be a non-negative number");
        }
        if self.trend.min_points < 2 {
            return invalid("trend.min_points must be at least 2");
        }
        if self
            .influenza
            .multipliers
            .values()
            .chain(self.influenza.pandemic_multipliers.values())
            .any(|m| !m.is_finite() || *m < 0.0)
        {
            return invalid("influenza multipliers must be non-negative numbers");
        }

        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if a value has no TOML
    /// representation.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

/// Recursively overlays `overrides` onto `base`. Tables merge; any other
/// value replaces what was there.
fn merge(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
