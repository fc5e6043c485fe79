//! Tunable inputs for one spatial analysis run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading an [`AnalysisConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for [`crate::run_spatial_analysis`].
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Annual development budget in acres per year.
    pub growth_rate: f64,
    /// Maximum number of parcels allocated per scenario.
    pub max_parcels: usize,
    /// Civic center used by the concentric strategy, as `[lon, lat]`.
    pub civic_center: [f64; 2],
    /// Label used in concentric-strategy reasons.
    pub civic_center_label: String,
    /// School district reported for parcels without one.
    pub default_school_district: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            growth_rate: 75.0,
            max_parcels: 800,
            civic_center: [-89.520, 43.003],
            civic_center_label: "Fish Hatchery/Lacy".to_string(),
            default_school_district: "Fitchburg".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text does not match the schema.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns a copy with a different growth rate.
    #[must_use]
    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }
}
