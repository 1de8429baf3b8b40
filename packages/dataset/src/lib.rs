#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loaders and state-level reshaping for the air health datasets.
//!
//! Each reader turns one source file into [`MetricTable`]s keyed by
//! two-letter state code and year. [`Dataset`] bundles the tables the
//! analysis layer works from, and [`join::pair_by_entity`] aligns two
//! tables for a year so they can be correlated.

pub mod air_quality;
pub mod influenza;
pub mod join;
pub mod parsing;
pub mod respiratory;
pub mod snapshot;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use air_health_dataset_models::{Metric, MetricTable, Pollutant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::air_quality::PollutantTables;
use crate::influenza::InfluenzaSettings;

/// Errors that can occur while loading datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading a file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("Missing column '{column}' in {dataset} data")]
    MissingColumn {
        /// Which dataset was being read.
        dataset: &'static str,
        /// Name of the missing column.
        column: String,
    },
}

/// Locations of the source CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DataPaths {
    /// Respiratory illness activity (`STATE`, `YEAR`, `LEVEL`).
    pub respiratory: PathBuf,
    /// Air quality in the wide layout (one column per year).
    pub air_quality: PathBuf,
    /// Optional air quality in the long layout, merged over the wide one.
    #[serde(default)]
    pub air_quality_long: Option<PathBuf>,
    /// Optional influenza surveillance feed.
    #[serde(default)]
    pub influenza: Option<PathBuf>,
}

impl DataPaths {
    /// Resolves relative paths against `base`.
    #[must_use]
    pub fn relative_to(&self, base: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };

        Self {
            respiratory: resolve(&self.respiratory),
            air_quality: resolve(&self.air_quality),
            air_quality_long: self.air_quality_long.as_deref().map(resolve),
            influenza: self.influenza.as_deref().map(resolve),
        }
    }
}

/// Every loaded metric table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Mean respiratory activity level per state and year.
    pub respiratory: MetricTable,
    /// Pollutant concentrations per state and year.
    pub pollutants: PollutantTables,
    /// National influenza rate per year.
    pub influenza_national: BTreeMap<i32, f64>,
    /// Estimated influenza rate per state and year.
    pub influenza: MetricTable,
}

impl Dataset {
    /// Creates a dataset with only respiratory data.
    #[must_use]
    pub fn new(respiratory: MetricTable) -> Self {
        Self {
            respiratory,
            pollutants: BTreeMap::new(),
            influenza_national: BTreeMap::new(),
            influenza: MetricTable::new(Metric::Influenza),
        }
    }

    /// The table for `pollutant`, if any readings were loaded.
    #[must_use]
    pub fn pollutant(&self, pollutant: Pollutant) -> Option<&MetricTable> {
        self.pollutants.get(&pollutant)
    }

    /// Loads every configured file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any file cannot be opened or parsed.
    pub fn load(
        paths: &DataPaths,
        influenza_settings: &InfluenzaSettings,
    ) -> Result<Self, DatasetError> {
        log::info!("Loading respiratory data from {}", paths.respiratory.display());
        let respiratory = respiratory::read_respiratory(open(&paths.respiratory)?)?;
        log::info!(
            "Respiratory data covers {} states over {} years",
            respiratory.entities().len(),
            respiratory.years().count()
        );

        log::info!("Loading air quality data from {}", paths.air_quality.display());
        let mut pollutants = air_quality::read_air_quality_wide(open(&paths.air_quality)?)?;

        if let Some(path) = &paths.air_quality_long {
            log::info!("Merging air quality readings from {}", path.display());
            let long = air_quality::read_air_quality_long(open(path)?)?;
            air_quality::merge(&mut pollutants, long);
        }

        let mut dataset = Self::new(respiratory);
        dataset.pollutants = pollutants;

        if let Some(path) = &paths.influenza {
            log::info!("Loading influenza data from {}", path.display());
            dataset.influenza_national =
                influenza::read_national_influenza(open(path)?, influenza_settings)?;
            dataset.influenza =
                influenza::estimate_state_rates(&dataset.influenza_national, influenza_settings);
        }

        Ok(dataset)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths() {
        let paths = DataPaths {
            respiratory: PathBuf::from("data.csv"),
            air_quality: PathBuf::from("/abs/data3.csv"),
            air_quality_long: None,
            influenza: Some(PathBuf::from("flu.csv")),
        };
        let resolved = paths.relative_to(Path::new("/etc/air"));
        assert_eq!(resolved.respiratory, PathBuf::from("/etc/air/data.csv"));
        assert_eq!(resolved.air_quality, PathBuf::from("/abs/data3.csv"));
        assert_eq!(resolved.influenza, Some(PathBuf::from("/etc/air/flu.csv")));
    }

    #[test]
    fn missing_file_reports_path() {
        let paths = DataPaths {
            respiratory: PathBuf::from("/nonexistent/air-health/data.csv"),
            air_quality: PathBuf::from("/nonexistent/air-health/data3.csv"),
            air_quality_long: None,
            influenza: None,
        };
        let err = Dataset::load(&paths, &InfluenzaSettings::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { ref path, .. } if path.ends_with("data.csv")));
    }
}
