#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Observation and series types shared by the dataset loaders and the
//! analysis layer.
//!
//! Every source file (air quality, respiratory illness, influenza) is
//! reduced to the same shape: a [`MetricTable`] mapping
//! `(state code, year) -> value` for one [`Metric`].

pub mod category;
pub mod table;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use category::{AirQualityCategory, InfluenzaCategory, RespiratoryCategory};
pub use table::MetricTable;

/// An air pollutant tracked by the EPA air quality datasets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Pollutant {
    /// Fine particulate matter (diameter under 2.5 micrometers).
    #[serde(rename = "PM2.5", alias = "PM25")]
    #[strum(to_string = "PM2.5", serialize = "PM25")]
    Pm25,
    /// Ground-level ozone.
    #[serde(rename = "O3")]
    #[strum(to_string = "O3")]
    O3,
    /// Carbon monoxide.
    #[serde(rename = "CO")]
    #[strum(to_string = "CO")]
    Co,
    /// Coarse particulate matter (diameter under 10 micrometers).
    #[serde(rename = "PM10")]
    #[strum(to_string = "PM10")]
    Pm10,
    /// Sulfur dioxide.
    #[serde(rename = "SO2")]
    #[strum(to_string = "SO2")]
    So2,
    /// Nitrogen dioxide.
    #[serde(rename = "NO2")]
    #[strum(to_string = "NO2")]
    No2,
}

impl Pollutant {
    /// All pollutants in display order.
    pub const ALL: &[Self] = &[
        Self::Pm25,
        Self::O3,
        Self::Co,
        Self::Pm10,
        Self::So2,
        Self::No2,
    ];
}

/// The quantity an observation measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Respiratory illness activity level (0-8 scale, averaged per state).
    RespiratoryIndex,
    /// Influenza positivity rate.
    Influenza,
    /// Annual concentration of a pollutant.
    Pollutant(Pollutant),
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RespiratoryIndex => write!(f, "respiratory index"),
            Self::Influenza => write!(f, "influenza rate"),
            Self::Pollutant(p) => write!(f, "{p}"),
        }
    }
}

/// A single reading for one state in one year.
///
/// `value` is `None` when the state reported no usable number for that
/// year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Two-letter state code.
    pub entity_key: String,
    /// Calendar year of the reading.
    pub year: i32,
    /// Reported value, if any.
    pub value: Option<f64>,
}

/// Observations for one `(state, metric)` pair ordered by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Two-letter state code shared by every observation.
    pub entity_key: String,
    /// What the observations measure.
    pub metric: Metric,
    observations: Vec<Observation>,
}

impl Series {
    /// Creates a series, sorting the observations by year.
    ///
    /// Observations whose key differs from `entity_key` are discarded.
    #[must_use]
    pub fn new(entity_key: &str, metric: Metric, observations: Vec<Observation>) -> Self {
        let mut observations: Vec<Observation> = observations
            .into_iter()
            .filter(|o| o.entity_key == entity_key)
            .collect();
        observations.sort_by_key(|o| o.year);

        Self {
            entity_key: entity_key.to_string(),
            metric,
            observations,
        }
    }

    /// Observations in ascending year order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Value reported for `year`, if present.
    #[must_use]
    pub fn value_for(&self, year: i32) -> Option<f64> {
        self.observations
            .iter()
            .find(|o| o.year == year)
            .and_then(|o| o.value)
    }

    /// `(year, value)` pairs for the years that have a value.
    #[must_use]
    pub fn present(&self) -> Vec<(i32, f64)> {
        self.observations
            .iter()
            .filter_map(|o| o.value.map(|v| (o.year, v)))
            .collect()
    }

    /// Number of observations, including absent ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Combined indicators for one state in one year.
///
/// Fields are `None` when the corresponding dataset has nothing for the
/// state; they are never back-filled with placeholder values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateIndicators {
    /// Two-letter state code.
    pub code: String,
    /// Display name (falls back to the code when unknown).
    pub name: String,
    /// Mean respiratory illness level.
    pub respiratory_index: Option<f64>,
    /// Category of [`Self::respiratory_index`].
    pub respiratory_category: Option<RespiratoryCategory>,
    /// Pollutant shown for the air quality columns.
    pub pollutant: Pollutant,
    /// Annual pollutant concentration.
    pub air_quality_value: Option<f64>,
    /// Category of [`Self::air_quality_value`]. Only PM2.5 has published
    /// breakpoints, so other pollutants leave this empty.
    pub air_quality_category: Option<AirQualityCategory>,
    /// Estimated influenza rate.
    pub influenza_value: Option<f64>,
    /// Category of [`Self::influenza_value`].
    pub influenza_category: Option<InfluenzaCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(key: &str, year: i32, value: Option<f64>) -> Observation {
        Observation {
            entity_key: key.to_string(),
            year,
            value,
        }
    }

    #[test]
    fn pollutant_names() {
        assert_eq!(Pollutant::Pm25.to_string(), "PM2.5");
        assert_eq!("pm2.5".parse::<Pollutant>().ok(), Some(Pollutant::Pm25));
        assert_eq!("PM25".parse::<Pollutant>().ok(), Some(Pollutant::Pm25));
        assert_eq!("no2".parse::<Pollutant>().ok(), Some(Pollutant::No2));
        assert!("LEAD".parse::<Pollutant>().is_err());
    }

    #[test]
    fn pollutant_serde_uses_display_names() {
        let json = serde_json::to_string(&Pollutant::Pm25).unwrap();
        assert_eq!(json, "\"PM2.5\"");
        let back: Pollutant = serde_json::from_str("\"SO2\"").unwrap();
        assert_eq!(back, Pollutant::So2);
    }

    #[test]
    fn metric_display() {
        assert_eq!(Metric::Pollutant(Pollutant::O3).to_string(), "O3");
        assert_eq!(Metric::RespiratoryIndex.to_string(), "respiratory index");
    }

    #[test]
    fn series_sorts_by_year_and_filters_keys() {
        let series = Series::new(
            "CA",
            Metric::RespiratoryIndex,
            vec![
                obs("CA", 2019, Some(3.0)),
                obs("TX", 2017, Some(9.0)),
                obs("CA", 2016, Some(1.0)),
                obs("CA", 2018, None),
            ],
        );

        let years: Vec<i32> = series.observations().iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2016, 2018, 2019]);
        assert_eq!(series.value_for(2018), None);
        assert_eq!(series.value_for(2019), Some(3.0));
        assert_eq!(series.present(), vec![(2016, 1.0), (2019, 3.0)]);
        assert_eq!(series.len(), 3);
    }
}
