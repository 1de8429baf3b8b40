#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report types produced by the analysis layer.
//!
//! Each report is serializable so the CLI can emit it as JSON unchanged.
//! Missing results are modelled as `None` and carry enough context (such
//! as the number of paired states) to explain why.

use air_health_dataset_models::{Pollutant, Series};
use air_health_stats_models::{
    CorrelationCategory, CorrelationSample, Regression, TrendOutcome, TrendSettings,
};
use serde::{Deserialize, Serialize};

/// Correlation between one pollutant and the respiratory index in one
/// year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationCell {
    /// Independent metric.
    pub pollutant: Pollutant,
    /// Year of the readings.
    pub year: i32,
    /// Number of states reporting both values.
    pub paired_states: usize,
    /// The correlation, or `None` when fewer than two states paired.
    pub sample: Option<CorrelationSample>,
    /// Category of the coefficient, when there is one.
    pub category: Option<CorrelationCategory>,
}

/// Correlations for every requested `(year, pollutant)` combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    /// Years covered, ascending.
    pub years: Vec<i32>,
    /// Pollutants covered, in request order.
    pub pollutants: Vec<Pollutant>,
    /// One cell per combination, year-major.
    pub cells: Vec<CorrelationCell>,
}

impl CorrelationMatrix {
    /// Looks up a single cell.
    #[must_use]
    pub fn cell(&self, year: i32, pollutant: Pollutant) -> Option<&CorrelationCell> {
        self.cells
            .iter()
            .find(|c| c.year == year && c.pollutant == pollutant)
    }

    /// Defined correlations for `pollutant` in ascending year order.
    #[must_use]
    pub fn samples_for(&self, pollutant: Pollutant) -> Vec<&CorrelationSample> {
        let mut samples: Vec<&CorrelationSample> = self
            .cells
            .iter()
            .filter(|c| c.pollutant == pollutant)
            .filter_map(|c| c.sample.as_ref())
            .collect();
        samples.sort_by_key(|s| s.year);
        samples
    }
}

/// Trend finding for one pollutant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendStatement {
    /// Pollutant whose correlation series was evaluated.
    pub pollutant: Pollutant,
    /// What the evaluation found.
    pub outcome: TrendOutcome,
    /// Human-readable summary.
    pub summary: String,
}

/// Trend findings for every pollutant in a matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Settings the trends were evaluated with.
    pub settings: TrendSettings,
    /// One statement per pollutant.
    pub statements: Vec<TrendStatement>,
}

/// One state on a pollutant vs. respiratory index scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// Two-letter state code.
    pub state: String,
    /// Display name of the state.
    pub name: String,
    /// Pollutant concentration.
    pub x: f64,
    /// Respiratory index.
    pub y: f64,
}

/// Scatter data with its fitted statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPlot {
    /// Year of the readings.
    pub year: i32,
    /// Pollutant on the x axis.
    pub pollutant: Pollutant,
    /// Paired states in code order.
    pub points: Vec<ScatterPoint>,
    /// Pearson coefficient, when at least two states paired.
    pub correlation: Option<f64>,
    /// Category of [`Self::correlation`].
    pub category: Option<CorrelationCategory>,
    /// Least-squares line through the points, when at least two states
    /// paired.
    pub regression: Option<Regression>,
}

/// Year-by-year values of every loaded metric for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateHistory {
    /// Two-letter state code.
    pub state: String,
    /// Display name of the state.
    pub name: String,
    /// Years covered, ascending.
    pub years: Vec<i32>,
    /// One series per metric: respiratory index first, then pollutants,
    /// then the influenza estimate. Years the state did not report are
    /// absent observations.
    pub series: Vec<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(year: i32, pollutant: Pollutant, coefficient: Option<f64>) -> CorrelationCell {
        CorrelationCell {
            pollutant,
            year,
            paired_states: usize::from(coefficient.is_some()) * 10,
            sample: coefficient.map(|coefficient| CorrelationSample {
                independent_metric: pollutant.to_string(),
                year,
                coefficient,
                sample_size: 10,
            }),
            category: None,
        }
    }

    #[test]
    fn samples_for_skips_missing_and_sorts() {
        let matrix = CorrelationMatrix {
            years: vec![2016, 2017, 2018],
            pollutants: vec![Pollutant::Pm25, Pollutant::O3],
            cells: vec![
                cell(2018, Pollutant::Pm25, Some(0.3)),
                cell(2016, Pollutant::Pm25, Some(0.1)),
                cell(2017, Pollutant::Pm25, None),
                cell(2016, Pollutant::O3, Some(0.9)),
            ],
        };

        let years: Vec<i32> = matrix
            .samples_for(Pollutant::Pm25)
            .iter()
            .map(|s| s.year)
            .collect();
        assert_eq!(years, vec![2016, 2018]);
        assert!(matrix.cell(2017, Pollutant::Pm25).is_some_and(|c| c.sample.is_none()));
        assert!(matrix.cell(2017, Pollutant::O3).is_none());
    }
}
