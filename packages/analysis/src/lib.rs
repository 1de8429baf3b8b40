#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analysis layer tying the datasets to the statistics engine.
//!
//! Each public function takes a loaded [`air_health_dataset::Dataset`]
//! (or a report derived from one) and returns a typed report from
//! `air_health_analysis_models`.

pub mod history;
pub mod matrix;
pub mod scatter;
pub mod trends;

pub use history::state_history;
pub use matrix::correlation_matrix;
pub use scatter::scatter;
pub use trends::pollutant_trends;

use air_health_stats::StatsError;
use thiserror::Error;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The statistics engine rejected its input.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// A state code or name did not match any known state.
    #[error("Unknown state: {state}")]
    UnknownState {
        /// The input as given.
        state: String,
    },
}

#[cfg(test)]
pub(crate) mod fixtures {
    use air_health_dataset::Dataset;
    use air_health_dataset_models::{Metric, MetricTable, Pollutant};

    /// Respiratory index rises with PM2.5 in every year; the relationship
    /// tightens from 2016 to 2019. O3 is only reported in 2016.
    pub fn dataset() -> Dataset {
        let states = ["AZ", "CA", "NY", "OH", "TX"];
        let pm25 = [8.0, 12.0, 10.0, 9.0, 11.0];
        let noise: [[f64; 5]; 4] = [
            [1.5, -1.2, 0.9, -0.8, 0.6],
            [1.0, -0.8, 0.6, -0.5, 0.4],
            [0.5, -0.4, 0.3, -0.3, 0.2],
            [0.1, -0.1, 0.1, -0.1, 0.05],
        ];

        let mut respiratory = MetricTable::new(Metric::RespiratoryIndex);
        let mut pm = MetricTable::new(Metric::Pollutant(Pollutant::Pm25));
        for (offset, year) in (2016..=2019).enumerate() {
            for (i, state) in states.iter().enumerate() {
                pm.insert(state, year, pm25[i]);
                respiratory.insert(state, year, 0.5f64.mul_add(pm25[i], noise[offset][i]));
            }
        }

        let mut o3 = MetricTable::new(Metric::Pollutant(Pollutant::O3));
        o3.insert("CA", 2016, 0.07);

        let mut dataset = Dataset::new(respiratory);
        dataset.pollutants.insert(Pollutant::Pm25, pm);
        dataset.pollutants.insert(Pollutant::O3, o3);
        dataset
    }
}
