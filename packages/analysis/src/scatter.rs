//! Pollutant vs. respiratory index scatter data for one year.

use air_health_analysis_models::{ScatterPlot, ScatterPoint};
use air_health_dataset::Dataset;
use air_health_dataset::join::pair_by_entity;
use air_health_dataset_models::Pollutant;
use air_health_geography_models::states;
use air_health_stats::correlation::MIN_CORRELATION_SAMPLES;
use air_health_stats::{categorize_correlation_with, linear_regression, pearson_correlation};
use air_health_stats_models::StrengthThresholds;

use crate::AnalysisError;

/// Builds the scatter plot of `pollutant` against the respiratory index.
///
/// The correlation and the fitted line are only filled in when at least
/// two states report both values.
///
/// # Errors
///
/// Returns [`AnalysisError::Stats`] if the statistics engine rejects the
/// paired samples.
pub fn scatter(
    dataset: &Dataset,
    year: i32,
    pollutant: Pollutant,
    thresholds: &StrengthThresholds,
) -> Result<ScatterPlot, AnalysisError> {
    let paired = dataset
        .pollutant(pollutant)
        .map(|table| pair_by_entity(table, &dataset.respiratory, year))
        .unwrap_or_default();

    let points: Vec<ScatterPoint> = paired
        .keys
        .iter()
        .zip(paired.x.iter().zip(&paired.y))
        .map(|(state, (&x, &y))| ScatterPoint {
            state: state.clone(),
            name: states::describe(state),
            x,
            y,
        })
        .collect();

    let (correlation, regression) = if paired.len() >= MIN_CORRELATION_SAMPLES {
        (
            Some(pearson_correlation(&paired.x, &paired.y)?),
            Some(linear_regression(&paired.x, &paired.y)?),
        )
    } else {
        log::debug!(
            "[scatter] {pollutant} {year}: only {} paired states",
            paired.len()
        );
        (None, None)
    };

    Ok(ScatterPlot {
        year,
        pollutant,
        points,
        correlation,
        category: correlation.map(|r| categorize_correlation_with(r, thresholds)),
        regression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn builds_named_points_with_fit() {
        let plot = scatter(
            &fixtures::dataset(),
            2019,
            Pollutant::Pm25,
            &StrengthThresholds::default(),
        )
        .unwrap();

        assert_eq!(plot.points.len(), 5);
        assert_eq!(plot.points[1].state, "CA");
        assert_eq!(plot.points[1].name, "California");
        assert!((plot.points[1].x - 12.0).abs() < 1e-9);

        let r = plot.correlation.unwrap();
        assert!(r > 0.95);
        assert!(plot.category.is_some());

        let line = plot.regression.unwrap();
        assert!(line.slope > 0.0);
    }

    #[test]
    fn single_point_has_no_fit() {
        let plot = scatter(
            &fixtures::dataset(),
            2016,
            Pollutant::O3,
            &StrengthThresholds::default(),
        )
        .unwrap();

        assert_eq!(plot.points.len(), 1);
        assert!(plot.correlation.is_none());
        assert!(plot.category.is_none());
        assert!(plot.regression.is_none());
    }

    #[test]
    fn missing_pollutant_is_empty() {
        let plot = scatter(
            &fixtures::dataset(),
            2016,
            Pollutant::So2,
            &StrengthThresholds::default(),
        )
        .unwrap();
        assert!(plot.points.is_empty());
        assert!(plot.regression.is_none());
    }
}
