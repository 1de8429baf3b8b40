//! Trend detection over a correlation-by-year series.
//!
//! The slope is fitted against the position in the series (`0..n`), not
//! the calendar year, so slopes stay comparable between metrics whose
//! series have different gaps between years.

use air_health_stats_models::{TrendDirection, TrendOutcome, TrendPoint, TrendResult, TrendSettings};

use crate::{StatsError, linear_regression};

/// Evaluates whether `series` shows a significant trend.
///
/// `series` must be strictly ascending by year. Fewer than
/// `settings.min_points` points yields [`TrendOutcome::InsufficientData`];
/// a slope whose magnitude does not exceed
/// `settings.significance_threshold` yields
/// [`TrendOutcome::BelowThreshold`].
///
/// # Errors
///
/// Returns [`StatsError::UnorderedSeries`] if the years are not strictly
/// ascending.
#[allow(clippy::cast_precision_loss)]
pub fn evaluate_trend(
    metric: &str,
    series: &[TrendPoint],
    settings: &TrendSettings,
) -> Result<TrendOutcome, StatsError> {
    if let Some(w) = series.windows(2).find(|w| w[0].year >= w[1].year) {
        return Err(StatsError::UnorderedSeries {
            previous: w[0].year,
            next: w[1].year,
        });
    }

    let required = settings.min_points.max(2);
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Ok(TrendOutcome::InsufficientData {
            points: 0,
            required,
        });
    };
    if series.len() < required {
        return Ok(TrendOutcome::InsufficientData {
            points: series.len(),
            required,
        });
    }

    let index: Vec<f64> = (0..series.len()).map(|i| i as f64).collect();
    let correlations: Vec<f64> = series.iter().map(|p| p.correlation).collect();
    let fit = linear_regression(&index, &correlations)?;

    if fit.slope.abs() <= settings.significance_threshold {
        log::debug!(
            "{metric}: slope {:.4} within threshold {}",
            fit.slope,
            settings.significance_threshold
        );
        return Ok(TrendOutcome::BelowThreshold { slope: fit.slope });
    }

    Ok(TrendOutcome::Trend(TrendResult {
        metric: metric.to_string(),
        slope: fit.slope,
        direction: if fit.slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        },
        start_year: first.year,
        end_year: last.year,
    }))
}

/// Returns the significant trend in `series`, if any.
///
/// Shorthand for [`evaluate_trend`] that discards the reason no trend was
/// reported.
///
/// # Errors
///
/// Returns [`StatsError::UnorderedSeries`] if the years are not strictly
/// ascending.
pub fn trend_slope(
    metric: &str,
    series: &[TrendPoint],
    settings: &TrendSettings,
) -> Result<Option<TrendResult>, StatsError> {
    evaluate_trend(metric, series, settings).map(TrendOutcome::into_trend)
}
