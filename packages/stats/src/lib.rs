#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Correlation statistics engine.
//!
//! Pure functions over in-memory samples: Pearson correlation, ordinary
//! least-squares regression, trend detection over a correlation series,
//! and qualitative categorization of coefficients. Nothing here performs
//! I/O or keeps state between calls.
//!
//! Two conventions apply throughout:
//!
//! * Too few samples is an expected condition and is reported as `None`
//!   (or [`TrendOutcome::InsufficientData`]), never as a zero coefficient.
//! * Zero variance in an input yields a coefficient or slope of `0`.

pub mod category;
pub mod correlation;
pub mod regression;
pub mod trend;

pub use air_health_stats_models::TrendOutcome;
pub use category::{categorize_correlation, categorize_correlation_with};
pub use correlation::{correlation_sample, pearson_correlation};
pub use regression::linear_regression;
pub use trend::{evaluate_trend, trend_slope};

use thiserror::Error;

/// Errors raised for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Paired inputs have different lengths.
    #[error("Input length mismatch: x has {x_len} values, y has {y_len}")]
    InputLengthMismatch {
        /// Length of the first input.
        x_len: usize,
        /// Length of the second input.
        y_len: usize,
    },

    /// No values were supplied.
    #[error("Input is empty")]
    EmptyInput,

    /// An input contained NaN or an infinity.
    #[error("Non-finite value in {series} at index {index}")]
    NonFinite {
        /// Which input (`"x"` or `"y"`).
        series: &'static str,
        /// Position of the offending value.
        index: usize,
    },

    /// A trend series was not strictly ascending by year.
    #[error("Series is not in ascending year order: {previous} followed by {next}")]
    UnorderedSeries {
        /// Year of the earlier element.
        previous: i32,
        /// Year of the element that broke the ordering.
        next: i32,
    },
}

/// Checks that `x` and `y` are non-empty, the same length, and finite.
pub(crate) fn check_pair(x: &[f64], y: &[f64]) -> Result<usize, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::InputLengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    for (series, values) in [("x", x), ("y", y)] {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(StatsError::NonFinite { series, index });
        }
    }
    Ok(x.len())
}

/// Divides every value by the largest magnitude, returning the scaled
/// values and the factor. An all-zero input is returned unscaled.
///
/// Keeps sums of squares finite for inputs near the top of the `f64`
/// range.
pub(crate) fn normalized(values: &[f64]) -> (Vec<f64>, f64) {
    let scale = values.iter().fold(0.0_f64, |max, v| max.max(v.abs()));
    if scale == 0.0 {
        return (values.to_vec(), 1.0);
    }
    (values.iter().map(|v| v / scale).collect(), scale)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Returns `true` if every value equals the first.
///
/// Checked exactly rather than through the computed variance, which can
/// come out as a tiny non-zero number for identical inputs.
#[allow(clippy::float_cmp)]
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.first().is_none_or(|first| values.iter().all(|v| v == first))
}

/// Sums of squares and cross products about the means:
/// `(Sxx, Syy, Sxy)`.
pub(crate) fn centered_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let mean_x = mean(x);
    let mean_y = mean(y);

    x.iter()
        .zip(y)
        .fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (xi, yi)| {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            (dx.mul_add(dx, sxx), dy.mul_add(dy, syy), dx.mul_add(dy, sxy))
        })
}
