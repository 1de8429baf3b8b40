//! Ordinary least-squares line fit.

use air_health_stats_models::Regression;

use crate::{StatsError, centered_sums, check_pair, is_constant, mean, normalized};

/// Fits `y = slope * x + intercept` by ordinary least squares.
///
/// When `x` has no variance the slope is `0` and the intercept is the
/// mean of `y`.
///
/// # Errors
///
/// * [`StatsError::InputLengthMismatch`] if the inputs differ in length.
/// * [`StatsError::EmptyInput`] if the inputs are empty.
/// * [`StatsError::NonFinite`] if either input contains NaN or an infinity.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<Regression, StatsError> {
    check_pair(x, y)?;

    // Fit on unit-scaled values, then map slope and intercept back.
    let (x, x_scale) = normalized(x);
    let (y, y_scale) = normalized(y);
    let mean_x = mean(&x);
    let mean_y = mean(&y);

    let slope = if is_constant(&x) {
        0.0
    } else {
        let (sxx, _, sxy) = centered_sums(&x, &y);
        if sxx == 0.0 { 0.0 } else { sxy / sxx }
    };

    Ok(Regression {
        slope: slope * (y_scale / x_scale),
        intercept: slope.mul_add(-mean_x, mean_y) * y_scale,
    })
}
