//! Pearson correlation.

use air_health_stats_models::CorrelationSample;

use crate::{StatsError, centered_sums, check_pair, is_constant, normalized};

/// Minimum number of paired samples for a defined correlation.
pub const MIN_CORRELATION_SAMPLES: usize = 2;

/// Computes the Pearson correlation coefficient of `x` and `y`.
///
/// Returns `0` when either input has no variance (including the
/// single-sample case), since no linear relationship can be attributed.
/// The result is clamped to `[-1, 1]` to absorb floating-point overshoot.
///
/// # Errors
///
/// * [`StatsError::InputLengthMismatch`] if the inputs differ in length.
/// * [`StatsError::EmptyInput`] if the inputs are empty.
/// * [`StatsError::NonFinite`] if either input contains NaN or an infinity.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_pair(x, y)?;

    if is_constant(x) || is_constant(y) {
        return Ok(0.0);
    }

    let (x, _) = normalized(x);
    let (y, _) = normalized(y);
    let (sxx, syy, sxy) = centered_sums(&x, &y);
    let denominator = sxx.sqrt() * syy.sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }

    Ok((sxy / denominator).clamp(-1.0, 1.0))
}

/// Correlates paired samples for one metric and year.
///
/// Returns `Ok(None)` when fewer than [`MIN_CORRELATION_SAMPLES`] pairs
/// are available.
///
/// # Errors
///
/// Returns [`StatsError::InputLengthMismatch`] if the inputs differ in
/// length and [`StatsError::NonFinite`] if a value is NaN or infinite.
pub fn correlation_sample(
    metric: &str,
    year: i32,
    x: &[f64],
    y: &[f64],
) -> Result<Option<CorrelationSample>, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::InputLengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < MIN_CORRELATION_SAMPLES {
        log::debug!(
            "{metric} {year}: {} paired samples, correlation undefined",
            x.len()
        );
        return Ok(None);
    }

    let coefficient = pearson_correlation(x, y)?;

    Ok(Some(CorrelationSample {
        independent_metric: metric.to_string(),
        year,
        coefficient,
        sample_size: x.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    /// Deterministic pseudo-random values in `[0, 100)`.
    fn lcg(seed: u64, n: usize) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                #[allow(clippy::cast_precision_loss)]
                let v = (state >> 11) as f64 / (1_u64 << 53) as f64;
                v * 100.0
            })
            .collect()
    }

    #[test]
    fn perfect_negative_correlation() {
        let r = pearson_correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < EPS);
    }

    #[test]
    fn self_correlation_is_one() {
        let x = lcg(7, 25);
        let r = pearson_correlation(&x, &x).unwrap();
        assert!((r - 1.0).abs() < EPS);
    }

    #[test]
    fn symmetric() {
        let x = lcg(1, 30);
        let y = lcg(2, 30);
        let a = pearson_correlation(&x, &y).unwrap();
        let b = pearson_correlation(&y, &x).unwrap();
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn always_within_bounds() {
        for seed in 0..200_u64 {
            let n = 2 + usize::try_from(seed % 40).unwrap();
            let x = lcg(seed, n);
            let y = lcg(seed + 1_000, n);
            let r = pearson_correlation(&x, &y).unwrap();
            assert!((-1.0..=1.0).contains(&r), "seed {seed}: r = {r}");
        }
    }

    #[test]
    fn constant_input_yields_zero() {
        let x = [0.1, 0.1, 0.1, 0.1];
        let y = lcg(3, 4);
        assert_eq!(pearson_correlation(&x, &y).unwrap(), 0.0);
        assert_eq!(pearson_correlation(&y, &x).unwrap(), 0.0);
    }

    #[test]
    fn single_sample_yields_zero() {
        assert_eq!(pearson_correlation(&[4.0], &[2.0]).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = pearson_correlation(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, StatsError::InputLengthMismatch { x_len: 2, y_len: 1 });
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(pearson_correlation(&[], &[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn large_magnitudes_stay_bounded() {
        let x = [1e155, 2e155, 3e155];
        let r = pearson_correlation(&x, &x).unwrap();
        assert!((r - 1.0).abs() < EPS, "r = {r}");

        let y = [3e300, -1e300, 2e300];
        let r = pearson_correlation(&x, &y).unwrap();
        assert!((-1.0..=1.0).contains(&r), "r = {r}");

        let tiny = [1e-300, 2e-300, 4e-300];
        let r = pearson_correlation(&tiny, &[1.0, 2.0, 4.0]).unwrap();
        assert!((r - 1.0).abs() < EPS, "r = {r}");
    }

    #[test]
    fn non_finite_input_fails() {
        assert_eq!(
            pearson_correlation(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::NonFinite {
                series: "x",
                index: 1
            })
        );
        assert_eq!(
            pearson_correlation(&[1.0, 2.0], &[f64::INFINITY, 2.0]),
            Err(StatsError::NonFinite {
                series: "y",
                index: 0
            })
        );
    }

    #[test]
    fn sample_requires_two_pairs() {
        assert_eq!(correlation_sample("PM2.5", 2019, &[1.0], &[2.0]), Ok(None));
        assert_eq!(correlation_sample("PM2.5", 2019, &[], &[]), Ok(None));
    }

    #[test]
    fn sample_carries_metadata() {
        let sample = correlation_sample("O3", 2020, &[1.0, 2.0, 3.0], &[2.0, 4.0, 7.0])
            .unwrap()
            .unwrap();
        assert_eq!(sample.independent_metric, "O3");
        assert_eq!(sample.year, 2020);
        assert_eq!(sample.sample_size, 3);
        assert!(sample.coefficient > 0.98);
    }

    #[test]
    fn sample_rejects_mismatched_lengths() {
        assert!(matches!(
            correlation_sample("CO", 2019, &[1.0, 2.0], &[1.0]),
            Err(StatsError::InputLengthMismatch { .. })
        ));
    }
}
