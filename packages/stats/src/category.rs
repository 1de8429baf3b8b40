//! Qualitative labels for correlation coefficients.

use air_health_stats_models::{
    CorrelationCategory, CorrelationSign, CorrelationStrength, StrengthThresholds,
};

/// Categorizes `r` using the default breakpoints (0.2 / 0.4 / 0.6 / 0.8).
#[must_use]
pub fn categorize_correlation(r: f64) -> CorrelationCategory {
    categorize_correlation_with(r, &StrengthThresholds::default())
}

/// Categorizes `r` using custom breakpoints on `|r|`.
///
/// The sign is [`CorrelationSign::None`] only when `r` is exactly zero.
#[must_use]
pub fn categorize_correlation_with(r: f64, thresholds: &StrengthThresholds) -> CorrelationCategory {
    let magnitude = r.abs();

    let strength = if magnitude < thresholds.very_weak {
        CorrelationStrength::VeryWeak
    } else if magnitude < thresholds.weak {
        CorrelationStrength::Weak
    } else if magnitude < thresholds.moderate {
        CorrelationStrength::Moderate
    } else if magnitude < thresholds.strong {
        CorrelationStrength::Strong
    } else {
        CorrelationStrength::VeryStrong
    };

    let sign = if r == 0.0 {
        CorrelationSign::None
    } else if r > 0.0 {
        CorrelationSign::Positive
    } else {
        CorrelationSign::Negative
    };

    CorrelationCategory { strength, sign }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_positive() {
        assert_eq!(
            categorize_correlation(0.75),
            CorrelationCategory {
                strength: CorrelationStrength::Strong,
                sign: CorrelationSign::Positive,
            }
        );
    }

    #[test]
    fn very_weak_negative() {
        assert_eq!(
            categorize_correlation(-0.1),
            CorrelationCategory {
                strength: CorrelationStrength::VeryWeak,
                sign: CorrelationSign::Negative,
            }
        );
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(
            categorize_correlation(0.0),
            CorrelationCategory {
                strength: CorrelationStrength::VeryWeak,
                sign: CorrelationSign::None,
            }
        );
    }

    #[test]
    fn breakpoints_are_exclusive_upper_bounds() {
        assert_eq!(categorize_correlation(0.2).strength, CorrelationStrength::Weak);
        assert_eq!(categorize_correlation(-0.4).strength, CorrelationStrength::Moderate);
        assert_eq!(categorize_correlation(0.6).strength, CorrelationStrength::Strong);
        assert_eq!(categorize_correlation(-0.8).strength, CorrelationStrength::VeryStrong);
        assert_eq!(categorize_correlation(1.0).strength, CorrelationStrength::VeryStrong);
    }

    #[test]
    fn custom_breakpoints() {
        let thresholds = StrengthThresholds {
            very_weak: 0.1,
            weak: 0.3,
            moderate: 0.5,
            strong: 0.7,
        };
        assert_eq!(
            categorize_correlation_with(0.75, &thresholds).strength,
            CorrelationStrength::VeryStrong
        );
        assert_eq!(
            categorize_correlation_with(-0.15, &thresholds).strength,
            CorrelationStrength::Weak
        );
    }
}
