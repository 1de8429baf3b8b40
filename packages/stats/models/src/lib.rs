#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result and threshold types for the correlation statistics engine.
//!
//! These are plain data types. The computations live in
//! `air_health_stats`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A fitted least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regression {
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// Value of `y` at `x = 0`.
    pub intercept: f64,
}

impl Regression {
    /// Evaluates the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Pearson correlation between a pollutant and the illness index across
/// states for one year.
///
/// Only produced when at least two states report both values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSample {
    /// Name of the independent metric (the pollutant).
    pub independent_metric: String,
    /// Year the samples were taken from.
    pub year: i32,
    /// Pearson coefficient in `[-1, 1]`.
    pub coefficient: f64,
    /// Number of paired states.
    pub sample_size: usize,
}

/// One point of a correlation-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar year.
    pub year: i32,
    /// Correlation coefficient for that year.
    pub correlation: f64,
}

impl From<&CorrelationSample> for TrendPoint {
    fn from(sample: &CorrelationSample) -> Self {
        Self {
            year: sample.year,
            correlation: sample.coefficient,
        }
    }
}

/// Which way a correlation moved over time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendDirection {
    /// Positive slope.
    Increasing,
    /// Zero or negative slope.
    Decreasing,
}

/// A significant year-over-year change in correlation for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    /// Metric the correlations belong to.
    pub metric: String,
    /// Change in correlation per step of the series (not per calendar
    /// year).
    pub slope: f64,
    /// Sign of [`Self::slope`].
    pub direction: TrendDirection,
    /// First year of the series.
    pub start_year: i32,
    /// Last year of the series.
    pub end_year: i32,
}

/// Every way a trend evaluation can end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrendOutcome {
    /// The slope cleared the significance threshold.
    Trend(TrendResult),
    /// Too few points to fit a meaningful slope.
    InsufficientData {
        /// Points available.
        points: usize,
        /// Points required.
        required: usize,
    },
    /// A slope was fitted but its magnitude did not clear the threshold.
    BelowThreshold {
        /// The fitted slope.
        slope: f64,
    },
}

impl TrendOutcome {
    /// The trend, if one was detected.
    #[must_use]
    pub fn into_trend(self) -> Option<TrendResult> {
        match self {
            Self::Trend(trend) => Some(trend),
            Self::InsufficientData { .. } | Self::BelowThreshold { .. } => None,
        }
    }
}

/// Tunables for trend detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TrendSettings {
    /// Minimum `|slope|` for a trend to be reported.
    pub significance_threshold: f64,
    /// Minimum number of points in the series.
    pub min_points: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            significance_threshold: 0.03,
            min_points: 3,
        }
    }
}

/// Qualitative strength of a correlation, from `|r|`.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CorrelationStrength {
    /// Below the `very_weak` breakpoint.
    VeryWeak,
    /// Below the `weak` breakpoint.
    Weak,
    /// Below the `moderate` breakpoint.
    Moderate,
    /// Below the `strong` breakpoint.
    Strong,
    /// At or above the `strong` breakpoint.
    VeryStrong,
}

/// Sign of a correlation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CorrelationSign {
    /// `r > 0`.
    Positive,
    /// `r < 0`.
    Negative,
    /// `r == 0`.
    None,
}

/// Strength and sign of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationCategory {
    /// How strong the association is.
    pub strength: CorrelationStrength,
    /// Direction of the association.
    pub sign: CorrelationSign,
}

impl std::fmt::Display for CorrelationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sign {
            CorrelationSign::None => write!(f, "{} (no direction)", self.strength),
            sign => write!(f, "{} {sign}", self.strength),
        }
    }
}

/// Upper bounds on `|r|` for each strength band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct StrengthThresholds {
    /// `|r|` below this is very weak.
    pub very_weak: f64,
    /// `|r|` below this is weak.
    pub weak: f64,
    /// `|r|` below this is moderate.
    pub moderate: f64,
    /// `|r|` below this is strong; anything else is very strong.
    pub strong: f64,
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        Self {
            very_weak: 0.2,
            weak: 0.4,
            moderate: 0.6,
            strong: 0.8,
        }
    }
}

impl StrengthThresholds {
    /// Returns `true` if the breakpoints are strictly ascending within
    /// `(0, 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let bounds = [self.very_weak, self.weak, self.moderate, self.strong];
        bounds.iter().all(|b| *b > 0.0 && *b <= 1.0) && bounds.windows(2).all(|w| w[0] < w[1])
    }
}
