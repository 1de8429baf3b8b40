//! Qualitative bands for the raw indicator values.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Band for the 0-8 respiratory illness activity level.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum RespiratoryCategory {
    /// Level below 2.
    VeryGood,
    /// Level below 3.5.
    Good,
    /// Level below 5.
    Moderate,
    /// Level below 6.5.
    Poor,
    /// Level 6.5 and above.
    VeryPoor,
}

impl RespiratoryCategory {
    /// Classifies an activity level.
    #[must_use]
    pub fn from_level(level: f64) -> Self {
        if level < 2.0 {
            Self::VeryGood
        } else if level < 3.5 {
            Self::Good
        } else if level < 5.0 {
            Self::Moderate
        } else if level < 6.5 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }
}

/// Band for annual PM2.5 concentration (micrograms per cubic meter).
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum AirQualityCategory {
    /// Below 12.
    Good,
    /// Below 35.5.
    Moderate,
    /// 35.5 and above.
    Unhealthy,
}

impl AirQualityCategory {
    /// Classifies a PM2.5 concentration.
    #[must_use]
    pub fn from_pm25(value: f64) -> Self {
        if value < 12.0 {
            Self::Good
        } else if value < 35.5 {
            Self::Moderate
        } else {
            Self::Unhealthy
        }
    }
}

/// Band for influenza rates.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum InfluenzaCategory {
    /// Below 5.
    Low,
    /// Below 15.
    Moderate,
    /// 15 and above.
    High,
}

impl InfluenzaCategory {
    /// Classifies an influenza rate.
    #[must_use]
    pub fn from_rate(rate: f64) -> Self {
        if rate < 5.0 {
            Self::Low
        } else if rate < 15.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respiratory_bands() {
        assert_eq!(RespiratoryCategory::from_level(0.0), RespiratoryCategory::VeryGood);
        assert_eq!(RespiratoryCategory::from_level(2.0), RespiratoryCategory::Good);
        assert_eq!(RespiratoryCategory::from_level(4.99), RespiratoryCategory::Moderate);
        assert_eq!(RespiratoryCategory::from_level(6.0), RespiratoryCategory::Poor);
        assert_eq!(RespiratoryCategory::from_level(6.5), RespiratoryCategory::VeryPoor);
        assert_eq!(RespiratoryCategory::VeryGood.to_string(), "Very Good");
    }

    #[test]
    fn pm25_bands() {
        assert_eq!(AirQualityCategory::from_pm25(8.1), AirQualityCategory::Good);
        assert_eq!(AirQualityCategory::from_pm25(12.0), AirQualityCategory::Moderate);
        assert_eq!(AirQualityCategory::from_pm25(35.5), AirQualityCategory::Unhealthy);
    }

    #[test]
    fn influenza_bands() {
        assert_eq!(InfluenzaCategory::from_rate(4.9), InfluenzaCategory::Low);
        assert_eq!(InfluenzaCategory::from_rate(5.0), InfluenzaCategory::Moderate);
        assert_eq!(InfluenzaCategory::from_rate(15.0), InfluenzaCategory::High);
    }
}
