//! Census region groupings of US states.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The four US Census Bureau regions.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CensusRegion {
    /// New England and the Mid-Atlantic.
    Northeast,
    /// East and West North Central.
    Midwest,
    /// South Atlantic, East and West South Central (includes DC).
    South,
    /// Mountain and Pacific.
    West,
}

impl CensusRegion {
    /// All regions in declaration order.
    pub const ALL: &[Self] = &[Self::Northeast, Self::Midwest, Self::South, Self::West];

    /// Returns the state codes belonging to this region.
    #[must_use]
    pub const fn states(self) -> &'static [&'static str] {
        match self {
            Self::Northeast => &["ME", "NH", "VT", "MA", "RI", "CT", "NY", "NJ", "PA"],
            Self::Midwest => &[
                "OH", "MI", "IN", "IL", "WI", "MN", "IA", "MO", "ND", "SD", "NE", "KS",
            ],
            Self::South => &[
                "DE", "MD", "DC", "VA", "WV", "NC", "SC", "GA", "FL", "KY", "TN", "AL", "MS", "AR",
                "LA", "OK", "TX",
            ],
            Self::West => &[
                "MT", "ID", "WY", "CO", "NM", "AZ", "UT", "NV", "WA", "OR", "CA", "AK", "HI",
            ],
        }
    }

    /// Returns the region containing `code`, or `None` for territories and
    /// unknown codes.
    #[must_use]
    pub fn of(code: &str) -> Option<Self> {
        let code = code.to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.states().contains(&code.as_str()))
    }
}
