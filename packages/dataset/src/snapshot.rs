//! Per-state indicator snapshot for a single year.

use std::collections::BTreeSet;

use air_health_dataset_models::{
    AirQualityCategory, InfluenzaCategory, Pollutant, RespiratoryCategory, StateIndicators,
};
use air_health_geography_models::describe;

use crate::Dataset;

/// Combines every dataset into one row per state for `year`.
///
/// The row set is the union of states reported by any dataset. Values a
/// dataset lacks stay `None`.
#[must_use]
pub fn state_indicators(dataset: &Dataset, year: i32, pollutant: Pollutant) -> Vec<StateIndicators> {
    let air_quality = dataset.pollutant(pollutant);

    let mut codes: BTreeSet<&str> = BTreeSet::new();
    for states in [
        dataset.respiratory.year(year),
        air_quality.and_then(|t| t.year(year)),
        dataset.influenza.year(year),
    ]
    .into_iter()
    .flatten()
    {
        codes.extend(states.keys().map(String::as_str));
    }

    codes
        .into_iter()
        .map(|code| {
            let respiratory_index = dataset.respiratory.get(code, year);
            let air_quality_value = air_quality.and_then(|t| t.get(code, year));
            let influenza_value = dataset.influenza.get(code, year);

            StateIndicators {
                code: code.to_string(),
                name: describe(code),
                respiratory_index,
                respiratory_category: respiratory_index.map(RespiratoryCategory::from_level),
                pollutant,
                air_quality_value,
                air_quality_category: air_quality_value
                    .filter(|_| pollutant == Pollutant::Pm25)
                    .map(AirQualityCategory::from_pm25),
                influenza_value,
                influenza_category: influenza_value.map(InfluenzaCategory::from_rate),
            }
        })
        .collect()
}
