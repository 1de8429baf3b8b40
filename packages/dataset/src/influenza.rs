//! Influenza surveillance reader and state-level apportionment.
//!
//! The surveillance feed is national (`COUNTRY_CODE`, `ISO_YEAR`,
//! `INF_ALL` columns, one row per reporting week). State-level figures
//! are *estimates* derived from the national mean by census region and a
//! fixed per-state factor, so they are stable between runs but carry no
//! independent information about individual states.

use std::collections::BTreeMap;
use std::io::Read;

use air_health_dataset_models::{Metric, MetricTable};
use air_health_geography_models::CensusRegion;
use serde::{Deserialize, Serialize};

use crate::DatasetError;
use crate::parsing::{parse_number, parse_year, reader, require_column};

const DATASET: &str = "influenza";

/// Tunables for reading and apportioning influenza data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct InfluenzaSettings {
    /// Country code whose rows are kept.
    pub country_code: String,
    /// Years that use [`Self::pandemic_multipliers`].
    pub pandemic_years: Vec<i32>,
    /// Region multipliers for ordinary years.
    pub multipliers: BTreeMap<CensusRegion, f64>,
    /// Region multipliers for pandemic years.
    pub pandemic_multipliers: BTreeMap<CensusRegion, f64>,
}

impl Default for InfluenzaSettings {
    fn default() -> Self {
        Self {
            country_code: "USA".to_string(),
            pandemic_years: vec![2020, 2021],
            multipliers: BTreeMap::from([
                (CensusRegion::Northeast, 1.1),
                (CensusRegion::Midwest, 0.9),
                (CensusRegion::South, 1.2),
                (CensusRegion::West, 0.8),
            ]),
            pandemic_multipliers: BTreeMap::from([
                (CensusRegion::Northeast, 0.6),
                (CensusRegion::Midwest, 0.5),
                (CensusRegion::South, 0.7),
                (CensusRegion::West, 0.4),
            ]),
        }
    }
}

impl InfluenzaSettings {
    fn multiplier(&self, region: CensusRegion, year: i32) -> Option<f64> {
        let table = if self.pandemic_years.contains(&year) {
            &self.pandemic_multipliers
        } else {
            &self.multipliers
        };
        table.get(&region).copied()
    }
}

/// Reads the surveillance feed and averages `INF_ALL` per year for the
/// configured country.
///
/// Years without any usable row are absent from the result; no fallback
/// rate is substituted.
///
/// # Errors
///
/// Returns [`DatasetError`] if the input is not valid CSV or lacks a
/// required column.
#[allow(clippy::cast_precision_loss)]
pub fn read_national_influenza<R: Read>(
    input: R,
    settings: &InfluenzaSettings,
) -> Result<BTreeMap<i32, f64>, DatasetError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();

    let country_idx = require_column(&headers, "COUNTRY_CODE", DATASET)?;
    let year_idx = require_column(&headers, "ISO_YEAR", DATASET)?;
    let value_idx = require_column(&headers, "INF_ALL", DATASET)?;

    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();

    for result in rdr.records() {
        let record = result?;
        if record.get(country_idx) != Some(settings.country_code.as_str()) {
            continue;
        }
        let (Some(year), Some(value)) = (
            parse_year(record.get(year_idx)),
            parse_number(record.get(value_idx)),
        ) else {
            continue;
        };

        let entry = sums.entry(year).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let rates: BTreeMap<i32, f64> = sums
        .into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect();

    log::info!(
        "[{DATASET}] National rates for {} years ({})",
        rates.len(),
        settings.country_code
    );

    Ok(rates)
}

/// Deterministic per-state factor in `[0.85, 1.14]`.
fn state_factor(code: &str, year: i32) -> f64 {
    let bytes = code.as_bytes();
    let first = i32::from(bytes.first().copied().unwrap_or(0));
    let second = i32::from(bytes.get(1).copied().unwrap_or(0));
    let hash = (first + second + year).rem_euclid(30);
    0.85 + f64::from(hash) / 100.0
}

/// Distributes a national rate across states for one year.
///
/// Regions without a configured multiplier produce no estimates.
#[must_use]
pub fn apportion(national_rate: f64, year: i32, settings: &InfluenzaSettings) -> BTreeMap<String, f64> {
    let mut rates = BTreeMap::new();

    for &region in CensusRegion::ALL {
        let Some(multiplier) = settings.multiplier(region, year) else {
            log::debug!("[{DATASET}] No multiplier for {region} in {year}");
            continue;
        };
        for code in region.states() {
            let rate = national_rate * multiplier * state_factor(code, year);
            rates.insert((*code).to_string(), rate);
        }
    }

    rates
}

/// Builds the estimated state table from yearly national rates.
#[must_use]
pub fn estimate_state_rates(
    national: &BTreeMap<i32, f64>,
    settings: &InfluenzaSettings,
) -> MetricTable {
    let mut table = MetricTable::new(Metric::Influenza);
    for (&year, &rate) in national {
        for (code, value) in apportion(rate, year, settings) {
            table.insert(&code, year, value);
        }
    }
    table
}
