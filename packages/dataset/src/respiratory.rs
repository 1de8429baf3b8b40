//! Respiratory illness activity reader.
//!
//! Expects `STATE`, `YEAR`, and `LEVEL` columns, one row per reporting
//! period. States may be given by name or code. Levels are averaged per
//! state and year.

use std::collections::BTreeMap;
use std::io::Read;

use air_health_dataset_models::{Metric, MetricTable};
use air_health_geography_models::code_from_name;

use crate::DatasetError;
use crate::parsing::{parse_number, parse_year, reader, require_column};

const DATASET: &str = "respiratory";

/// Reads respiratory activity rows and averages them per `(state, year)`.
///
/// Rows with an unknown state, a missing year, or a missing level are
/// skipped.
///
/// # Errors
///
/// Returns [`DatasetError`] if the input is not valid CSV or lacks a
/// required column.
#[allow(clippy::cast_precision_loss)]
pub fn read_respiratory<R: Read>(input: R) -> Result<MetricTable, DatasetError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();

    let state_idx = require_column(&headers, "STATE", DATASET)?;
    let year_idx = require_column(&headers, "YEAR", DATASET)?;
    let level_idx = require_column(&headers, "LEVEL", DATASET)?;

    let mut sums: BTreeMap<(String, i32), (f64, usize)> = BTreeMap::new();
    let mut skipped = 0_usize;

    for result in rdr.records() {
        let record = result?;

        let Some(state) = record.get(state_idx).filter(|s| !s.is_empty()) else {
            skipped += 1;
            continue;
        };
        let Some(code) = code_from_name(state) else {
            log::debug!("[{DATASET}] Skipping unrecognized state '{state}'");
            skipped += 1;
            continue;
        };
        let (Some(year), Some(level)) = (
            parse_year(record.get(year_idx)),
            parse_number(record.get(level_idx)),
        ) else {
            skipped += 1;
            continue;
        };

        let entry = sums.entry((code, year)).or_insert((0.0, 0));
        entry.0 += level;
        entry.1 += 1;
    }

    let mut table = MetricTable::new(Metric::RespiratoryIndex);
    for ((code, year), (sum, count)) in sums {
        table.insert(&code, year, sum / count as f64);
    }

    log::info!(
        "[{DATASET}] Loaded {} state-year averages ({skipped} rows skipped)",
        table.len()
    );

    Ok(table)
}
