//! Air quality readers.
//!
//! Two layouts are supported:
//!
//! * **wide**: `State`, `Pollutant`, then one column per year (`2016`,
//!   `2017`, ...), one row per state and pollutant.
//! * **long**: `State`, `Pollutant`, `Year`, `Value`, one row per reading.

use std::collections::BTreeMap;
use std::io::Read;

use air_health_dataset_models::{Metric, MetricTable, Pollutant};
use air_health_geography_models::code_from_name;

use crate::DatasetError;
use crate::parsing::{parse_number, parse_year, reader, require_column};

const DATASET: &str = "air quality";

/// Air quality tables keyed by pollutant.
pub type PollutantTables = BTreeMap<Pollutant, MetricTable>;

fn record_value(
    tables: &mut PollutantTables,
    pollutant: Pollutant,
    code: &str,
    year: i32,
    value: f64,
) {
    let table = tables
        .entry(pollutant)
        .or_insert_with(|| MetricTable::new(Metric::Pollutant(pollutant)));
    if let Some(previous) = table.insert(code, year, value) {
        log::warn!(
            "[{DATASET}] Duplicate {pollutant} reading for {code} in {year}: {previous} replaced by {value}"
        );
    }
}

fn row_key(state: Option<&str>, pollutant: Option<&str>) -> Option<(String, Pollutant)> {
    let state = state.filter(|s| !s.is_empty())?;
    let pollutant = pollutant.filter(|p| !p.is_empty())?;

    let Some(code) = code_from_name(state) else {
        log::debug!("[{DATASET}] Skipping unrecognized state '{state}'");
        return None;
    };
    let Ok(pollutant) = pollutant.parse::<Pollutant>() else {
        log::debug!("[{DATASET}] Skipping unsupported pollutant '{pollutant}'");
        return None;
    };

    Some((code, pollutant))
}

/// Reads the wide layout with one column per year.
///
/// Every header that parses as a year is treated as a data column. Empty
/// or non-numeric cells are absent readings and produce no value.
///
/// # Errors
///
/// Returns [`DatasetError`] if the input is not valid CSV, lacks the
/// `State` or `Pollutant` column, or has no year columns.
pub fn read_air_quality_wide<R: Read>(input: R) -> Result<PollutantTables, DatasetError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();

    let state_idx = require_column(&headers, "State", DATASET)?;
    let pollutant_idx = require_column(&headers, "Pollutant", DATASET)?;

    let year_columns: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.parse::<i32>().ok().map(|year| (i, year)))
        .collect();

    if year_columns.is_empty() {
        return Err(DatasetError::MissingColumn {
            dataset: DATASET,
            column: "<year>".to_string(),
        });
    }

    let mut tables = PollutantTables::new();

    for result in rdr.records() {
        let record = result?;
        let Some((code, pollutant)) = row_key(record.get(state_idx), record.get(pollutant_idx))
        else {
            continue;
        };

        for &(idx, year) in &year_columns {
            if let Some(value) = parse_number(record.get(idx)) {
                record_value(&mut tables, pollutant, &code, year, value);
            }
        }
    }

    for (pollutant, table) in &tables {
        log::info!("[{DATASET}] {pollutant}: {} state-year readings", table.len());
    }

    Ok(tables)
}

/// Reads the long layout with one row per reading.
///
/// Rows missing any of the four fields, or with a non-numeric value,
/// are dropped.
///
/// # Errors
///
/// Returns [`DatasetError`] if the input is not valid CSV or lacks a
/// required column.
pub fn read_air_quality_long<R: Read>(input: R) -> Result<PollutantTables, DatasetError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();

    let state_idx = require_column(&headers, "State", DATASET)?;
    let pollutant_idx = require_column(&headers, "Pollutant", DATASET)?;
    let year_idx = require_column(&headers, "Year", DATASET)?;
    let value_idx = require_column(&headers, "Value", DATASET)?;

    let mut tables = PollutantTables::new();
    let mut dropped = 0_usize;

    for result in rdr.records() {
        let record = result?;
        let Some((code, pollutant)) = row_key(record.get(state_idx), record.get(pollutant_idx))
        else {
            dropped += 1;
            continue;
        };
        let (Some(year), Some(value)) = (
            parse_year(record.get(year_idx)),
            parse_number(record.get(value_idx)),
        ) else {
            dropped += 1;
            continue;
        };

        record_value(&mut tables, pollutant, &code, year, value);
    }

    log::info!(
        "[{DATASET}] Loaded {} readings across {} pollutants ({dropped} rows dropped)",
        tables.values().map(MetricTable::len).sum::<usize>(),
        tables.len()
    );

    Ok(tables)
}

/// Merges `other` into `base`. Readings in `other` win on conflict.
pub fn merge(base: &mut PollutantTables, other: PollutantTables) {
    for (pollutant, table) in other {
        for observation in table.observations() {
            if let Some(value) = observation.value {
                record_value(
                    base,
                    pollutant,
                    &observation.entity_key,
                    observation.year,
                    value,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_wide_layout() {
        let csv = "\
State,Pollutant,2016,2017,2018
CA,PM2.5,12.1,11.8,
TX,PM2.5,9.0,null,8.7
CA,O3,0.07,0.071,0.069
CA,Lead,1,1,1
";
        let tables = read_air_quality_wide(csv.as_bytes()).unwrap();

        let pm25 = &tables[&Pollutant::Pm25];
        assert_eq!(pm25.get("CA", 2016), Some(12.1));
        assert_eq!(pm25.get("CA", 2018), None);
        assert_eq!(pm25.get("TX", 2017), None);
        assert_eq!(pm25.get("TX", 2018), Some(8.7));
        assert_eq!(pm25.len(), 4);

        assert_eq!(tables[&Pollutant::O3].get("CA", 2017), Some(0.071));
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn wide_layout_requires_year_columns() {
        let csv = "State,Pollutant,Notes\nCA,PM2.5,none\n";
        assert!(matches!(
            read_air_quality_wide(csv.as_bytes()),
            Err(DatasetError::MissingColumn { .. })
        ));
    }

    #[test]
    fn reads_long_layout_and_drops_incomplete_rows() {
        let csv = "\
State,Pollutant,Year,Value
Ohio,NO2,2019,18.5
OH,NO2,2020,
OH,SO2,,3.2
,CO,2019,0.4
OH,CO,2019,NaN
";
        let tables = read_air_quality_long(csv.as_bytes()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[&Pollutant::No2].get("OH", 2019), Some(18.5));
        assert_eq!(tables[&Pollutant::No2].len(), 1);
    }

    #[test]
    fn merge_prefers_newer_readings() {
        let mut base = read_air_quality_wide("State,Pollutant,2019\nCA,CO,0.5\n".as_bytes()).unwrap();
        let other = read_air_quality_long(
            "State,Pollutant,Year,Value\nCA,CO,2019,0.6\nCA,CO,2020,0.7\n".as_bytes(),
        )
        .unwrap();

        merge(&mut base, other);

        let co = &base[&Pollutant::Co];
        assert_eq!(co.get("CA", 2019), Some(0.6));
        assert_eq!(co.get("CA", 2020), Some(0.7));
    }
}
