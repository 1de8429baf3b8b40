//! Per-metric `(state, year) -> value` lookup table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Metric, Observation, Series};

/// All values of one metric, keyed by year and then by state code.
///
/// Iteration is deterministic: years ascend and states follow code order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTable {
    metric: Metric,
    values: BTreeMap<i32, BTreeMap<String, f64>>,
}

impl MetricTable {
    /// Creates an empty table for `metric`.
    #[must_use]
    pub const fn new(metric: Metric) -> Self {
        Self {
            metric,
            values: BTreeMap::new(),
        }
    }

    /// The metric stored in this table.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Stores a value, returning the value it replaced (if any).
    pub fn insert(&mut self, entity_key: &str, year: i32, value: f64) -> Option<f64> {
        self.values
            .entry(year)
            .or_default()
            .insert(entity_key.to_string(), value)
    }

    /// Looks up the value for a state in a year.
    #[must_use]
    pub fn get(&self, entity_key: &str, year: i32) -> Option<f64> {
        self.values.get(&year)?.get(entity_key).copied()
    }

    /// All state values reported for `year`.
    #[must_use]
    pub fn year(&self, year: i32) -> Option<&BTreeMap<String, f64>> {
        self.values.get(&year)
    }

    /// Years that have at least one value, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.keys().copied()
    }

    /// Every state code that appears in any year.
    #[must_use]
    pub fn entities(&self) -> BTreeSet<&str> {
        self.values
            .values()
            .flat_map(|states| states.keys().map(String::as_str))
            .collect()
    }

    /// Total number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the table into observations, year-major.
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.values.iter().flat_map(|(year, states)| {
            states.iter().map(move |(key, value)| Observation {
                entity_key: key.clone(),
                year: *year,
                value: Some(*value),
            })
        })
    }

    /// Builds the series for one state across `years`, marking years the
    /// state did not report as absent.
    #[must_use]
    pub fn series(&self, entity_key: &str, years: &[i32]) -> Series {
        let observations = years
            .iter()
            .map(|&year| Observation {
                entity_key: entity_key.to_string(),
                year,
                value: self.get(entity_key, year),
            })
            .collect();

        Series::new(entity_key, self.metric, observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pollutant;

    fn table() -> MetricTable {
        let mut table = MetricTable::new(Metric::Pollutant(Pollutant::Pm25));
        table.insert("TX", 2017, 9.5);
        table.insert("CA", 2017, 12.1);
        table.insert("CA", 2016, 11.0);
        table
    }

    #[test]
    fn stores_and_reads_values() {
        let mut table = table();
        assert_eq!(table.get("CA", 2017), Some(12.1));
        assert_eq!(table.get("CA", 2018), None);
        assert_eq!(table.len(), 3);
        assert_eq!(table.insert("CA", 2017, 13.0), Some(12.1));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn iterates_in_order() {
        let table = table();
        assert_eq!(table.years().collect::<Vec<_>>(), vec![2016, 2017]);
        assert_eq!(
            table.entities().into_iter().collect::<Vec<_>>(),
            vec!["CA", "TX"]
        );

        let keys: Vec<(i32, String)> = table
            .observations()
            .map(|o| (o.year, o.entity_key))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2016, "CA".to_string()),
                (2017, "CA".to_string()),
                (2017, "TX".to_string()),
            ]
        );
    }

    #[test]
    fn series_marks_missing_years_absent() {
        let series = table().series("TX", &[2016, 2017]);
        assert_eq!(series.value_for(2016), None);
        assert_eq!(series.value_for(2017), Some(9.5));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn empty_table() {
        let table = MetricTable::new(Metric::Influenza);
        assert!(table.is_empty());
        assert!(table.year(2020).is_none());
    }
}
