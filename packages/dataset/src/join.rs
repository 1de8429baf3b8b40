//! Joins two metric tables on state code.

use air_health_dataset_models::MetricTable;
use serde::{Deserialize, Serialize};

/// Aligned samples from two metrics for the states both report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedSamples {
    /// State codes, ascending.
    pub keys: Vec<String>,
    /// Values of the first metric, aligned with `keys`.
    pub x: Vec<f64>,
    /// Values of the second metric, aligned with `keys`.
    pub y: Vec<f64>,
}

impl PairedSamples {
    /// Number of paired states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no state reported both metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Pairs the values of `x` and `y` for `year` on shared state codes.
///
/// States present in only one table are left out.
#[must_use]
pub fn pair_by_entity(x: &MetricTable, y: &MetricTable, year: i32) -> PairedSamples {
    let mut paired = PairedSamples::default();

    let (Some(xs), Some(ys)) = (x.year(year), y.year(year)) else {
        return paired;
    };

    for (key, &x_value) in xs {
        if let Some(&y_value) = ys.get(key) {
            paired.keys.push(key.clone());
            paired.x.push(x_value);
            paired.y.push(y_value);
        }
    }

    log::debug!(
        "Paired {} states for {} vs {} in {year}",
        paired.len(),
        x.metric(),
        y.metric()
    );

    paired
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_health_dataset_models::{Metric, Pollutant};

    #[test]
    fn pairs_only_shared_states() {
        let mut pm = MetricTable::new(Metric::Pollutant(Pollutant::Pm25));
        pm.insert("CA", 2019, 12.0);
        pm.insert("TX", 2019, 9.0);
        pm.insert("OH", 2019, 10.0);
        pm.insert("OH", 2020, 11.0);

        let mut resp = MetricTable::new(Metric::RespiratoryIndex);
        resp.insert("TX", 2019, 3.0);
        resp.insert("CA", 2019, 4.0);
        resp.insert("NY", 2019, 5.0);

        let paired = pair_by_entity(&pm, &resp, 2019);
        assert_eq!(paired.keys, vec!["CA", "TX"]);
        assert_eq!(paired.x, vec![12.0, 9.0]);
        assert_eq!(paired.y, vec![4.0, 3.0]);
    }

    #[test]
    fn missing_year_yields_empty_pairs() {
        let pm = MetricTable::new(Metric::Pollutant(Pollutant::Co));
        let resp = MetricTable::new(Metric::RespiratoryIndex);
        assert!(pair_by_entity(&pm, &resp, 2019).is_empty());
    }
}
