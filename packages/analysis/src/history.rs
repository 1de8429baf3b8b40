//! Per-state history across years.

use air_health_analysis_models::StateHistory;
use air_health_dataset::Dataset;
use air_health_dataset_models::Pollutant;
use air_health_geography_models::{code_from_name, describe, state_name};

use crate::AnalysisError;

/// Resolves a state code (any case) or full name to its code.
fn resolve_state(state: &str) -> Option<String> {
    let trimmed = state.trim();
    let code = if trimmed.len() == 2 {
        trimmed.to_ascii_uppercase()
    } else {
        code_from_name(trimmed)?
    };
    state_name(&code).map(|_| code)
}

/// Collects the series of every loaded metric for `state` over `years`.
///
/// Pollutants without a loaded table are left out, as is the influenza
/// estimate when no influenza feed was loaded.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownState`] if `state` is neither a known
/// code nor a known state name.
pub fn state_history(
    dataset: &Dataset,
    state: &str,
    years: &[i32],
    pollutants: &[Pollutant],
) -> Result<StateHistory, AnalysisError> {
    let code = resolve_state(state).ok_or_else(|| AnalysisError::UnknownState {
        state: state.to_string(),
    })?;

    let mut years = years.to_vec();
    years.sort_unstable();
    years.dedup();

    let mut series = vec![dataset.respiratory.series(&code, &years)];
    series.extend(
        pollutants
            .iter()
            .filter_map(|&p| dataset.pollutant(p))
            .map(|table| table.series(&code, &years)),
    );
    if !dataset.influenza.is_empty() {
        series.push(dataset.influenza.series(&code, &years));
    }

    log::debug!(
        "[history] {code}: {} metrics over {} years",
        series.len(),
        years.len()
    );

    Ok(StateHistory {
        name: describe(&code),
        state: code,
        years,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use air_health_dataset_models::Metric;

    #[test]
    fn collects_loaded_metrics() {
        let history = state_history(
            &fixtures::dataset(),
            "california",
            &[2017, 2016],
            &[Pollutant::Pm25, Pollutant::O3, Pollutant::Co],
        )
        .unwrap();

        assert_eq!(history.state, "CA");
        assert_eq!(history.name, "California");
        assert_eq!(history.years, vec![2016, 2017]);

        let metrics: Vec<Metric> = history.series.iter().map(|s| s.metric).collect();
        assert_eq!(
            metrics,
            vec![
                Metric::RespiratoryIndex,
                Metric::Pollutant(Pollutant::Pm25),
                Metric::Pollutant(Pollutant::O3),
            ]
        );

        let pm = &history.series[1];
        assert_eq!(pm.value_for(2016), Some(12.0));
        let o3 = &history.series[2];
        assert_eq!(o3.value_for(2016), Some(0.07));
        assert_eq!(o3.value_for(2017), None);
        assert_eq!(o3.present(), vec![(2016, 0.07)]);
    }

    #[test]
    fn accepts_lowercase_codes() {
        let history = state_history(&fixtures::dataset(), "tx", &[2019], &[]).unwrap();
        assert_eq!(history.state, "TX");
        assert_eq!(history.series.len(), 1);
        assert_eq!(history.series[0].len(), 1);
    }

    #[test]
    fn unreported_state_is_all_absent() {
        let history = state_history(&fixtures::dataset(), "WY", &[2016, 2017], &[]).unwrap();
        assert!(history.series[0].present().is_empty());
        assert_eq!(history.series[0].len(), 2);
    }

    #[test]
    fn unknown_state_fails() {
        let err = state_history(&fixtures::dataset(), "Atlantis", &[2016], &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownState { ref state } if state == "Atlantis"));

        let err = state_history(&fixtures::dataset(), "ZZ", &[2016], &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownState { .. }));
    }
}
