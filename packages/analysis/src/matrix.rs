//! Year x pollutant correlation matrix.

use air_health_analysis_models::{CorrelationCell, CorrelationMatrix};
use air_health_dataset::Dataset;
use air_health_dataset::join::{PairedSamples, pair_by_entity};
use air_health_dataset_models::Pollutant;
use air_health_stats::{categorize_correlation_with, correlation_sample};
use air_health_stats_models::StrengthThresholds;

use crate::AnalysisError;

/// Correlates each pollutant with the respiratory index for every year.
///
/// Combinations with fewer than two paired states produce a cell with no
/// sample rather than a zero coefficient.
///
/// # Errors
///
/// Returns [`AnalysisError::Stats`] if the statistics engine rejects the
/// paired samples.
pub fn correlation_matrix(
    dataset: &Dataset,
    years: &[i32],
    pollutants: &[Pollutant],
    thresholds: &StrengthThresholds,
) -> Result<CorrelationMatrix, AnalysisError> {
    let mut years = years.to_vec();
    years.sort_unstable();
    years.dedup();

    let mut cells = Vec::with_capacity(years.len() * pollutants.len());

    for &year in &years {
        for &pollutant in pollutants {
            let paired = dataset
                .pollutant(pollutant)
                .map(|table| pair_by_entity(table, &dataset.respiratory, year))
                .unwrap_or_default();

            cells.push(cell(year, pollutant, &paired, thresholds)?);
        }
    }

    let defined = cells.iter().filter(|c| c.sample.is_some()).count();
    log::info!(
        "Correlation matrix: {defined}/{} cells defined ({} years x {} pollutants)",
        cells.len(),
        years.len(),
        pollutants.len()
    );

    Ok(CorrelationMatrix {
        years,
        pollutants: pollutants.to_vec(),
        cells,
    })
}

fn cell(
    year: i32,
    pollutant: Pollutant,
    paired: &PairedSamples,
    thresholds: &StrengthThresholds,
) -> Result<CorrelationCell, AnalysisError> {
    let sample = correlation_sample(&pollutant.to_string(), year, &paired.x, &paired.y)?;
    let category = sample
        .as_ref()
        .map(|s| categorize_correlation_with(s.coefficient, thresholds));

    Ok(CorrelationCell {
        pollutant,
        year,
        paired_states: paired.len(),
        sample,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use air_health_stats_models::CorrelationStrength;

    #[test]
    fn builds_every_cell() {
        let matrix = correlation_matrix(
            &fixtures::dataset(),
            &[2019, 2016, 2017, 2018, 2016],
            &[Pollutant::Pm25, Pollutant::O3, Pollutant::Co],
            &StrengthThresholds::default(),
        )
        .unwrap();

        assert_eq!(matrix.years, vec![2016, 2017, 2018, 2019]);
        assert_eq!(matrix.cells.len(), 12);
    }

    #[test]
    fn pm25_cells_are_defined_and_tighten() {
        let matrix = correlation_matrix(
            &fixtures::dataset(),
            &[2016, 2019],
            &[Pollutant::Pm25],
            &StrengthThresholds::default(),
        )
        .unwrap();

        let early = matrix.cell(2016, Pollutant::Pm25).unwrap();
        let late = matrix.cell(2019, Pollutant::Pm25).unwrap();
        assert_eq!(early.paired_states, 5);

        let early_r = early.sample.as_ref().unwrap().coefficient;
        let late_r = late.sample.as_ref().unwrap().coefficient;
        assert!(late_r > early_r);
        assert!(late_r > 0.95);
        assert_eq!(
            late.category.map(|c| c.strength),
            Some(CorrelationStrength::VeryStrong)
        );
    }

    #[test]
    fn sparse_pollutants_have_no_sample() {
        let matrix = correlation_matrix(
            &fixtures::dataset(),
            &[2016],
            &[Pollutant::O3, Pollutant::Co],
            &StrengthThresholds::default(),
        )
        .unwrap();

        let o3 = matrix.cell(2016, Pollutant::O3).unwrap();
        assert_eq!(o3.paired_states, 1);
        assert!(o3.sample.is_none());
        assert!(o3.category.is_none());

        let co = matrix.cell(2016, Pollutant::Co).unwrap();
        assert_eq!(co.paired_states, 0);
        assert!(co.sample.is_none());
    }
}
