//! Trend statements over the correlation matrix.

use air_health_analysis_models::{CorrelationMatrix, TrendReport, TrendStatement};
use air_health_dataset_models::Pollutant;
use air_health_stats::evaluate_trend;
use air_health_stats_models::{TrendDirection, TrendOutcome, TrendPoint, TrendSettings};

use crate::AnalysisError;

/// Evaluates the correlation-over-time series of every pollutant in
/// `matrix`.
///
/// Years without a defined correlation are skipped, so a pollutant only
/// reported in a handful of years may end up with insufficient data.
///
/// # Errors
///
/// Returns [`AnalysisError::Stats`] if a series cannot be fitted.
pub fn pollutant_trends(
    matrix: &CorrelationMatrix,
    settings: &TrendSettings,
) -> Result<TrendReport, AnalysisError> {
    let mut statements = Vec::with_capacity(matrix.pollutants.len());

    for &pollutant in &matrix.pollutants {
        let points: Vec<TrendPoint> = matrix
            .samples_for(pollutant)
            .into_iter()
            .map(TrendPoint::from)
            .collect();

        let outcome = evaluate_trend(&pollutant.to_string(), &points, settings)?;
        let summary = summarize(pollutant, &outcome);
        log::debug!("[trends] {summary}");

        statements.push(TrendStatement {
            pollutant,
            outcome,
            summary,
        });
    }

    Ok(TrendReport {
        settings: *settings,
        statements,
    })
}

fn summarize(pollutant: Pollutant, outcome: &TrendOutcome) -> String {
    match outcome {
        TrendOutcome::Trend(trend) => {
            let verb = match trend.direction {
                TrendDirection::Increasing => "strengthened",
                TrendDirection::Decreasing => "weakened",
            };
            format!(
                "{pollutant} correlation with respiratory illness {verb} from {} to {} \
                 ({:+.3} per reported year)",
                trend.start_year, trend.end_year, trend.slope
            )
        }
        TrendOutcome::BelowThreshold { slope } => format!(
            "{pollutant}: no significant trend in correlation with respiratory illness \
             (slope {slope:+.3})"
        ),
        TrendOutcome::InsufficientData { points, required } => format!(
            "{pollutant}: insufficient data ({points} of {required} years with a correlation)"
        ),
    }
}
