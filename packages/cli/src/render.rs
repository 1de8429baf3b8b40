//! Plain-text tables for terminal output.

use std::fmt::Display;

use air_health_analysis_models::{CorrelationMatrix, ScatterPlot, StateHistory, TrendReport};
use air_health_dataset_models::StateIndicators;

const INSUFFICIENT: &str = "insufficient data";
const MISSING: &str = "n/a";

fn number(value: Option<f64>, precision: usize, absent: &str) -> String {
    value.map_or_else(|| absent.to_string(), |v| format!("{v:.precision$}"))
}

fn label<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// Per-state indicator table.
#[must_use]
pub fn states(year: i32, rows: &[StateIndicators]) -> String {
    let pollutant = rows
        .first()
        .map_or_else(|| "air quality".to_string(), |r| r.pollutant.to_string());

    let mut lines = vec![
        format!("State indicators for {year}"),
        format!(
            "{:<4} {:<22} {:>8} {:<10} {:>8} {:<10} {:>8} {:<10}",
            "CODE", "NAME", "RESP", "", pollutant, "", "FLU*", ""
        ),
        "-".repeat(90),
    ];

    for row in rows {
        lines.push(format!(
            "{:<4} {:<22} {:>8} {:<10} {:>8} {:<10} {:>8} {:<10}",
            row.code,
            row.name,
            number(row.respiratory_index, 2, MISSING),
            label(row.respiratory_category),
            number(row.air_quality_value, 2, MISSING),
            label(row.air_quality_category),
            number(row.influenza_value, 2, MISSING),
            label(row.influenza_category),
        ));
    }

    lines.push(String::new());
    lines.push("* estimated from national surveillance by census region".to_string());
    lines.join("\n")
}

/// Scatter summary: the fitted statistics followed by the points.
#[must_use]
pub fn scatter(plot: &ScatterPlot) -> String {
    let mut lines = vec![
        format!(
            "{} vs. respiratory index, {} ({} states)",
            plot.pollutant,
            plot.year,
            plot.points.len()
        ),
        format!("  correlation: {}", number(plot.correlation, 3, INSUFFICIENT)),
    ];

    if let Some(category) = plot.category {
        lines.push(format!("  category:    {category}"));
    }
    lines.push(format!(
        "  regression:  {}",
        plot.regression.map_or_else(
            || INSUFFICIENT.to_string(),
            |line| format!("y = {:.3}x {:+.3}", line.slope, line.intercept)
        )
    ));

    if !plot.points.is_empty() {
        lines.push(String::new());
        lines.push(format!("{:<4} {:<22} {:>10} {:>10}", "CODE", "NAME", "X", "Y"));
        lines.push("-".repeat(49));
        for point in &plot.points {
            lines.push(format!(
                "{:<4} {:<22} {:>10.2} {:>10.2}",
                point.state, point.name, point.x, point.y
            ));
        }
    }

    lines.join("\n")
}

/// Year x pollutant grid of correlation coefficients.
#[must_use]
pub fn matrix(grid: &CorrelationMatrix) -> String {
    let mut header = format!("{:<6}", "YEAR");
    for pollutant in &grid.pollutants {
        header.push_str(&format!(" {:>18}", pollutant.to_string()));
    }

    let mut lines = vec![header, "-".repeat(6 + 19 * grid.pollutants.len())];

    for &year in &grid.years {
        let mut line = format!("{year:<6}");
        for &pollutant in &grid.pollutants {
            let coefficient = grid
                .cell(year, pollutant)
                .and_then(|c| c.sample.as_ref())
                .map(|s| s.coefficient);
            line.push_str(&format!(" {:>18}", number(coefficient, 3, INSUFFICIENT)));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// One row per metric, one column per year.
#[must_use]
pub fn history(record: &StateHistory) -> String {
    let mut header = format!("{:<18}", "METRIC");
    for year in &record.years {
        header.push_str(&format!(" {year:>8}"));
    }
    header.push_str(&format!(" {:>9}", "REPORTED"));

    let mut lines = vec![
        format!("{} ({})", record.name, record.state),
        header,
        "-".repeat(18 + 9 * record.years.len() + 10),
    ];

    for series in &record.series {
        let mut line = format!("{:<18}", series.metric.to_string());
        for &year in &record.years {
            line.push_str(&format!(" {:>8}", number(series.value_for(year), 2, MISSING)));
        }
        line.push_str(&format!(
            " {:>9}",
            format!("{}/{}", series.present().len(), series.len())
        ));
        lines.push(line);
    }

    lines.join("\n")
}

/// One line per trend statement.
#[must_use]
pub fn trends(report: &TrendReport) -> String {
    let mut lines = vec![format!(
        "Trends in correlation (threshold {}, at least {} years)",
        report.settings.significance_threshold, report.settings.min_points
    )];
    lines.extend(report.statements.iter().map(|s| format!("  {}", s.summary)));
    lines.join("\n")
}
