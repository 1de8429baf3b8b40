//! Shared CSV helpers used by every dataset reader.

use std::io::Read;

use csv::StringRecord;

use crate::DatasetError;

/// Builds a CSV reader that tolerates ragged rows and surrounding
/// whitespace.
pub fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Finds the index of a header, ignoring ASCII case.
#[must_use]
pub fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

/// Like [`column_index`], but a missing column is an error.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumn`] if no header matches `name`.
pub fn require_column(
    headers: &StringRecord,
    name: &str,
    dataset: &'static str,
) -> Result<usize, DatasetError> {
    column_index(headers, name).ok_or_else(|| DatasetError::MissingColumn {
        dataset,
        column: name.to_string(),
    })
}

/// Parses a numeric cell. Empty cells, placeholders such as `null` or
/// `NA`, unparseable text, and non-finite numbers all count as absent.
#[must_use]
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a year cell. Accepts integral floats such as `2019.0`, which
/// spreadsheet exports commonly produce.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_year(cell: Option<&str>) -> Option<i32> {
    let cell = cell?.trim();
    if let Ok(year) = cell.parse::<i32>() {
        return Some(year);
    }
    let value = cell.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value.abs() < f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}
