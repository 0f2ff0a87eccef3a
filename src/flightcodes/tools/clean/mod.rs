//! Column-level cleaning steps applied to a flight [`Table`].
//!
//! Each step mutates one table in place and fails fast: a step either
//! rewrites the whole column or leaves the caller with an error and no
//! half-cleaned output worth printing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::flightcodes::tools::error::{Result, ToolError};
use crate::flightcodes::tools::model::{CellValue, Table};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Default spacing between generated codes for [`FillPolicy::Sequence`].
pub const DEFAULT_SEQUENCE_STEP: i64 = 10;

/// Removes every character that is neither a word character nor whitespace,
/// then trims the result.
pub fn clean_airline_code(raw: &str) -> String {
    NON_WORD.replace_all(raw, "").trim().to_string()
}

/// Applies [`clean_airline_code`] to every non-null cell of a column.
pub fn clean_text_column(table: &mut Table, column: &str) -> Result<()> {
    table.map_column(column, |_, cell| {
        Ok(match cell {
            CellValue::Null => CellValue::Null,
            CellValue::Text(text) => CellValue::Text(clean_airline_code(text)),
            other => CellValue::Text(clean_airline_code(&other.to_string())),
        })
    })
}

/// How missing numeric cells are recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Linear interpolation in row order; edges take the nearest known value.
    #[default]
    Interpolate,
    /// Gap at row `i` takes the `i`-th element of `min, min + step, ..., max`.
    Sequence { step: i64 },
}

/// Fills the gaps of a numeric column and coerces it to integers.
pub fn fill_missing_codes(table: &mut Table, column: &str, policy: FillPolicy) -> Result<()> {
    let values = numeric_values(table, column)?;
    let gaps = values.iter().filter(|value| value.is_none()).count();

    let filled = match policy {
        FillPolicy::Interpolate => interpolate_linear(column, &values)?,
        FillPolicy::Sequence { step } => fill_from_sequence(column, &values, step)?,
    };
    debug!(column, gaps, ?policy, "filled missing codes");

    table.replace_column(column, filled.into_iter().map(CellValue::Integer).collect())
}

fn numeric_values(table: &Table, column: &str) -> Result<Vec<Option<f64>>> {
    table
        .column_values(column)?
        .iter()
        .map(|cell| match cell {
            CellValue::Null => Ok(None),
            CellValue::Text(_) => Err(ToolError::NonNumericColumn {
                column: column.to_string(),
            }),
            other => Ok(other.as_f64()),
        })
        .collect()
}

/// Linear interpolation over row positions, filling in both directions.
/// Values are truncated toward zero.
pub fn interpolate_linear(column: &str, values: &[Option<f64>]) -> Result<Vec<i64>> {
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| value.map(|value| (index, value)))
        .collect();
    if known.is_empty() {
        return Err(ToolError::NoAnchorValues {
            column: column.to_string(),
        });
    }

    // `next` is the first known entry at or after the current row.
    let mut next = 0;
    let mut filled = Vec::with_capacity(values.len());
    for index in 0..values.len() {
        while next < known.len() && known[next].0 < index {
            next += 1;
        }
        let value = match (next.checked_sub(1).map(|prev| known[prev]), known.get(next)) {
            (_, Some(&(at, value))) if at == index => value,
            (Some((lo, lo_value)), Some(&(hi, hi_value))) => {
                let ratio = (index - lo) as f64 / (hi - lo) as f64;
                lo_value + (hi_value - lo_value) * ratio
            }
            (Some((_, value)), None) => value,
            (None, Some(&(_, value))) => value,
            (None, None) => unreachable!("known values are non-empty"),
        };
        filled.push(value.trunc() as i64);
    }
    Ok(filled)
}

/// Fills gaps from an evenly spaced sequence spanning the known values.
pub fn fill_from_sequence(column: &str, values: &[Option<f64>], step: i64) -> Result<Vec<i64>> {
    if step <= 0 {
        return Err(ToolError::InvalidLiteral {
            column: column.to_string(),
            value: step.to_string(),
        });
    }
    let known = values.iter().flatten().map(|value| value.trunc() as i64);
    let (Some(min), Some(max)) = (known.clone().min(), known.max()) else {
        return Err(ToolError::NoAnchorValues {
            column: column.to_string(),
        });
    };

    values
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(value) => Ok(value.trunc() as i64),
            None => i64::try_from(row)
                .ok()
                .and_then(|row| step.checked_mul(row))
                .and_then(|offset| min.checked_add(offset))
                .filter(|code| *code <= max)
                .ok_or_else(|| ToolError::SequenceExhausted {
                    column: column.to_string(),
                    row,
                }),
        })
        .collect()
}

/// Letter case applied to split route locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteCase {
    #[default]
    Upper,
    Title,
}

impl RouteCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            RouteCase::Upper => text.to_uppercase(),
            RouteCase::Title => title_case(text),
        }
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Splits a route on the only occurrence of `separator`.
///
/// Returns `None` unless there is exactly one separator with a non-empty
/// part on each side.
pub fn split_route_value(value: &str, separator: char) -> Option<(&str, &str)> {
    let (from, to) = value.split_once(separator)?;
    if from.is_empty() || to.is_empty() || to.contains(separator) {
        return None;
    }
    Some((from, to))
}

/// Splits the combined route column into two new columns appended to the
/// table, in `targets` order.
pub fn split_route(
    table: &mut Table,
    column: &str,
    separator: char,
    targets: (&str, &str),
    case: RouteCase,
) -> Result<()> {
    let routes = table.column_values(column)?;
    let mut origins = Vec::with_capacity(routes.len());
    let mut destinations = Vec::with_capacity(routes.len());

    for (row, cell) in routes.iter().enumerate() {
        let text = match cell {
            CellValue::Null => None,
            other => Some(other.to_string()),
        };
        let (from, to) = text
            .as_deref()
            .and_then(|text| split_route_value(text, separator))
            .ok_or_else(|| ToolError::InvalidRoute {
                row,
                value: cell.to_string(),
            })?;
        origins.push(CellValue::Text(case.apply(from)));
        destinations.push(CellValue::Text(case.apply(to)));
    }

    table.push_column(targets.0, origins)?;
    table.push_column(targets.1, destinations)
}
