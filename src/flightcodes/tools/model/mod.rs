use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flightcodes::tools::error::{Result, ToolError};

/// Header carrying the free-text airline name.
pub const AIRLINE_CODE: &str = "Airline Code";
/// Header carrying the literal list of delays, e.g. `[21, 40]`.
pub const DELAY_TIMES: &str = "DelayTimes";
/// Header carrying the numeric flight code.
pub const FLIGHT_CODES: &str = "FlightCodes";
/// Header carrying the combined `origin_destination` route.
pub const ROUTE: &str = "To_From";
/// Header of the origin column derived from [`ROUTE`].
pub const FROM: &str = "From";
/// Header of the destination column derived from [`ROUTE`].
pub const TO: &str = "To";

/// A single cell of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text, kept exactly as read.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Missing value.
    Null,
}

impl CellValue {
    /// Returns the numeric value of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Float(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Null => f.write_str("NaN"),
        }
    }
}

/// Row-major table with named columns. Row order is the source order and is
/// significant for gap filling.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates a table, checking that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ToolError::MalformedRow {
                    line: index as u64 + 2,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ToolError::MissingColumn(name.to_string()))
    }

    /// Clones the values of one column in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<CellValue>> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].clone()).collect())
    }

    /// Rewrites every cell of a column in place.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &CellValue) -> Result<CellValue>,
    {
        let index = self.column_index(name)?;
        for (row_index, row) in self.rows.iter_mut().enumerate() {
            row[index] = f(row_index, &row[index])?;
        }
        Ok(())
    }

    /// Replaces a column with new values of the same length.
    pub fn replace_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        let index = self.column_index(name)?;
        if values.len() != self.rows.len() {
            return Err(ToolError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
        Ok(())
    }

    /// Appends a new column at the right edge of the table.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<CellValue>) -> Result<()> {
        let name = name.into();
        if self.columns.contains(&name) {
            return Err(ToolError::DuplicateColumn(name));
        }
        if values.len() != self.rows.len() {
            return Err(ToolError::ColumnLength {
                column: name,
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Removes a column and its values from every row.
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let index = self.column_index(name)?;
        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
        Ok(())
    }

    /// Copy of the first `limit` rows.
    pub fn head(&self, limit: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(limit).cloned().collect(),
        }
    }
}

/// One cleaned flight, as produced by the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// `None` when the source row had no airline text at all.
    pub airline_code: Option<String>,
    pub delay_times: Vec<i64>,
    pub flight_code: i64,
    pub from_location: String,
    pub to_location: String,
}

/// Converts a fully transformed table into typed records.
pub fn records_from_table(table: &Table) -> Result<Vec<FlightRecord>> {
    let airline = table.column_index(AIRLINE_CODE)?;
    let delays = table.column_index(DELAY_TIMES)?;
    let flight = table.column_index(FLIGHT_CODES)?;
    let from = table.column_index(FROM)?;
    let to = table.column_index(TO)?;

    table
        .rows
        .iter()
        .map(|row| {
            Ok(FlightRecord {
                airline_code: optional_text_cell(&row[airline]),
                delay_times: delay_cell(&row[delays])?,
                flight_code: integer_cell(FLIGHT_CODES, &row[flight])?,
                from_location: text_cell(FROM, &row[from])?,
                to_location: text_cell(TO, &row[to])?,
            })
        })
        .collect()
}

fn text_cell(column: &str, cell: &CellValue) -> Result<String> {
    match cell {
        CellValue::Null => Err(invalid_literal(column, cell)),
        other => Ok(other.to_string()),
    }
}

fn optional_text_cell(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Null => None,
        other => Some(other.to_string()),
    }
}

fn integer_cell(column: &str, cell: &CellValue) -> Result<i64> {
    match cell {
        CellValue::Integer(value) => Ok(*value),
        other => Err(invalid_literal(column, other)),
    }
}

fn delay_cell(cell: &CellValue) -> Result<Vec<i64>> {
    match cell {
        CellValue::Null => Ok(Vec::new()),
        CellValue::Text(text) => {
            serde_json::from_str(text).map_err(|_| invalid_literal(DELAY_TIMES, cell))
        }
        // A column of bare numbers is read as single-delay lists.
        CellValue::Integer(value) => Ok(vec![*value]),
        CellValue::Float(value) if value.fract() == 0.0 => Ok(vec![*value as i64]),
        other => Err(invalid_literal(DELAY_TIMES, other)),
    }
}

fn invalid_literal(column: &str, cell: &CellValue) -> ToolError {
    ToolError::InvalidLiteral {
        column: column.to_string(),
        value: cell.to_string(),
    }
}
