use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::flightcodes::tools::error::{Result, ToolError};
use crate::flightcodes::tools::model::{CellValue, Table};

/// Field separator used by the flight data sets.
pub const DELIMITER: u8 = b';';

/// Reads a semicolon-delimited file into a [`Table`].
pub fn read_table_from_path(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    read_table_from_str(&source)
}

/// Parses semicolon-delimited text whose first row is the header.
///
/// Every data row must have exactly as many fields as the header. Column
/// types are inferred once the whole column has been read.
pub fn read_table_from_str(source: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(source.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(ToolError::EmptyInput);
    }

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        check_shape(&record, columns.len())?;
        raw_rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(
        columns = columns.len(),
        rows = raw_rows.len(),
        "read delimited records"
    );

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|index| infer_kind(raw_rows.iter().map(|row| row[index].as_str())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&kinds)
                .map(|(raw, kind)| kind.convert(raw))
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

fn check_shape(record: &StringRecord, expected: usize) -> Result<()> {
    if record.len() == expected {
        return Ok(());
    }
    Err(ToolError::MalformedRow {
        line: record.position().map(|position| position.line()).unwrap_or(0),
        expected,
        found: record.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    fn convert(self, raw: String) -> CellValue {
        if raw.is_empty() {
            return CellValue::Null;
        }
        match self {
            ColumnKind::Integer => raw
                .trim()
                .parse()
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Text(raw)),
            ColumnKind::Float => raw
                .trim()
                .parse()
                .map(CellValue::Float)
                .unwrap_or(CellValue::Text(raw)),
            ColumnKind::Text => CellValue::Text(raw),
        }
    }
}

/// Narrowest kind that fits every non-empty cell. An all-empty column is
/// numeric so that it can still take part in gap filling.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for cell in cells.filter(|cell| !cell.is_empty()) {
        let trimmed = cell.trim();
        if kind == ColumnKind::Integer && trimmed.parse::<i64>().is_err() {
            kind = ColumnKind::Float;
        }
        if kind == ColumnKind::Float && trimmed.parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    kind
}
