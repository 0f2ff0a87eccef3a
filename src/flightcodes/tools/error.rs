use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool parses, cleans, or renders a flight table.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the delimited-text reader.
    #[error("delimited text error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the source text does not even carry a header row.
    #[error("input contains no header row")]
    EmptyInput,

    /// Raised when a data row does not have as many fields as the header.
    #[error("malformed row on line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Raised when a transformation references a column the table lacks.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// Raised when a replacement or new column does not match the table height.
    #[error("column '{column}' has {found} values but the table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Raised when a new column would shadow an existing one.
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    /// Raised when a gap fill has no known value to work from.
    #[error("column '{column}' has no numeric values to fill gaps from")]
    NoAnchorValues { column: String },

    /// Raised when the sequence fill runs out of values before the gaps do.
    #[error("generated sequence for column '{column}' has no value for row {row}")]
    SequenceExhausted { column: String, row: usize },

    /// Raised when a numeric operation meets a text cell.
    #[error("column '{column}' contains non-numeric values")]
    NonNumericColumn { column: String },

    /// Raised when a combined route cannot be split into two locations.
    #[error("route '{value}' on row {row} does not split into exactly two non-empty parts")]
    InvalidRoute { row: usize, value: String },

    /// Raised when a cell cannot be converted into its typed record field.
    #[error("invalid literal value '{value}' in column {column}")]
    InvalidLiteral { column: String, value: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
