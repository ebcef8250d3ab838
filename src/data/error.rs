//! Error types for loading, viewing and exporting debt tables.
//!
//! - [`DataError`] - the source file could not be turned into a table
//! - [`ViewError`] - the current filter selection produced nothing to show
//! - [`ExportError`] - the filtered view could not be serialized
//!
//! Unparsable numeric cells are not an error anywhere: they become missing
//! values during coercion.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Load errors
// =============================================================================

/// Errors while reading the source dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file does not exist. Fatal for the session.
    #[error("Data file not found: '{}'", .0.display())]
    MissingFile(PathBuf),

    /// No reader for this file extension.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The workbook has no worksheet to read.
    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Failed to decode parquet batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A column is not as long as the first one.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
}

// =============================================================================
// View errors
// =============================================================================

/// Soft failures of a render cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The active filters eliminated every row. No totals or export follow.
    #[error("No rows match the selected filters")]
    EmptyResult,
}

// =============================================================================
// Export errors
// =============================================================================

/// Failures while serializing a table slice. All of them abort the export
/// and leave the displayed table usable.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested layout names a column the table does not have.
    #[error("Column '{0}' is not part of the exported table")]
    UnknownColumn(String),

    /// A cell holds a value the spreadsheet format cannot represent.
    #[error("Cannot encode value in column '{column}', row {row}: {reason}")]
    Unencodable {
        column: String,
        row: usize,
        reason: String,
    },

    /// The slice exceeds the worksheet limits.
    #[error("Table of {rows} rows x {columns} columns exceeds worksheet limits")]
    TooLarge { rows: usize, columns: usize },

    #[error("Spreadsheet writer failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV writer failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
