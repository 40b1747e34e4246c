//! Error types for dataset loading and export.

use std::path::{Path, PathBuf};

use estate_model::TableError;
use thiserror::Error;

/// Errors that can occur while loading or exporting a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset file not found.
    #[error("dataset file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or write a file.
    #[error("failed to access file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not a supported tabular format.
    #[error("unsupported dataset format for {path} (expected .csv, .xlsx, .xls, .xlsm, .xlsb or .ods)")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook has no worksheet with a header row.
    #[error("workbook has no data: {path}")]
    EmptyWorkbook { path: PathBuf },

    // === Schema Errors ===
    /// A column header is blank.
    #[error("column {index} in {path} has an empty name")]
    EmptyColumnName { path: PathBuf, index: usize },

    /// Two headers collapse to the same normalized name.
    #[error("columns in {path} normalize to the same name '{name}'")]
    DuplicateColumn { path: PathBuf, name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Failed to write an export.
    #[error("failed to export {path}: {message}")]
    Export { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn from_table(err: TableError, path: &Path) -> Self {
        match err {
            TableError::EmptyColumnName { index } => Self::EmptyColumnName {
                path: path.to_path_buf(),
                index,
            },
            TableError::DuplicateColumn { name } => Self::DuplicateColumn {
                path: path.to_path_buf(),
                name,
            },
            TableError::Polars(err) => err.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
