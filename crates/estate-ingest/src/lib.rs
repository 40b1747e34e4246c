//! Dataset ingestion for Estate Insight.
//!
//! This crate turns a CSV file or spreadsheet workbook into a [`Table`]
//! with normalized column names, and writes tables back out as CSV.
//!
//! # Example
//!
//! ```ignore
//! use estate_ingest::{FileTableSource, TableSource};
//!
//! let table = FileTableSource::new("data/listings.xlsx").load()?;
//! println!("{} rows", table.height());
//! ```
//!
//! [`Table`]: estate_model::Table

mod csv;
mod error;
mod excel;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers / Writers ===
pub use csv::{read_csv_frame, write_csv, write_csv_to};
pub use excel::read_excel_frame;

// === Sources ===
pub use source::{DatasetFormat, FileTableSource, FrameTableSource, TableSource};
