//! Dataset sources.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{info, warn};

use estate_model::Table;

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::excel::read_excel_frame;

/// Column count above which a load is reported as unusually wide.
const WIDE_DATASET_COLUMNS: usize = 500;

/// Something that can produce a [`Table`].
///
/// Loading is the only fallible step of answering a query; everything after
/// it works on the returned table.
pub trait TableSource {
    fn load(&self) -> Result<Table>;
}

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Workbook,
}

impl DatasetFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Loads a dataset from a CSV file or spreadsheet workbook.
#[derive(Debug, Clone)]
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileTableSource {
    fn load(&self) -> Result<Table> {
        let path = self.path.as_path();
        if !path.is_file() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = DatasetFormat::from_path(path).ok_or_else(|| {
            IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        let frame = match format {
            DatasetFormat::Csv => read_csv_frame(path)?,
            DatasetFormat::Workbook => read_excel_frame(path)?,
        };
        check_frame_shape(&frame, path);
        let table = Table::from_frame(frame).map_err(|e| IngestError::from_table(e, path))?;
        info!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "dataset loaded"
        );
        Ok(table)
    }
}

/// Wraps a frame already in memory.
#[derive(Debug, Clone)]
pub struct FrameTableSource {
    frame: DataFrame,
}

impl FrameTableSource {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl TableSource for FrameTableSource {
    fn load(&self) -> Result<Table> {
        Table::from_frame(self.frame.clone())
            .map_err(|e| IngestError::from_table(e, Path::new("<memory>")))
    }
}

fn check_frame_shape(frame: &DataFrame, path: &Path) {
    if frame.height() == 0 {
        warn!(path = %path.display(), "dataset has no rows");
    }
    if frame.width() > WIDE_DATASET_COLUMNS {
        warn!(
            path = %path.display(),
            columns = frame.width(),
            "dataset has more than {WIDE_DATASET_COLUMNS} columns"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("a/listings.CSV")),
            Some(DatasetFormat::Csv)
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("sample_data.xlsx")),
            Some(DatasetFormat::Workbook)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(DatasetFormat::from_path(Path::new("README")), None);
    }
}
