//! Workbook reading via calamine.
//!
//! The first worksheet with a header row becomes the dataset. The first row
//! is the header; column dtypes are inferred from the remaining cells.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

static EMPTY_CELL: Data = Data::Empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int,
    Float,
    Text,
}

/// Reads the first non-empty worksheet of a workbook into a frame.
pub fn read_excel_frame(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let sheet_names = workbook.sheet_names().to_vec();
    for (idx, sheet) in sheet_names.iter().enumerate() {
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| IngestError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let rows: Vec<&[Data]> = range.rows().collect();
        if rows.is_empty() {
            debug!(sheet = %sheet, "skipping empty worksheet");
            continue;
        }
        if sheet_names.len() > idx + 1 {
            warn!(
                path = %path.display(),
                sheet = %sheet,
                ignored_sheets = sheet_names.len() - idx - 1,
                "workbook has several sheets; using the first with data"
            );
        }
        return rows_to_frame(&rows);
    }
    Err(IngestError::EmptyWorkbook {
        path: path.to_path_buf(),
    })
}

fn rows_to_frame(rows: &[&[Data]]) -> Result<DataFrame> {
    let header = rows[0];
    let body = &rows[1..];
    let mut columns: Vec<Column> = Vec::with_capacity(header.len());
    for (col_idx, cell) in header.iter().enumerate() {
        let name = match cell {
            Data::Empty => format!("column_{}", col_idx + 1),
            other => other.to_string(),
        };
        let cells: Vec<&Data> = body
            .iter()
            .map(|row| row.get(col_idx).unwrap_or(&EMPTY_CELL))
            .collect();
        columns.push(cells_to_column(&name, &cells));
    }
    Ok(DataFrame::new(columns)?)
}

fn infer_kind(cells: &[&Data]) -> CellKind {
    let mut kind = CellKind::Int;
    for cell in cells {
        match cell {
            Data::Empty => {}
            Data::Int(_) => {}
            Data::Float(_) => kind = CellKind::Float,
            _ => return CellKind::Text,
        }
    }
    kind
}

fn cells_to_column(name: &str, cells: &[&Data]) -> Column {
    match infer_kind(cells) {
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(v) => Some(*v as f64),
                    Data::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Empty => None,
                    Data::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
    }
}
