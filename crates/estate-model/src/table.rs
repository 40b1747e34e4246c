//! The in-memory dataset and its row representation.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray, PolarsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use estate_common::any_to_string;

/// Errors raised while wrapping a frame as a [`Table`].
#[derive(Debug, Error)]
pub enum TableError {
    /// A header was blank after trimming.
    #[error("column {index} has an empty name")]
    EmptyColumnName { index: usize },

    /// Two headers normalized to the same name.
    #[error("columns normalize to the same name '{name}'")]
    DuplicateColumn { name: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Normalizes a raw header: trimmed, lower-cased, spaces replaced by `_`.
///
/// ```
/// use estate_model::normalize_column_name;
///
/// assert_eq!(normalize_column_name("  Final Location "), "final_location");
/// assert_eq!(normalize_column_name("Avg Price (INR)"), "avg_price_(inr)");
/// ```
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
        .to_lowercase()
        .replace(' ', "_")
}

/// A loaded dataset with normalized column names.
///
/// Construction through [`Table::from_frame`] is the only place names are
/// normalized; sub-tables derived from a table keep its names untouched.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

impl Table {
    /// Wraps a freshly loaded frame, normalizing its column names.
    pub fn from_frame(mut frame: DataFrame) -> Result<Self, TableError> {
        let mut normalized: Vec<String> = Vec::with_capacity(frame.width());
        for (index, raw) in frame.get_column_names().iter().enumerate() {
            let name = normalize_column_name(raw.as_str());
            if name.is_empty() {
                return Err(TableError::EmptyColumnName { index });
            }
            if normalized.contains(&name) {
                return Err(TableError::DuplicateColumn { name });
            }
            normalized.push(name);
        }
        frame.set_column_names(normalized.iter().map(String::as_str))?;
        Ok(Self { frame })
    }

    /// An empty table with no columns.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }

    /// Borrow the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Column names in their original order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Look up a column by its normalized name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.frame.column(name).ok()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Keeps the rows whose flag is `true`.
    pub fn filter_rows(&self, keep: &[bool]) -> Result<Self, TableError> {
        let mask = BooleanChunked::from_slice("mask".into(), keep);
        let frame = self.frame.filter(&mask)?;
        Ok(Self { frame })
    }

    /// Converts up to `limit` leading rows into serializable records.
    pub fn records(&self, limit: usize) -> Vec<Record> {
        let height = self.frame.height().min(limit);
        let columns = self.frame.get_columns();
        (0..height)
            .map(|idx| {
                columns
                    .iter()
                    .map(|column| {
                        let value = column.get(idx).unwrap_or(AnyValue::Null);
                        (column.name().to_string(), CellValue::from_any(value))
                    })
                    .collect()
            })
            .collect()
    }
}

/// One row of a table excerpt, keyed by column name.
pub type Record = BTreeMap<String, CellValue>;

/// A scalar cell value in a table excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn from_any(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Self::Null,
            AnyValue::Boolean(b) => Self::Bool(b),
            AnyValue::Int8(v) => Self::Integer(i64::from(v)),
            AnyValue::Int16(v) => Self::Integer(i64::from(v)),
            AnyValue::Int32(v) => Self::Integer(i64::from(v)),
            AnyValue::Int64(v) => Self::Integer(v),
            AnyValue::UInt8(v) => Self::Integer(i64::from(v)),
            AnyValue::UInt16(v) => Self::Integer(i64::from(v)),
            AnyValue::UInt32(v) => Self::Integer(i64::from(v)),
            AnyValue::UInt64(v) => {
                i64::try_from(v).map_or_else(|_| Self::Number(v as f64), Self::Integer)
            }
            AnyValue::Float32(v) => Self::number(f64::from(v)),
            AnyValue::Float64(v) => Self::number(v),
            other => Self::Text(any_to_string(other)),
        }
    }

    fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Null
        } else {
            Self::Number(value)
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{}", estate_common::format_numeric(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn normalizes_names_once_at_construction() {
        let frame = df! {
            " Final Location " => &["Wakad"],
            "Year" => &[2020i64],
            "Total Sales - IGR" => &[1.5f64],
        }
        .unwrap();
        let table = Table::from_frame(frame).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["final_location", "year", "total_sales_-_igr"]
        );
    }

    #[test]
    fn rejects_duplicate_normalized_names() {
        let frame = df! {
            "Price" => &[1i64],
            "price " => &[2i64],
        }
        .unwrap();
        let err = Table::from_frame(frame).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { ref name } if name == "price"));
    }

    #[test]
    fn filter_keeps_names() {
        let frame = df! {
            "Area" => &["A", "B", "C"],
            "Price" => &[1i64, 2, 3],
        }
        .unwrap();
        let table = Table::from_frame(frame).unwrap();
        let filtered = table.filter_rows(&[true, false, true]).unwrap();
        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.column_names(), vec!["area", "price"]);
    }

    #[test]
    fn records_convert_cells() {
        let frame = df! {
            "area" => &[Some("Wakad"), None],
            "price" => &[Some(7.5f64), None],
            "year" => &[2020i64, 2021],
        }
        .unwrap();
        let table = Table::from_frame(frame).unwrap();
        let records = table.records(10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["area"], CellValue::Text("Wakad".to_string()));
        assert_eq!(records[0]["price"], CellValue::Number(7.5));
        assert_eq!(records[1]["price"], CellValue::Null);
        assert_eq!(records[1]["year"], CellValue::Integer(2021));

        let json = serde_json::to_string(&records[1]).unwrap();
        assert_eq!(json, r#"{"area":null,"price":null,"year":2021}"#);
    }

    #[test]
    fn table_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Table>();
    }
}
