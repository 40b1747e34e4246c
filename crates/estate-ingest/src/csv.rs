//! CSV reading and writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};

use estate_model::Table;

use crate::error::{IngestError, Result};

/// Reads a CSV file with a single header row into a frame.
///
/// Dtypes are inferred from every row, so a stray text cell late in a
/// numeric column widens that column to `String` instead of failing.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Writes every row of `table` as CSV, returning the number of rows written.
pub fn write_csv(table: &Table, path: &Path) -> Result<usize> {
    let mut file = File::create(path).map_err(|e| IngestError::io(path, e))?;
    write_csv_to(table, &mut file).map_err(|e| IngestError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Writes every row of `table` as CSV to an arbitrary writer.
pub fn write_csv_to<W: Write>(table: &Table, writer: &mut W) -> Result<usize> {
    let mut frame = table.frame().clone();
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(frame.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_frame() {
        let file = create_temp_csv("Final Location,Year,Price\nWakad,2020,6500\nAundh,2021,8100\n");
        let df = read_csv_frame(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_read_csv_frame_late_text_cell_widens_column() {
        let mut content = String::from("area,year,price\n");
        for idx in 0..150 {
            content.push_str(&format!("Wakad,{},{}\n", 2000 + idx % 20, 6000 + idx));
        }
        content.push_str("Wakad,2001,N/A\n");
        let file = create_temp_csv(&content);

        let df = read_csv_frame(file.path()).unwrap();

        assert_eq!(df.height(), 151);
        assert_eq!(
            df.column("price").unwrap().dtype(),
            &polars::prelude::DataType::String
        );
        assert_eq!(
            df.column("year").unwrap().dtype(),
            &polars::prelude::DataType::Int64
        );
    }

    #[test]
    fn test_read_csv_frame_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_frame(file.path());

        assert!(matches!(result, Err(IngestError::CsvParse { .. })));
    }

    #[test]
    fn test_write_csv_to_buffer() {
        let file = create_temp_csv("area,year\nBaner,2020\nBaner,2021\n");
        let table = Table::from_frame(read_csv_frame(file.path()).unwrap()).unwrap();

        let mut buffer = Vec::new();
        let written = write_csv_to(&table, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(written, 2);
        assert_eq!(text, "area,year\nBaner,2020\nBaner,2021\n");
    }
}
