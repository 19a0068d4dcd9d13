//! CSV file reading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, PolarsError, SerReader};

use crate::error::{IngestError, Result};

fn parse_error(path: &Path, err: PolarsError) -> IngestError {
    match err {
        PolarsError::NoData(_) => IngestError::EmptyCsv {
            path: path.to_path_buf(),
        },
        other => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

/// Reads a CSV file with a header row into a Polars DataFrame.
///
/// The schema is inferred over every row: a currency column whose first rows
/// happen to be plain numbers must still load as text when a later row reads
/// `$1,250.00`.
///
/// Fails with [`IngestError::FileNotFound`] when the path does not exist and
/// with [`IngestError::EmptyCsv`] when the file has no header row.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_error(path, e))?
        .finish()
        .map_err(|e| parse_error(path, e))?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_error_maps_no_data() {
        let err = parse_error(Path::new("a.csv"), PolarsError::NoData("empty CSV".into()));
        assert!(matches!(err, IngestError::EmptyCsv { .. }));

        let err = parse_error(Path::new("a.csv"), PolarsError::ComputeError("bad".into()));
        assert!(matches!(err, IngestError::CsvParse { .. }));
    }

    #[test]
    fn test_read_csv_table_keeps_currency_as_text() {
        let file = create_temp_csv(
            "Customer_ID,Purchase_Amount\n1,\"$1,234.50\"\n2,89.00\n",
        );
        let df = read_csv_table(file.path()).unwrap();
        assert_eq!(df.shape(), (2, 2));
        let amount = df.column("Purchase_Amount").unwrap();
        assert_eq!(amount.dtype(), &polars::prelude::DataType::String);
    }
}
