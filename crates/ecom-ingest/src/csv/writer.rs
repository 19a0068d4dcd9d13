//! CSV persistence for cleaned tables and report artifacts.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{IngestError, Result};

/// Creates a directory and any missing parents.
///
/// Called only when a write is about to happen; nothing creates output
/// directories ahead of time.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| IngestError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Ensures the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Writes a DataFrame as CSV with a header row, creating missing directories.
///
/// An existing file at `path` is overwritten in place. Dates are written as
/// `YYYY-MM-DD`.
pub fn write_csv_table(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).map_err(|e| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_date_format(Some("%Y-%m-%d".to_string()))
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote CSV table"
    );

    Ok(path.to_path_buf())
}
