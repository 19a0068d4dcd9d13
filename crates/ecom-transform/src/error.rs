//! Error types for the cleaning pipeline.

use ecom_ingest::IngestError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that abort a cleaning run.
///
/// Per-cell parse failures never surface here; they become missing values.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Loading or persisting the table failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A DataFrame operation failed.
    #[error("DataFrame operation failed: {0}")]
    Frame(#[from] PolarsError),
}

impl TransformError {
    /// True when the input table's location does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransformError::Ingest(err) if err.is_not_found())
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, TransformError>;
