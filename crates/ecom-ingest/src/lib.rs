//! Transaction table ingestion.
//!
//! This crate loads raw e-commerce transaction exports (CSV files with a header
//! row) into Polars DataFrames and persists cleaned tables back to CSV.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ecom_ingest::{read_csv_table, write_csv_table};
//!
//! let mut df = read_csv_table(Path::new("data/raw/orders.csv"))?;
//! write_csv_table(&mut df, Path::new("data/processed/orders.csv"))?;
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{ensure_dir, ensure_parent_dir, read_csv_table, write_csv_table};
