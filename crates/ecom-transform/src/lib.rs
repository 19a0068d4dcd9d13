//! Cleaning and normalization of e-commerce transaction tables.
//!
//! - **normalization**: currency amounts, mixed-format dates, calendar features
//! - **pipeline**: load a raw table, append cleaned columns, persist a checkpoint
//!
//! Malformed cells never fail a run; they become missing values. Only a missing
//! input (or an I/O failure) is reported as an error.

pub mod error;
pub mod normalization;
pub mod pipeline;

pub use error::{Result, TransformError};
pub use pipeline::{
    CleanOptions, CleanOutput, CleanSummary, DEFAULT_CHECKPOINT, DEFAULT_CSV, clean_frame,
    load_and_clean, run_clean,
};
