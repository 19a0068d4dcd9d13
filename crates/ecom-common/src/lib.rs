//! Shared utilities for the e-commerce preparation crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars `AnyValue` coercion helpers.

pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use values::{
    any_to_f64, any_to_string, column_f64_values, format_numeric, is_numeric_dtype, parse_f64,
};
