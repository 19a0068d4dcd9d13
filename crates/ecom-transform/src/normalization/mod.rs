//! Normalization functions for raw transaction cells.
//!
//! - **amount**: currency text to `f64`
//! - **date**: mixed-separator month/day/year text to calendar dates
//! - **features**: year/month/day/weekday derived from a date

pub mod amount;
pub mod date;
pub mod features;

// Re-export commonly used items
pub use amount::{MISSING_TOKENS, normalize_amount, normalize_amount_column, normalize_amount_value};
pub use date::{
    date_from_epoch_days, date_series, epoch_days, normalize_date,
    normalize_date_value, normalize_date_values,
};
pub use features::{
    DateFeatures, add_date_features, date_cell, date_feature_columns, date_values,
    derive_date_features, weekday_name,
};
