//! Data model for e-commerce transaction preparation.
//!
//! - **columns**: column vocabulary of the raw export and the cleaned table
//! - **detected**: which recognized source columns an input carries
//! - **report**: outcome types shared by the reporting crate and the CLI

pub mod columns;
pub mod detected;
pub mod report;

pub use detected::DetectedColumns;
pub use report::{ModelOutcome, SkipReason, TrainedModel};
