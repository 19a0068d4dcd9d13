//! CLI library components for `ecom-prep`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
