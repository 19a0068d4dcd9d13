//! CSV reading and writing utilities.

mod reader;
mod writer;

pub use reader::read_csv_table;
pub use writer::{ensure_dir, ensure_parent_dir, write_csv_table};
