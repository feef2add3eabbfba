//! Loading stage: persist the cleaned dataset.
//!
//! - `flat_file`: comma-delimited text with a header row
//! - `table`: relational table replacement behind the `TableSink` trait

pub mod flat_file;
pub mod table;

pub use table::{SqliteSink, TableSink};
