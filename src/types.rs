//! Sales ETL Pipeline - Type System
//!
//! - `dataset`: In-memory tabular data (Value cells, Dataset)
//! - `summary`: Pipeline run summary and transform statistics

mod dataset;
mod summary;

pub use dataset::{Dataset, Value, ValueKey};
pub use summary::{EtlSummary, TransformStats};
