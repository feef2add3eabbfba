//! Common Test Utilities
//!
//! Shared fixtures and stub sinks used across the integration tests.

use sales_etl::errors::{AppError, AppResult};
use sales_etl::load::TableSink;
use sales_etl::types::Dataset;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Standard header used by the sample sales fixtures.
pub const SALES_HEADER: &str = "Order_Date,Sales,Cost,Region";

/// Write a sales CSV fixture with the standard header and the given data
/// rows into `dir`, returning its path.
pub fn write_sales_csv(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{}", SALES_HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    path
}

/// Sink stub that records what it was asked to write.
#[derive(Default)]
pub struct RecordingSink {
    pub tables: Vec<String>,
    pub rows_written: usize,
}

impl TableSink for RecordingSink {
    fn replace(&mut self, table: &str, data: &Dataset) -> AppResult<usize> {
        self.tables.push(table.to_string());
        self.rows_written = data.len();
        Ok(data.len())
    }
}

/// Sink stub that always fails, simulating an unreachable database.
pub struct FailingSink;

impl TableSink for FailingSink {
    fn replace(&mut self, table: &str, _data: &Dataset) -> AppResult<usize> {
        Err(AppError::Load {
            table: table.to_string(),
            source: rusqlite::Error::QueryReturnedNoRows,
        })
    }
}
