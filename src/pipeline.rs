//! Pipeline orchestration: extract, transform, load, summary assembly.
//!
//! Strictly sequential and synchronous. The relational load is optional and
//! runs after the flat file is written, so a sink failure leaves the CSV
//! output intact.

use crate::errors::AppResult;
use crate::extract::extract;
use crate::load::{flat_file, TableSink};
use crate::transform::transform;
use crate::types::EtlSummary;
use chrono::Local;
use std::path::PathBuf;
use tracing::{error, info};

/// Resolved inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source_file: PathBuf,
    pub output_csv: PathBuf,
    pub table_name: String,
}

/// Run the complete ETL pipeline.
///
/// Extracts the source spreadsheet, cleans it, writes the flat file, then
/// replaces the relational table when a sink is supplied. The summary is
/// only returned when every stage succeeds.
pub fn run_etl_pipeline(
    options: &PipelineOptions,
    sink: Option<&mut dyn TableSink>,
) -> AppResult<EtlSummary> {
    let start_time = Local::now();
    info!("{}", "=".repeat(50));
    info!("Starting ETL Pipeline");
    info!("{}", "=".repeat(50));

    let raw = extract(&options.source_file)?;
    let (clean, stats) = transform(&raw)?;

    flat_file::write(&clean, &options.output_csv)?;

    if let Some(sink) = sink {
        info!("Loading data to table: {}", options.table_name);
        match sink.replace(&options.table_name, &clean) {
            Ok(rows) => info!("Successfully loaded {} rows to {}", rows, options.table_name),
            Err(e) => {
                error!("Failed to load to table {}: {}", options.table_name, e);
                return Err(e);
            }
        }
    }

    let end_time = Local::now();
    let duration_seconds = (end_time - start_time)
        .to_std()
        .unwrap_or_default()
        .as_secs_f64();

    let summary = EtlSummary {
        status: "SUCCESS".to_string(),
        start_time,
        end_time,
        duration_seconds,
        rows_extracted: raw.len(),
        rows_loaded: clean.len(),
        rows_removed: stats.rows_removed(),
        output_file: options.output_csv.display().to_string(),
    };

    info!("{}", "=".repeat(50));
    info!("ETL Pipeline Complete!");
    info!("Duration: {:.2} seconds", summary.duration_seconds);
    info!("Rows processed: {}", summary.rows_loaded);
    info!("{}", "=".repeat(50));

    Ok(summary)
}
