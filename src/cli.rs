use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::load::SqliteSink;
use crate::pipeline::{run_etl_pipeline, PipelineOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Sales ETL Pipeline
#[derive(Parser)]
#[command(name = "sales-etl")]
#[command(about = "Sales ETL pipeline - spreadsheet in, cleaned CSV and relational table out")]
#[command(version)]
pub struct Cli {
    /// Path to the source spreadsheet (overrides config.toml and env vars)
    #[arg(long)]
    source_file: Option<PathBuf>,

    /// Path for the cleaned CSV output (overrides config.toml and env vars)
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Database connection string; the relational load only runs when set
    #[arg(long)]
    database_url: Option<String>,

    /// Target table name for the relational load (overrides config.toml)
    #[arg(long)]
    table: Option<String>,
}

pub fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "info" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();
    let app_config = AppConfig::get_defaults()?;

    // CLI arguments override config values
    let options = PipelineOptions {
        source_file: cli.source_file.unwrap_or(app_config.paths.source_file),
        output_csv: cli.output_csv.unwrap_or(app_config.paths.output_csv),
        table_name: cli.table.unwrap_or(app_config.database.table),
    };
    let database_url = cli.database_url.or(app_config.database.url);

    info!("Configuration:");
    info!("  Source file: {}", options.source_file.display());
    info!("  Output CSV: {}", options.output_csv.display());
    info!("  Table: {}", options.table_name);
    match &database_url {
        Some(url) => info!("  Database: {}", url),
        None => info!("  Database: (relational load disabled)"),
    }

    let summary = match database_url {
        Some(url) => {
            let mut sink = SqliteSink::open(&url)?;
            run_etl_pipeline(&options, Some(&mut sink))?
        }
        None => run_etl_pipeline(&options, None)?,
    };

    println!("\nETL Summary:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
