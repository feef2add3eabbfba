use std::path::PathBuf;
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Source spreadsheet does not exist or is not a readable file
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Required column absent from the extracted schema
    #[error("Missing required column: {column}")]
    Schema { column: String },

    /// Relational load failure, wrapping the connector error
    #[error("Failed to load table {table}: {source}")]
    Load {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Spreadsheet reading
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// CSV processing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}
