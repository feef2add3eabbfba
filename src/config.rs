use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub source_file: PathBuf,
    pub output_csv: PathBuf,
}

/// Relational sink configuration. The load only runs when a connection
/// string is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    pub table: String,
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("paths.source_file", "sales_raw_500.xlsx")?
            .set_default("paths.output_csv", "sales_cleaned.csv")?
            .set_default("database.table", "sales_data")?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // SALES_* env variables override file configuration
            .add_source(config::Environment::with_prefix("SALES").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Check for specific environment variables with custom names
        if let Ok(source) = env::var("SALES_SOURCE_FILE") {
            app_config.paths.source_file = PathBuf::from(source);
        }

        if let Ok(output) = env::var("SALES_OUTPUT_CSV") {
            app_config.paths.output_csv = PathBuf::from(output);
        }

        if let Ok(url) = env::var("SALES_DATABASE_URL") {
            app_config.database.url = Some(url);
        }

        if let Ok(table) = env::var("SALES_TABLE") {
            app_config.database.table = table;
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self {
                paths: PathsConfig {
                    source_file: PathBuf::from("sales_raw_500.xlsx"),
                    output_csv: PathBuf::from("sales_cleaned.csv"),
                },
                database: DatabaseConfig {
                    url: None,
                    table: "sales_data".to_string(),
                },
            }),
        }
    }
}
