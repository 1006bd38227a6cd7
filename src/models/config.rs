use std::path::PathBuf;

use serde::Deserialize;

/// Configuration options for the catalog tooling.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Where the machine migration writes its summary report.
    #[serde(default = "default_migration_log_path")]
    pub migration_log_path: PathBuf,
}

fn default_migration_log_path() -> PathBuf {
    PathBuf::from("migration-log.txt")
}

impl AppConfig {
    /// Load settings from `path` (any extension supported by `config`, the
    /// file is optional) and then from `APP_*` environment variables.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
