use serde::Deserialize;

/// Env var naming the settings file, without extension.
pub const CONFIG_ENV: &str = "SCAN_BRIDGE_CONFIG";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub connector: ConnectorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct ConnectorConfig {
    /// Scanner class the probe binary instantiates.
    pub scanner_class: String,
    pub batch_size: usize,
    /// Rows in the probe's synthetic table.
    #[serde(default = "default_rows")]
    pub rows: usize,
}

fn default_rows() -> usize {
    1000
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
