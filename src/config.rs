//! Configuration management for the library console

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend root including the fixed `/api` base path
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Write logs to a daily file in this directory instead of stderr
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. LIBRARY_CONSOLE_API__BASE_URL
            .add_source(
                Environment::with_prefix("LIBRARY_CONSOLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Builder seeded with the built-in defaults
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let api = ApiConfig::default();
        let logging = LoggingConfig::default();

        Config::builder()
            .set_default("api.base_url", api.base_url)?
            .set_default("api.timeout_secs", api.timeout_secs)?
            .set_default("api.user_agent", api.user_agent)?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5087/api".to_string(),
            timeout_secs: 30,
            user_agent: format!("library-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}
