//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub form: FormConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Form submission endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormConfig {
    /// Target URL for the form-encoded answer submission
    pub url: String,
    /// Form field name that receives the respondent's name
    pub name_field: String,
    pub timeout_seconds: u64,
}

/// Question catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the question catalog JSON file
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000i64)?
            .set_default("form.url", "")?
            .set_default("form.name_field", "entry.242666768")?
            .set_default("form.timeout_seconds", 10i64)?
            .set_default("catalog.path", "questions.json")?
            .set_default("logging.level", "info")?
            .set_default("logging.file_path", "logs")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("AUDIENCIA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            form: FormConfig {
                url: String::new(),
                name_field: "entry.242666768".to_string(),
                timeout_seconds: 10,
            },
            catalog: CatalogConfig {
                path: "questions.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
