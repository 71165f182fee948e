//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured before the
//! server starts taking traffic.

use crate::utils::errors::{BotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_form_config(&settings.form)?;
    validate_catalog_config(&settings.catalog)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP listener configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BotError::Config(
            "Server host is required".to_string()
        ));
    }

    Ok(())
}

/// Validate form submission configuration
fn validate_form_config(config: &super::FormConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BotError::Config(
            "Form submission URL is required".to_string()
        ));
    }

    url::Url::parse(&config.url)
        .map_err(|e| BotError::Config(format!("Invalid form submission URL: {}", e)))?;

    if config.name_field.is_empty() {
        return Err(BotError::Config(
            "Form name field is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(BotError::Config(
            "Form submission timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate question catalog configuration
fn validate_catalog_config(config: &super::CatalogConfig) -> Result<()> {
    if config.path.is_empty() {
        return Err(BotError::Config(
            "Question catalog path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
