//! Error handling for the audiencia bot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the audiencia bot application
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Question catalog error: {0}")]
    Catalog(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Form submission failed: {0}")]
    Submission(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for audiencia bot operations
pub type Result<T> = std::result::Result<T, BotError>;

impl BotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BotError::Config(_) => false,
            BotError::Catalog(_) => false,
            BotError::Http(_) => true,
            BotError::Submission(_) => true,
            BotError::Serialization(_) => false,
            BotError::Io(_) => true,
            BotError::UrlParse(_) => false,
            BotError::InvalidInput(_) => false,
        }
    }
}
