//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{Settings, ServerConfig, FormConfig, CatalogConfig, LoggingConfig};
