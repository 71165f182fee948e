//! Audiencia WhatsApp Survey Bot
//!
//! A webhook-driven WhatsApp bot that walks each sender through a fixed
//! question catalog for LOA public budget hearings and forwards the
//! collected answers to an external form endpoint.

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod services;
pub mod state;
pub mod twiml;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BotError, Result};

// Re-export main components for easy access
pub use catalog::Catalog;
pub use handlers::{create_router, AppState};
pub use services::FormService;
pub use state::SessionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
