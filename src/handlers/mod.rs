//! HTTP handlers module

pub mod webhook;

pub use webhook::{create_router, AppState, InboundMessage};
