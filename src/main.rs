//! Audiencia WhatsApp Survey Bot
//!
//! Main application entry point

use std::sync::Arc;
use dotenv::dotenv;
use tracing::info;

use audiencia_bot::{
    catalog::Catalog,
    config::Settings,
    handlers::{create_router, AppState},
    services::FormService,
    state::SessionStore,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting Audiencia WhatsApp bot...");

    // Load the question catalog
    info!("Loading question catalog...");
    let catalog = Arc::new(Catalog::load(&settings.catalog.path).await?);

    // Initialize the form submission service and session store
    let forms = FormService::new(&settings.form)?;
    let store = SessionStore::new();

    let state = AppState {
        store,
        catalog,
        forms,
        name_field: settings.form.name_field.clone(),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Audiencia bot is listening");

    axum::serve(listener, app).await?;

    info!("Audiencia bot has been shut down.");

    Ok(())
}
