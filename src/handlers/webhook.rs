//! Inbound webhook handler
//!
//! Receives Twilio WhatsApp webhook POSTs, drives the conversation state
//! machine one step, and answers with TwiML. The HTTP response is always
//! 200 with a well-formed body, even when the underlying form submission
//! failed, so the messaging platform never treats it as a delivery error.

use std::sync::Arc;
use axum::{
    extract::{Form, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::services::FormService;
use crate::state::{machine, Action, SessionStore};
use crate::twiml::MessagingResponse;

/// Shared application state injected into the handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub catalog: Arc<Catalog>,
    pub forms: FormService,
    /// Form field name that receives the respondent's name
    pub name_field: String,
}

/// Inbound Twilio webhook request body
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/whatsapp", post(handle_webhook))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle one inbound WhatsApp message
async fn handle_webhook(
    State(state): State<AppState>,
    Form(inbound): Form<InboundMessage>,
) -> Response {
    let text = inbound.body.as_deref().unwrap_or("").trim().to_string();
    debug!(sender = %inbound.from, "Processing inbound message");

    let (mut session, created) = state.store.get_or_create(&inbound.from).await;

    // First contact only creates the session and sends the name prompt;
    // no input is consumed.
    if created {
        info!(sender = %inbound.from, "Starting new survey flow");
        return twiml(MessagingResponse::new().message(machine::NAME_PROMPT));
    }

    match machine::advance(&mut session, &text, &state.catalog) {
        Action::Reply(reply) => {
            state.store.save(session).await;
            twiml(MessagingResponse::new().message_with_media(reply.body, reply.media_url))
        }
        Action::Submit => {
            let payload = machine::build_payload(&session, &state.catalog, &state.name_field);
            let result = state.forms.submit(&payload).await;

            // The session is discarded no matter how the submission went;
            // the sender restarts the whole flow to retry.
            state.store.remove(&inbound.from).await;

            let body = match result {
                Ok(()) => {
                    info!(sender = %inbound.from, "Survey flow completed");
                    machine::SUBMIT_SUCCESS
                }
                Err(e) => {
                    error!(sender = %inbound.from, error = %e, "Form submission failed");
                    machine::SUBMIT_FAILURE
                }
            };
            twiml(MessagingResponse::new().message(body))
        }
    }
}

/// Liveness endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "name": crate::NAME,
        "version": crate::VERSION,
    }))
}

/// Render a TwiML response with the content type Twilio expects
fn twiml(response: MessagingResponse) -> Response {
    (
        [(header::CONTENT_TYPE, "text/xml")],
        response.to_xml(),
    )
        .into_response()
}
