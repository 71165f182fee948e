//! Form submission service
//!
//! This service delivers the collected answers to the external form
//! endpoint as a single form-encoded POST. There is no retry or backoff:
//! a failed submission is reported back to the flow, which discards the
//! session and lets the sender restart.

use std::time::Duration;
use reqwest::Client;
use tracing::{debug, info, warn};
use crate::config::FormConfig;
use crate::utils::errors::{BotError, Result};

/// HTTP client wrapper for the form submission endpoint
#[derive(Debug, Clone)]
pub struct FormService {
    client: Client,
    url: String,
}

impl FormService {
    /// Create a new FormService instance
    pub fn new(config: &FormConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("AudienciaBot/1.0")
            .build()
            .map_err(BotError::Http)?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Submit one answer payload.
    ///
    /// Non-2xx responses and transport failures are both classified as
    /// submission failures.
    pub async fn submit(&self, payload: &[(String, String)]) -> Result<()> {
        debug!(url = %self.url, fields = payload.len(), "Submitting answers to form endpoint");

        let response = self.client
            .post(&self.url)
            .form(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Form submission transport error");
                BotError::Submission(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Form endpoint rejected submission");
            return Err(BotError::Submission(format!("HTTP {}", status)));
        }

        info!(fields = payload.len(), "Answers submitted successfully");
        Ok(())
    }
}
