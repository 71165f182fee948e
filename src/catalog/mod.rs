//! Question catalog
//!
//! The catalog is an ordered list of survey questions loaded once at
//! startup from a JSON file. The field names follow the original
//! `perguntas.json` layout so existing catalog files keep working.

use std::path::Path;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;
use crate::utils::errors::{BotError, Result};

/// A single survey question
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Question {
    /// External form field identifier (appended to "entry." on submission)
    #[serde(rename = "entry_id")]
    pub form_field_id: String,
    /// Topic area shown as the menu header
    pub area: String,
    /// Fixed menu options, presented numbered from 1
    #[serde(rename = "opcoes")]
    pub options: Vec<String>,
    /// Optional image sent along with the menu
    #[serde(rename = "imagem")]
    pub image_url: Option<String>,
}

/// Ordered, read-only question catalog
///
/// The index of a question doubles as its ordinal step number in the
/// conversation flow.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog from a list of questions, rejecting questions
    /// without options (the menu would have nothing to offer).
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        for question in &questions {
            if question.options.is_empty() {
                return Err(BotError::Catalog(format!(
                    "Question '{}' has no options", question.form_field_id
                )));
            }
            if question.form_field_id.is_empty() {
                return Err(BotError::Catalog(
                    "Question with empty form field id".to_string()
                ));
            }
        }

        Ok(Self { questions })
    }

    /// Load the catalog from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            BotError::Catalog(format!("Failed to read catalog file {}: {}", path.display(), e))
        })?;

        let questions: Vec<Question> = serde_json::from_str(&content).map_err(|e| {
            BotError::Catalog(format!("Failed to parse catalog file {}: {}", path.display(), e))
        })?;

        let catalog = Self::new(questions)?;
        info!(path = %path.display(), questions = catalog.len(), "Question catalog loaded");
        Ok(catalog)
    }

    /// Get the question at a given step
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Get the last question in the catalog
    pub fn last(&self) -> Option<&Question> {
        self.questions.last()
    }

    /// Number of questions in the catalog
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the catalog has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate over the questions in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
