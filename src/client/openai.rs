//! Blocking OpenAI-compatible chat-completions client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionClient, CompletionError};
use crate::model::Message;

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions client over HTTP.
///
/// One synchronous request per call, no retries. Works against any
/// backend that implements the OpenAI `/chat/completions` shape.
pub struct OpenAiClient {
    agent: ureq::Agent,
    api_base: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

impl OpenAiClient {
    /// Create a client with an explicit key.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Create a client reading the key from [`API_KEY_ENV`].
    pub fn from_env(
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| CompletionError::MissingApiKey { var: API_KEY_ENV })?;
        Ok(Self::new(api_key, model, api_base))
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.api_base);
        let request = ChatRequest {
            model: &self.model,
            messages,
        };
        debug!(model = %self.model, turns = messages.len(), "sending completion request");

        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(&request)
            .map_err(map_ureq_error)?;

        let parsed: ChatResponse = response
            .body_mut()
            .read_json()
            .map_err(map_ureq_error)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}

fn map_ureq_error(error: ureq::Error) -> CompletionError {
    match error {
        ureq::Error::StatusCode(status) => CompletionError::Api {
            status,
            message: "request rejected by backend".to_string(),
        },
        other => CompletionError::Http(other.to_string()),
    }
}

// ===== Tests =====
