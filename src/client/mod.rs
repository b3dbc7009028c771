//! Completion backend capability.
//!
//! The conversation store does not know how replies are produced; it
//! holds a [`CompletionClient`] by composition and issues one blocking
//! call per user prompt. The bundled implementation speaks the
//! OpenAI-compatible chat-completions protocol over HTTP.

mod openai;

pub use openai::OpenAiClient;

use thiserror::Error;

use crate::model::Message;

/// Failure modes of the completion backend.
///
/// All variants are surfaced to the interactive shell as a status-line
/// message; none are fatal. The user message that triggered the call
/// stays appended to the transcript.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key was found in the environment.
    #[error("no API key found; set {var}")]
    MissingApiKey {
        /// Environment variable that was consulted
        var: &'static str,
    },

    /// Transport-level failure (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The backend answered successfully but returned no choices.
    #[error("completion response contained no content")]
    EmptyResponse,
}

/// Synchronous completion capability consumed by the store.
///
/// `complete` blocks until the backend returns; there is no retry and no
/// local timeout policy beyond whatever the implementation's transport
/// enforces.
pub trait CompletionClient {
    /// Send the full transcript and return the model's reply text.
    fn complete(&self, messages: &[Message]) -> Result<String, CompletionError>;
}
