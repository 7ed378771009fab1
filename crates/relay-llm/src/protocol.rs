//! Chat completion wire format shared by every backend
//!
//! All rotated backends speak the OpenAI-compatible chat completions
//! shape, so one request/response pair covers the whole list.

use serde::{Deserialize, Serialize};

/// Role sent with the single prompt message
const USER_ROLE: &str = "user";

// -- Request types --

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Backend-specific model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
}

impl ChatRequest {
    /// Build the request for a single user prompt
    pub fn user_prompt(model: &str, prompt: &str, temperature: f64) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![ChatMessage {
                role: USER_ROLE.to_owned(),
                content: prompt.to_owned(),
            }],
            temperature,
        }
    }
}

/// One message in the request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role
    pub role: String,
    /// Message text
    pub content: String,
}

// -- Response types --

/// Chat completion response body
///
/// Only the fields the relay consumes; backends may send more.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Generated choices; a valid completion has at least one
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One generated choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChoiceMessage,
}

/// Message inside a response choice
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// Completion text, delivered unstripped
    #[serde(default)]
    pub content: String,
}
