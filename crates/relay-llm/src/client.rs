//! Single-attempt completion client
//!
//! Issues one bounded request to one backend and either returns the
//! completion text or a classified [`AttemptError`]. Rotation decisions
//! live a layer up in the orchestrator; nothing is swallowed here.

use std::time::Duration;

use http::StatusCode;
use relay_config::RequestConfig;
use reqwest::Client;

use crate::descriptor::BackendDescriptor;
use crate::error::{AttemptError, FailureKind};
use crate::protocol::{ChatRequest, ChatResponse};

/// Issues one completion request to a given backend with a fixed timeout
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    temperature: f64,
}

impl CompletionClient {
    /// Build a client enforcing the configured per-attempt timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &RequestConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            temperature: config.temperature,
        })
    }

    /// Call one backend with the given prompt
    ///
    /// Returns the first choice's message content, unstripped. Prompt
    /// emptiness is the caller's responsibility; it is sent as-is.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AttemptError`]:
    /// - [`FailureKind::Transport`] for network errors and timeouts
    /// - [`FailureKind::Auth`] for 401/403
    /// - [`FailureKind::RateLimited`] for 429
    /// - [`FailureKind::Provider`] for any other non-success status, or a
    ///   success body without a usable choice
    pub async fn call(&self, descriptor: &BackendDescriptor, prompt: &str) -> Result<String, AttemptError> {
        let body = ChatRequest::user_prompt(&descriptor.model, prompt, self.temperature);

        tracing::debug!(
            provider = %descriptor.name,
            model = %descriptor.model,
            url = %descriptor.completions_url(),
            "sending completion request"
        );

        let response = self
            .client
            .post(descriptor.completions_url())
            .headers(descriptor.headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptError::new(FailureKind::Transport, describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AttemptError::new(
                classify_status(status),
                format!("backend returned {status}: {detail}"),
            ));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AttemptError::new(FailureKind::Provider, format!("failed to parse response body: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AttemptError::new(FailureKind::Provider, "response contained no choices"))
    }
}

/// Map a non-success status to its failure classification
fn classify_status(status: StatusCode) -> FailureKind {
    match status.as_u16() {
        401 | 403 => FailureKind::Auth,
        429 => FailureKind::RateLimited,
        _ => FailureKind::Provider,
    }
}

/// Human-readable description for a request-level failure
fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_owned()
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}
