//! One-pass failover loop over the backend rotation list

use std::sync::Arc;

use relay_config::RelayConfig;

use crate::client::CompletionClient;
use crate::cursor::RotationCursor;
use crate::descriptor::BackendDescriptor;
use crate::error::{AttemptRecord, RelayError};

/// Drives the retry loop: active backend via the cursor, one attempt per
/// backend, advance on failure, at most one full pass per call
///
/// Stateless apart from its reference to the shared [`RotationCursor`] and
/// the immutable descriptor list. The orchestrator is the cursor's only
/// writer; anything may read [`active_backend`](Self::active_backend)
/// concurrently for diagnostics.
#[derive(Debug, Clone)]
pub struct FailoverOrchestrator {
    descriptors: Arc<[BackendDescriptor]>,
    cursor: Arc<RotationCursor>,
    client: CompletionClient,
}

impl FailoverOrchestrator {
    /// Assemble an orchestrator from prebuilt parts
    ///
    /// The cursor is taken shared so callers decide its scope: the shipped
    /// binary passes one process-wide cursor, tests pass their own.
    pub fn new(descriptors: Vec<BackendDescriptor>, cursor: Arc<RotationCursor>, client: CompletionClient) -> Self {
        Self {
            descriptors: descriptors.into(),
            cursor,
            client,
        }
    }

    /// Build descriptors, a fresh cursor, and a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any rotation entry is malformed or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &RelayConfig) -> anyhow::Result<Self> {
        let descriptors = config
            .providers
            .iter()
            .map(BackendDescriptor::from_config)
            .collect::<anyhow::Result<Vec<_>>>()?;

        let cursor = Arc::new(RotationCursor::new(descriptors.len()));
        let client = CompletionClient::new(&config.request)?;

        Ok(Self::new(descriptors, cursor, client))
    }

    /// The descriptor the cursor points at, or `None` for an empty list
    ///
    /// Read-only diagnostic view; the position may move under concurrent
    /// `complete` calls.
    pub fn active_backend(&self) -> Option<&BackendDescriptor> {
        self.descriptors.get(self.cursor.current())
    }

    /// The shared rotation cursor
    pub fn cursor(&self) -> &Arc<RotationCursor> {
        &self.cursor
    }

    /// Obtain a completion, rotating through backends until one succeeds
    ///
    /// Tries at most one full pass over the rotation list. On success the
    /// cursor is left pointing at the backend that answered, so the next
    /// call starts with the backend that last proved reachable. Failures
    /// are recorded per attempt and only surface in the aggregate error;
    /// the cursor is never reset between calls.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::AllProvidersExhausted`] when every backend in
    /// one pass fails, carrying each failure in attempt order. An empty
    /// rotation list exhausts immediately with zero attempts.
    pub async fn complete(&self, prompt: &str) -> Result<String, RelayError> {
        let mut attempts = Vec::with_capacity(self.descriptors.len());

        for _ in 0..self.descriptors.len() {
            let descriptor = &self.descriptors[self.cursor.current()];

            match self.client.call(descriptor, prompt).await {
                Ok(text) => {
                    tracing::debug!(
                        provider = %descriptor.name,
                        model = %descriptor.model,
                        failed_attempts = attempts.len(),
                        "completion succeeded"
                    );
                    return Ok(text);
                }
                Err(error) => {
                    tracing::warn!(
                        provider = %descriptor.name,
                        model = %descriptor.model,
                        kind = %error.kind,
                        error = %error.message,
                        "backend failed, rotating to next"
                    );
                    attempts.push(AttemptRecord {
                        provider: descriptor.name.clone(),
                        kind: error.kind,
                        message: error.message,
                    });
                    self.cursor.advance();
                }
            }
        }

        if attempts.is_empty() {
            tracing::error!("no backends configured, nothing to rotate through");
        }

        Err(RelayError::AllProvidersExhausted { attempts })
    }
}
