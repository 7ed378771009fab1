//! Failover core for the prompt relay
//!
//! Routes a completion request across an ordered list of interchangeable
//! OpenAI-compatible backends: a shared rotation cursor marks the active
//! backend, each failure advances the cursor, and a single pass over the
//! list bounds every request. Callers see only the returned text or one
//! aggregate exhaustion error.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod client;
pub mod cursor;
pub mod descriptor;
pub mod error;
pub mod orchestrator;
pub mod protocol;

pub use client::CompletionClient;
pub use cursor::RotationCursor;
pub use descriptor::{AuthScheme, BackendDescriptor};
pub use error::{AttemptError, AttemptRecord, FailureKind, RelayError};
pub use orchestrator::FailoverOrchestrator;
