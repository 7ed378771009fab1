use std::fmt;

use thiserror::Error;

/// Classification of a single failed backend attempt
///
/// The orchestrator treats every kind identically (any failure rotates to
/// the next backend); the distinction exists for logs and the exhaustion
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network-level failure: timeout, DNS, connection refused
    Transport,
    /// Backend rejected the credential (401 or 403)
    Auth,
    /// Backend throttled the request (429)
    RateLimited,
    /// Any other non-success status, or a success body that could not be
    /// interpreted as a completion
    Provider,
}

impl FailureKind {
    /// Stable lowercase label used in logs and error output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Auth => "auth",
            Self::RateLimited => "rate_limited",
            Self::Provider => "provider",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed call to one backend
#[derive(Debug, Error)]
#[error("{kind} failure: {message}")]
pub struct AttemptError {
    /// Failure classification
    pub kind: FailureKind,
    /// Human-readable detail for diagnostics
    pub message: String,
}

impl AttemptError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One entry in the exhaustion report: which backend failed, how, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Display name of the backend that failed
    pub provider: String,
    /// Failure classification
    pub kind: FailureKind,
    /// Human-readable detail
    pub message: String,
}

impl fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} failure: {}", self.provider, self.kind, self.message)
    }
}

/// Errors crossing the failover core's public boundary
///
/// Per-attempt failures never escape individually; a caller of
/// [`complete`](crate::FailoverOrchestrator::complete) only ever sees the
/// aggregate, carrying every failure in attempt order.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Every backend in one full rotation failed (or none are configured)
    #[error("all providers exhausted after {} attempt(s)", attempts.len())]
    AllProvidersExhausted {
        /// Per-backend failures, in attempt order
        attempts: Vec<AttemptRecord>,
    },
}
