//! Centralized error types for TruthGuard.
//!
//! The `Display` output of every client-visible variant is the bare message,
//! so it can be put straight into an `{"error": ...}` body or shown to a user.

use thiserror::Error;

/// Message used when a failure carries no message of its own.
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Message used when the client hits an error with no description.
pub const SYSTEM_ERROR: &str = "System error";

/// Message used when the model output cannot be decoded.
pub const INVALID_AI_RESPONSE: &str = "Invalid AI response format";

/// Main error type for TruthGuard operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TgError {
    /// Missing, empty or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Deployment fault, e.g. the model credential is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The model provider failed or returned nothing usable.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    /// The endpoint's success payload could not be decoded.
    #[error("{0}")]
    Parse(String),

    /// Network-level failure reaching the endpoint.
    #[error("{0}")]
    Transport(String),

    #[error("Invalid state transition: cannot move from '{from}' to '{to}'")]
    InvalidStateTransition { from: String, to: String },
}

/// Coarse classification of a [`TgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Upstream,
    MethodNotAllowed,
    Parse,
    Transport,
    State,
}

/// Result type for TruthGuard operations.
pub type TgResult<T> = Result<T, TgError>;

impl TgError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an upstream error, falling back to "Analysis failed" for an
    /// empty message.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(non_empty_or(msg.into(), ANALYSIS_FAILED))
    }

    /// Create a transport error, falling back to "System error" for an
    /// empty message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(non_empty_or(msg.into(), SYSTEM_ERROR))
    }

    /// The "Invalid AI response format" parse error.
    pub fn invalid_response() -> Self {
        Self::Parse(INVALID_AI_RESPONSE.to_string())
    }

    /// Map a non-success HTTP status and optional server message to an error.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let msg = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| ANALYSIS_FAILED.to_string());
        match status {
            400 => Self::Validation(msg),
            405 => Self::MethodNotAllowed(msg),
            _ => Self::Upstream(msg),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::MethodNotAllowed(_) => ErrorKind::MethodNotAllowed,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Transport(_) => ErrorKind::Transport,
            Self::InvalidStateTransition { .. } => ErrorKind::State,
        }
    }

    /// HTTP status the endpoint answers with for this error.
    ///
    /// Client-only kinds never reach the endpoint; they map to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::MethodNotAllowed(_) => 405,
            _ => 500,
        }
    }
}

fn non_empty_or(msg: String, fallback: &str) -> String {
    if msg.trim().is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}
