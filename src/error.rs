//! Error types for the navigation request layer.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while translating an inbound navigation request into a
/// routing query, or while guarding edge eligibility.
#[derive(Debug, Error)]
pub enum NavError {
    /// Static misconfiguration, detected once at construction time.
    /// Never raised on the per-request path.
    #[error("invalid {key}: unknown value '{value}'")]
    Configuration { key: String, value: String },

    /// Malformed request syntax, local to a single request.
    #[error("{0}")]
    Format(String),

    /// Structurally valid but semantically inconsistent request.
    #[error("{0}")]
    Validation(String),

    /// Failure reported by the routing engine, passed through unmodified.
    #[error("{0}")]
    Routing(String),
}

impl NavError {
    /// HTTP status for the structured error body. All failures are terminal
    /// for the current request and reported synchronously.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Protocol error code surfaced next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            NavError::Routing(_) => "NoRoute",
            _ => "InvalidArgument",
        }
    }
}

/// Convenience result type for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;
