//! Task error types

use thiserror::Error;

/// Errors returned by [`CreatePullRequest::run`](super::CreatePullRequest::run)
#[derive(Debug, Error)]
pub enum TaskError {
    /// A field required at execution time was absent
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// The configured secret is not in the context
    #[error("secret not found: {name}")]
    SecretNotFound { name: String },

    /// The rendered secret is not a legal header value
    #[error("secret '{name}' cannot be used as an authorization header")]
    InvalidHeader {
        name: String,
        #[source]
        source: ghpr_http::header::InvalidHeaderValue,
    },

    /// The request payload could not be serialized
    #[error("failed to serialize pull request payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Sending the request failed
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl TaskError {
    /// Whether the error was raised before any I/O took place
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::MissingField { .. })
    }
}
