//! Client error types

use shared::FieldErrors;
use thiserror::Error;

use crate::store::StoreError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx response whose body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local durable storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    /// Submit pressed while a submission is running or already finished
    #[error("Submission already in progress")]
    SubmissionInProgress,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Whether the remote service was simply unreachable or refused.
    ///
    /// These are the failures the record service recovers from locally;
    /// anything else propagates to the caller.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_decode(),
            Self::Status { .. } => true,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
