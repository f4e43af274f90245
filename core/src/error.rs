//! Error types for the club API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because `get_by_id` callers
//! distinguish "the record does not exist" from other failures. Every
//! variant that originates from the server keeps the server's `message`
//! verbatim so it can be shown to the operator unchanged.

use thiserror::Error;

/// Message used when a failed response carries no usable `message` field.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Errors produced while building requests, executing them, or parsing
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("{message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The server answered 2xx but flagged the write with `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Human-readable message suitable for a slice's `error` field.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
