//! Error types for the users API client.
//!
//! # Design
//! `CannotFindUser` gets a dedicated variant so callers can tell "this user
//! does not exist" apart from "the request failed". Transport failures,
//! unexpected statuses and bad creation responses all land in `Request`, whose
//! message is prefixed with the operation that failed. Body decoding problems
//! are reported as `Decode` rather than escaping as raw parse errors.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `UserService` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream answered 404 for a get-by-id request.
    #[error("Cannot find user with ID: {id}")]
    CannotFindUser { id: i64 },

    /// The request failed, or its response was not acceptable for the
    /// operation. When the cause was a transport failure it is kept as source.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("{context}: invalid response body: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be encoded as JSON.
    #[error("request body could not be encoded: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status associated with the error, if it came from one.
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::CannotFindUser { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::CannotFindUser { .. })
    }

    pub(crate) fn request(message: impl Into<String>) -> Self {
        ApiError::Request {
            message: message.into(),
            source: None,
        }
    }

    /// Rewrap a transport failure as `"<context>: <underlying message>"`.
    pub(crate) fn transport(context: &str, source: TransportError) -> Self {
        ApiError::Request {
            message: format!("{context}: {source}"),
            source: Some(source),
        }
    }

    pub(crate) fn unexpected_status(context: &str, status: u16) -> Self {
        ApiError::request(format!("{context}: unexpected status {status}"))
    }
}
