//! Error types for the screener client.
//!
//! Validation failures ([`Error::UnknownField`], [`Error::MalformedRequest`])
//! are raised locally before any request is sent. Everything the transport
//! or the backend reports is a request failure.

use serde_json::Value;
use thiserror::Error;

use crate::models::InstrumentClass;

/// A specialized `Result` type for screener operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all screener operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The field is not part of the instrument class's catalog
    #[error("Unknown field `{key}` for the {class} screener")]
    UnknownField {
        /// Instrument class of the screener
        class: InstrumentClass,
        /// Wire key that was looked up
        key: String,
    },

    /// A filter does not fit its field's operator set or value kind
    #[error("Malformed request: filter on `{field}`: {reason}")]
    MalformedRequest {
        /// Wire key of the offending field
        field: String,
        /// What is wrong with the filter
        reason: String,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The scan endpoint returned an error status
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The response does not line up with the request
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if the request was rejected locally, before any
    /// network access.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownField { .. } | Error::MalformedRequest { .. }
        )
    }

    /// Returns `true` if the server or the network failed.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Api { .. }
                | Error::Timeout
                | Error::InvalidResponse(_)
                | Error::Json(_)
                | Error::UrlParse(_)
        )
    }

    /// Returns `true` if this error is potentially transient and the
    /// request could be retried.
    ///
    /// # Example
    ///
    /// ```
    /// use tvscreener::Error;
    ///
    /// assert!(Error::Timeout.is_retryable());
    /// assert!(!Error::InvalidInput("bad".into()).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout => true,
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a response.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = body
            .get("error")
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(|m| m.as_str())))
            .or_else(|| body.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            message,
            body,
        }
    }
}
