//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use instance_pool_provider::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(e) if e.is_not_found() => println!("Gone"),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {} ({:?}): {}", e.code, e.error_code, e.message);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error body returned by the REST API.
///
/// ```rust
/// use instance_pool_provider::clients::ApiErrorBody;
///
/// let body: ApiErrorBody = serde_json::from_str(
///     r#"{"error_code":"NOT_FOUND","message":"Item not found"}"#,
/// ).unwrap();
/// assert_eq!(body.error_code, "NOT_FOUND");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code, e.g. `INVALID_REQUEST`.
    #[serde(default)]
    pub error_code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Error returned when an HTTP request receives a non-successful response.
///
/// Displays as the remote message verbatim, so operators see exactly what
/// the platform reported.
///
/// ```rust
/// use instance_pool_provider::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 400,
///     error_code: Some("INVALID_REQUEST".to_string()),
///     message: "Internal error happened".to_string(),
///     error_reference: None,
/// };
/// assert_eq!(error.to_string(), "Internal error happened");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The `error_code` field of the response body, if present.
    pub error_code: Option<String>,
    /// The remote message, or the raw body when it was not a JSON error.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Returns `true` when the remote object does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// The number of tries is zero.
    #[error("Request must be attempted at least once.")]
    ZeroTries,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request or response body could not be (de)serialized.
    #[error("Failed to process JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns `true` when the API answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Response(e) if e.is_not_found())
    }

    /// Returns the HTTP status code if the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}
