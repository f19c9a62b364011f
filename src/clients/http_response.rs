//! HTTP response types.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::{ApiErrorBody, HttpError};

/// An HTTP response from the REST API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. Empty bodies parse as `{}`.
    pub body: serde_json::Value,
    /// The raw body text, kept for error reporting on non-JSON bodies.
    pub raw_body: String,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the body and `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, raw_body: String) -> Self {
        let body = if raw_body.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&raw_body).unwrap_or(serde_json::Value::Null)
        };

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite());

        Self {
            code,
            headers,
            body,
            raw_body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the error body if the response carries one.
    #[must_use]
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        serde_json::from_value::<ApiErrorBody>(self.body.clone())
            .ok()
            .filter(|body| !body.message.is_empty() || !body.error_code.is_empty())
    }

    /// Returns the message to show an operator for a failed response.
    ///
    /// Uses the `message` field of the error body, then the raw body text,
    /// then a generic status line.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Some(body) = self.error_body() {
            if !body.message.is_empty() {
                return body.message;
            }
            return body.error_code;
        }
        let raw = self.raw_body.trim();
        if raw.is_empty() {
            format!("Response from server (status {})", self.code)
        } else {
            raw.to_string()
        }
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Json`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}
