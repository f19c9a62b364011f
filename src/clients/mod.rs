//! HTTP transport for the REST API.
//!
//! This module provides the layer that resource code talks through. It
//! handles authentication headers, request/response processing, optional
//! retries, and error body decoding.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`ApiErrorBody`]: The `{error_code, message}` error shape
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **503 (Temporarily Unavailable)**: Retries with fixed 1-second delay
//! - **Other errors**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Resource
//! operations always use the default.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    ApiErrorBody, HttpError, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, API_BASE_PATH, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
