//! HTTP client for REST API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests against `<host>/api/2.0`.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base path of the REST API.
pub const API_BASE_PATH: &str = "/api/2.0";

/// HTTP client for making requests to the REST API.
///
/// The client handles:
/// - URL construction from the configured host
/// - Default headers including User-Agent and Authorization
/// - Retry logic for 429 and 503 responses when a request asks for it
/// - Mapping non-2xx responses to [`HttpResponseError`] carrying the remote message
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use instance_pool_provider::{ApiToken, ClientConfig, HostUrl};
/// use instance_pool_provider::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ClientConfig::builder()
///     .host(HostUrl::new("https://my-workspace.cloud.example.com").unwrap())
///     .token(ApiToken::new("dapi-123").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "instance-pools/list")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-workspace.cloud.example.com`).
    base_uri: String,
    /// Base path (e.g., "/api/2.0").
    base_path: String,
    default_headers: BTreeMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let base_uri = config.host().as_ref().to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} "));
        let user_agent = format!("{user_agent_prefix}instance-pool-provider/{SDK_VERSION}");

        let mut default_headers = BTreeMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            config.credentials().authorization_header(),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path: API_BASE_PATH.to_string(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request with the given query parameters.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let request = query
            .iter()
            .fold(HttpRequest::builder(HttpMethod::Get, path), |builder, (k, v)| {
                builder.query_param(*k, *v)
            })
            .build()?;
        self.request(request).await
    }

    /// Sends a POST request with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Json`] if the body cannot be serialized, otherwise
    /// see [`HttpClient::request`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, HttpError> {
        let body = serde_json::to_value(body)?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends an HTTP request to the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!(
            "{}{}/{}",
            self.base_uri,
            self.base_path,
            request.path.trim_start_matches('/')
        );

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "Sending request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let response = HttpResponse::new(code, res_headers, body_text);

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                status = code,
                "Received response"
            );

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = response.error_message();
            let error_code = response.error_body().map(|body| body.error_code);
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code == 503;
            if !should_retry || tries >= request.tries {
                if should_retry && request.tries > 1 {
                    return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                        code,
                        tries: request.tries,
                        message: error_message,
                        error_reference,
                    }));
                }
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    error_code: error_code.filter(|c| !c.is_empty()),
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                path = %request.path,
                status = code,
                "Retrying request in {:?}",
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // 429 honours Retry-After; everything else waits the fixed delay
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return std::time::Duration::try_from_secs_f64(retry_after.max(0.0))
                    .unwrap_or(std::time::Duration::from_secs(RETRY_WAIT_TIME));
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }
}
