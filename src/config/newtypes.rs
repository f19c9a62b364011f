//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction, so a built
//! [`ClientConfig`](crate::ClientConfig) never holds an empty token or a
//! host without a scheme.

use crate::error::ConfigError;
use std::fmt;

/// A validated personal access token.
///
/// The `Debug` implementation masks the value so tokens do not leak into logs.
///
/// # Example
///
/// ```rust
/// use instance_pool_provider::ApiToken;
///
/// let token = ApiToken::new("dapi-123").unwrap();
/// assert_eq!(token.as_ref(), "dapi-123");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty or whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated workspace host URL.
///
/// A bare host name such as `my-workspace.cloud.example.com` is normalized to
/// `https://my-workspace.cloud.example.com`. Trailing slashes are removed.
///
/// # Example
///
/// ```rust
/// use instance_pool_provider::HostUrl;
///
/// let url = HostUrl::new("https://my-workspace.cloud.example.com/").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("my-workspace.cloud.example.com"));
/// assert_eq!(url.as_ref(), "https://my-workspace.cloud.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();

        let mut url = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: raw.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: raw });
        }

        let host_start = scheme_end + 3;
        while url.len() > host_start && url.ends_with('/') {
            url.pop();
        }
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: raw });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHostUrl { url: raw });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_rejects_empty_string() {
        assert!(matches!(ApiToken::new(""), Err(ConfigError::EmptyToken)));
        assert!(matches!(ApiToken::new("   "), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn test_api_token_debug_is_masked() {
        let token = ApiToken::new("super-secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_host_url_accepts_http_with_port() {
        let url = HostUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_host_url_normalizes_bare_host() {
        let url = HostUrl::new("abc.cloud.example.com").unwrap();
        assert_eq!(url.as_ref(), "https://abc.cloud.example.com");
    }

    #[test]
    fn test_host_url_strips_trailing_slash() {
        let url = HostUrl::new("https://abc.cloud.example.com///").unwrap();
        assert_eq!(url.as_ref(), "https://abc.cloud.example.com");
    }

    #[test]
    fn test_host_url_rejects_invalid_values() {
        assert!(HostUrl::new("").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("ht tp://host").is_err());
        assert!(HostUrl::new("https://bad host").is_err());
    }
}
