//! Configuration types for the instance pool provider.
//!
//! # Overview
//!
//! - [`ClientConfig`]: workspace host, credentials and user agent settings
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`]
//! - [`Credentials`]: token or basic authentication
//! - [`ApiToken`]: a validated token newtype with masked debug output
//! - [`HostUrl`]: a validated workspace URL
//!
//! # Example
//!
//! ```rust
//! use instance_pool_provider::{ApiToken, ClientConfig, HostUrl};
//!
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://my-workspace.cloud.example.com").unwrap())
//!     .token(ApiToken::new("dapi-123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().as_ref(), "https://my-workspace.cloud.example.com");
//! ```

mod newtypes;

pub use newtypes::{ApiToken, HostUrl};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ConfigError;

/// Environment variable holding the workspace URL.
pub const HOST_ENV: &str = "DATABRICKS_HOST";
/// Environment variable holding a personal access token.
pub const TOKEN_ENV: &str = "DATABRICKS_TOKEN";
/// Environment variable holding the basic auth username.
pub const USERNAME_ENV: &str = "DATABRICKS_USERNAME";
/// Environment variable holding the basic auth password.
pub const PASSWORD_ENV: &str = "DATABRICKS_PASSWORD";

/// Credentials used to authenticate API calls.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Bearer token authentication.
    Token(ApiToken),
    /// Username and password, sent as HTTP basic authentication.
    Basic {
        /// Account username.
        username: String,
        /// Account password.
        password: ApiToken,
    },
}

impl Credentials {
    /// Creates basic credentials after checking that neither part is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBasicAuth`] if either value is empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ConfigError::EmptyBasicAuth);
        }
        let password = ApiToken::new(password).map_err(|_| ConfigError::EmptyBasicAuth)?;
        Ok(Self::Basic { username, password })
    }

    /// Returns the value of the `Authorization` header for these credentials.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Token(token) => format!("Bearer {}", token.as_ref()),
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{}", password.as_ref()));
                format!("Basic {encoded}")
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Self::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", password)
                .finish(),
        }
    }
}

/// Configuration for talking to a workspace.
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    host: HostUrl,
    credentials: Credentials,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads [`HOST_ENV`] and either [`TOKEN_ENV`] or the
    /// [`USERNAME_ENV`]/[`PASSWORD_ENV`] pair. A token wins when both are set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the host is unset or invalid, or when no
    /// usable credentials are present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration using `lookup` to resolve environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = get(HOST_ENV).ok_or(ConfigError::MissingEnvironment { var: HOST_ENV })?;
        let host = HostUrl::new(host)?;

        let credentials = if let Some(token) = get(TOKEN_ENV) {
            Credentials::Token(ApiToken::new(token)?)
        } else {
            match (get(USERNAME_ENV), get(PASSWORD_ENV)) {
                (Some(username), Some(password)) => Credentials::basic(username, password)?,
                _ => {
                    return Err(ConfigError::MissingCredentials {
                        token_var: TOKEN_ENV,
                        username_var: USERNAME_ENV,
                        password_var: PASSWORD_ENV,
                    })
                }
            }
        };

        tracing::debug!("Loaded client configuration for {}", host);

        Ok(Self {
            host,
            credentials,
            user_agent_prefix: None,
        })
    }

    /// Returns the workspace host URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `host` and credentials (via `token` or `credentials`) are required.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    host: Option<HostUrl>,
    credentials: Option<Credentials>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace host URL (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Authenticates with a personal access token.
    #[must_use]
    pub fn token(mut self, token: ApiToken) -> Self {
        self.credentials = Some(Credentials::Token(token));
        self
    }

    /// Sets credentials directly.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` or credentials
    /// are not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        Ok(ClientConfig {
            host,
            credentials,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
