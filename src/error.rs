//! Error types for provider configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! invalid settings are rejected before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use instance_pool_provider::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid personal access token.")]
    EmptyToken,

    /// Username or password for basic authentication is empty.
    #[error("Basic authentication requires both a non-empty username and password.")]
    EmptyBasicAuth,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://my-workspace.cloud.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// No credentials were found in the environment.
    #[error("No credentials found in environment. Set {token_var}, or both {username_var} and {password_var}.")]
    MissingCredentials {
        /// Name of the token variable.
        token_var: &'static str,
        /// Name of the username variable.
        username_var: &'static str,
        /// Name of the password variable.
        password_var: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Environment variable {var} is not set.")]
    MissingEnvironment {
        /// The variable name.
        var: &'static str,
    },
}
