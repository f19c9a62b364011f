//! Error types for resource state handling and lifecycle operations.
//!
//! - [`StateError`]: Schema validation and state conversion failures
//! - [`ResourceError`]: Failures surfaced by a lifecycle operation
//!
//! API failures pass through [`ResourceError::Http`] unchanged, so the
//! message an operator sees is the one the platform returned.

use thiserror::Error;

use crate::clients::HttpError;

/// Errors raised while validating or converting resource state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The attribute is not part of the resource schema.
    #[error("Unknown attribute: {name}")]
    UnknownAttribute {
        /// The attribute name.
        name: String,
    },

    /// Configuration failed schema validation.
    #[error("Invalid configuration: {}", problems.join("; "))]
    InvalidConfig {
        /// Every problem found, one per entry.
        problems: Vec<String>,
    },

    /// A flat state value could not be coerced to the attribute's kind.
    #[error("Invalid value for {name}: expected {expected}, got {value:?}")]
    InvalidFlatValue {
        /// The attribute name.
        name: String,
        /// The raw value.
        value: String,
        /// The expected kind.
        expected: &'static str,
    },

    /// Flat state only carries top-level primitive attributes.
    #[error("Attribute {name} cannot be set from flat state")]
    UnsupportedFlatKey {
        /// The attribute name.
        name: String,
    },

    /// A value did not encode to a JSON object.
    #[error("Resource state must be a JSON object")]
    NotAnObject,

    /// State could not be converted to or from a typed value.
    #[error("Failed to convert resource state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by resource lifecycle operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The remote API call failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Local state was invalid.
    #[error(transparent)]
    State(#[from] StateError),

    /// The operation needs an identifier but none is set, or the remote
    /// service did not return one.
    #[error("Resource identifier is missing for {operation}")]
    MissingId {
        /// The operation that needed the identifier.
        operation: &'static str,
    },
}

impl ResourceError {
    /// Returns `true` when the error is a remote 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_not_found())
    }
}
