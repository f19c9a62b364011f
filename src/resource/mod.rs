//! Declarative resource infrastructure.
//!
//! This module provides the pieces a managed object needs to take part in a
//! plan/apply lifecycle:
//!
//! - **[`Schema`]**: A static table of typed [`Attribute`]s with presence,
//!   defaults and force-new flags
//! - **[`ResourceData`]**: The identifier and state map of one instance
//! - **[`Plan`]**: The diff between prior state and desired configuration
//! - **[`Resource`] trait**: Create, read, update and delete over the API
//! - **[`ResourceError`]** and **[`StateError`]**: Error types for the above
//!
//! # Lifecycle
//!
//! | Operation | On success | On 404 | On other errors |
//! |-----------|------------|--------|-----------------|
//! | `create` | id set, state refreshed | error, id empty | error, id empty |
//! | `read` | state refreshed | id cleared, no error | error, id kept |
//! | `update` | state refreshed | error, id kept | error, id kept |
//! | `delete` | id kept | treated as deleted | error, id kept |

mod data;
mod errors;
mod plan;
mod schema;

pub use data::ResourceData;
pub use errors::{ResourceError, StateError};
pub use plan::{AttributeChange, Plan};
pub use schema::{Attribute, AttributeKind, DefaultValue, Presence, Schema};

use crate::clients::HttpClient;

/// A resource type managed through the REST API.
///
/// Implementors declare a type name and schema, and translate between
/// [`ResourceData`] and API calls. Every operation issues its calls once;
/// errors are returned as the API reported them.
#[allow(async_fn_in_trait)]
pub trait Resource: Send + Sync {
    /// The resource type name, e.g. `"instance_pool"`.
    const TYPE_NAME: &'static str;

    /// The attribute schema.
    const SCHEMA: &'static Schema;

    /// Creates the remote object from `data` and stores its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the API call fails. The identifier stays
    /// empty in that case.
    async fn create(&self, client: &HttpClient, data: &mut ResourceData)
        -> Result<(), ResourceError>;

    /// Refreshes `data` from the remote object.
    ///
    /// A missing remote object clears the identifier and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for any other failure, keeping the identifier.
    async fn read(&self, client: &HttpClient, data: &mut ResourceData) -> Result<(), ResourceError>;

    /// Applies `data` to the existing remote object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the identifier is missing or the API call
    /// fails.
    async fn update(&self, client: &HttpClient, data: &mut ResourceData)
        -> Result<(), ResourceError>;

    /// Deletes the remote object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the API call fails. The identifier stays
    /// set so the delete can be retried.
    async fn delete(&self, client: &HttpClient, data: &mut ResourceData)
        -> Result<(), ResourceError>;

    /// Returns empty resource data for this resource type.
    fn new_data(&self) -> ResourceData {
        ResourceData::new(Self::SCHEMA)
    }
}
