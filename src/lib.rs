//! # Instance Pool Provider
//!
//! A declarative `instance_pool` resource for a remote compute platform,
//! driven over its REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the workspace host and credentials
//! - An async HTTP client that decodes `{error_code, message}` error bodies
//! - Typed instance pool endpoints via [`InstancePoolsApi`]
//! - Attribute schemas, resource state and planning in [`resource`]
//! - The [`InstancePoolResource`] create/read/update/delete lifecycle
//!
//! ## Quick Start
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
//! assert_eq!(config.host().host_name(), Some("my-workspace.cloud.example.com"));
//! ```
//!
//! Or from `DATABRICKS_HOST` and `DATABRICKS_TOKEN` (or `DATABRICKS_USERNAME`
//! and `DATABRICKS_PASSWORD`):
//!
//! ```rust,ignore
//! let config = ClientConfig::from_env()?;
//! ```
//!
//! ## Managing a Pool
//!
//! ```rust,ignore
//! use instance_pool_provider::{ClientConfig, HttpClient, InstancePoolResource};
//! use instance_pool_provider::resource::Resource;
//! use serde_json::json;
//!
//! let client = HttpClient::new(&ClientConfig::from_env()?)?;
//! let resource = InstancePoolResource::new();
//!
//! let config = json!({
//!     "instance_pool_name": "Shared Pool",
//!     "node_type_id": "i3.xlarge",
//!     "idle_instance_autotermination_minutes": 15
//! });
//! let plan = InstancePoolResource::SCHEMA.plan(&resource.new_data(), config.as_object().unwrap())?;
//!
//! let mut data = plan.planned;
//! resource.create(&client, &mut data).await?;
//! println!("Created pool {}", data.id());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Verbatim errors**: API failures display as the platform's own message

pub mod clients;
pub mod config;
pub mod error;
pub mod pools;
pub mod resource;

// Re-export public types at crate root for convenience
pub use config::{ApiToken, ClientConfig, ClientConfigBuilder, Credentials, HostUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiErrorBody, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export instance pool types
pub use pools::{InstancePool, InstancePoolAndStats, InstancePoolResource, InstancePoolsApi};
pub use resource::{Resource, ResourceData, ResourceError};
