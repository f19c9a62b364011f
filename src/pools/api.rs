//! Typed calls against the instance pool endpoints.

use serde_json::json;

use crate::clients::{HttpClient, HttpError};
use crate::pools::model::{CreatedInstancePool, InstancePool, InstancePoolAndStats, InstancePoolList};

const CREATE_PATH: &str = "instance-pools/create";
const GET_PATH: &str = "instance-pools/get";
const EDIT_PATH: &str = "instance-pools/edit";
const DELETE_PATH: &str = "instance-pools/delete";
const LIST_PATH: &str = "instance-pools/list";

/// Client for the instance pool REST endpoints.
///
/// Each method issues exactly one request and returns the API error
/// unchanged on failure.
///
/// # Example
///
/// ```rust,ignore
/// use instance_pool_provider::{ClientConfig, HttpClient, InstancePool, InstancePoolsApi};
///
/// let client = HttpClient::new(&ClientConfig::from_env()?)?;
/// let api = InstancePoolsApi::new(&client);
///
/// let created = api.create(&InstancePool {
///     instance_pool_name: "Shared Pool".to_string(),
///     node_type_id: "i3.xlarge".to_string(),
///     idle_instance_autotermination_minutes: 15,
///     ..Default::default()
/// }).await?;
///
/// let pool = api.read(&created.instance_pool_id).await?;
/// api.delete(&pool.instance_pool_id).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct InstancePoolsApi<'a> {
    client: &'a HttpClient,
}

impl<'a> InstancePoolsApi<'a> {
    /// Creates an API handle over `client`.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Creates a pool and returns it with the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be
    /// decoded.
    pub async fn create(&self, pool: &InstancePool) -> Result<InstancePoolAndStats, HttpError> {
        let created: CreatedInstancePool = self.client.post(CREATE_PATH, pool).await?.json()?;
        tracing::debug!(instance_pool_id = %created.instance_pool_id, "Created instance pool");
        Ok(InstancePoolAndStats {
            instance_pool_id: created.instance_pool_id,
            pool: pool.clone(),
            ..InstancePoolAndStats::default()
        })
    }

    /// Reads a pool by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails; a missing pool is a
    /// `Response` error with code 404.
    pub async fn read(&self, instance_pool_id: &str) -> Result<InstancePoolAndStats, HttpError> {
        self.client
            .get(GET_PATH, &[("instance_pool_id", instance_pool_id)])
            .await?
            .json()
    }

    /// Replaces the definition of an existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update(&self, pool: &InstancePoolAndStats) -> Result<(), HttpError> {
        self.client.post(EDIT_PATH, pool).await?;
        Ok(())
    }

    /// Deletes a pool by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete(&self, instance_pool_id: &str) -> Result<(), HttpError> {
        self.client
            .post(DELETE_PATH, &json!({ "instance_pool_id": instance_pool_id }))
            .await?;
        Ok(())
    }

    /// Lists all pools in the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be
    /// decoded.
    pub async fn list(&self) -> Result<Vec<InstancePoolAndStats>, HttpError> {
        let list: InstancePoolList = self.client.get(LIST_PATH, &[]).await?.json()?;
        Ok(list.instance_pools)
    }
}
