//! Instance pools.
//!
//! - [`InstancePool`] and [`InstancePoolAndStats`]: Wire types
//! - [`InstancePoolsApi`]: Typed create/read/update/delete/list calls
//! - [`InstancePoolResource`]: The declarative `instance_pool` resource
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST /api/2.0/instance-pools/create` |
//! | read | `GET /api/2.0/instance-pools/get?instance_pool_id=<id>` |
//! | update | `POST /api/2.0/instance-pools/edit` |
//! | delete | `POST /api/2.0/instance-pools/delete` |
//! | list | `GET /api/2.0/instance-pools/list` |

mod api;
mod model;
mod resource;

pub use api::InstancePoolsApi;
pub use model::{
    AwsAvailability, AzureAvailability, AzureDiskVolumeType, EbsVolumeType, InstancePool,
    InstancePoolAndStats, InstancePoolAwsAttributes, InstancePoolAzureAttributes,
    InstancePoolDiskSpec, InstancePoolDiskType, InstancePoolState, InstancePoolStats,
};
pub use resource::{InstancePoolResource, INSTANCE_POOL_SCHEMA};
