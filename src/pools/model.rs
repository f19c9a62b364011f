//! Instance pool request and response types.
//!
//! Zero and empty optional values are left out of request bodies, so a pool
//! serializes to exactly the fields an operator declared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// Availability type for AWS instances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwsAvailability {
    /// Spot instances.
    Spot,
    /// On-demand instances.
    OnDemand,
}

/// Availability type for Azure instances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AzureAvailability {
    /// Azure spot instances.
    SpotAzure,
    /// Azure on-demand instances.
    OnDemandAzure,
}

/// EBS volume type for AWS disks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EbsVolumeType {
    /// General purpose SSD.
    GeneralPurposeSsd,
    /// Throughput optimized HDD.
    ThroughputOptimizedHdd,
}

/// Managed disk type for Azure disks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AzureDiskVolumeType {
    /// Premium locally redundant storage.
    PremiumLrs,
    /// Standard locally redundant storage.
    StandardLrs,
}

/// AWS-specific pool attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstancePoolAwsAttributes {
    /// Spot or on-demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AwsAvailability>,
    /// Availability zone, e.g. `us-west-2a`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone_id: String,
    /// Max spot price as a percentage of the on-demand price.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub spot_bid_price_percent: i32,
}

/// Azure-specific pool attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstancePoolAzureAttributes {
    /// Spot or on-demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AzureAvailability>,
    /// Max price for spot instances; `-1` means the on-demand price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_bid_max_price: Option<f64>,
}

/// Disk type, set per cloud.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstancePoolDiskType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_volume_type: Option<EbsVolumeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_disk_volume_type: Option<AzureDiskVolumeType>,
}

/// Disks attached to each instance in the pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstancePoolDiskSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<InstancePoolDiskType>,
    /// Number of disks per instance.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub disk_count: i32,
    /// Size of each disk in GiB.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub disk_size: i32,
}

/// The user-declared definition of an instance pool.
///
/// # Example
///
/// ```rust
/// use instance_pool_provider::InstancePool;
///
/// let pool = InstancePool {
///     instance_pool_name: "Shared Pool".to_string(),
///     node_type_id: "i3.xlarge".to_string(),
///     idle_instance_autotermination_minutes: 15,
///     ..Default::default()
/// };
///
/// let body = serde_json::to_value(&pool).unwrap();
/// assert!(body.get("max_capacity").is_none());
/// assert_eq!(body["idle_instance_autotermination_minutes"], 15);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstancePool {
    #[serde(default)]
    pub instance_pool_name: String,

    /// Instances kept idle and ready at all times.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub min_idle_instances: i32,

    /// Upper bound on idle plus used instances; zero means unlimited.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_capacity: i32,

    #[serde(default)]
    pub node_type_id: String,

    /// Minutes an idle instance above `min_idle_instances` is kept.
    #[serde(default)]
    pub idle_instance_autotermination_minutes: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_attributes: Option<InstancePoolAwsAttributes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_attributes: Option<InstancePoolAzureAttributes>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_tags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enable_elastic_disk: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_spec: Option<InstancePoolDiskSpec>,

    /// Runtime versions installed on idle instances.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preloaded_spark_versions: Vec<String>,
}

/// Lifecycle state reported for a pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstancePoolState {
    Active,
    Stopped,
    Deleted,
}

/// Instance counts reported for a pool.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstancePoolStats {
    #[serde(default)]
    pub used_count: i32,
    #[serde(default)]
    pub idle_count: i32,
    #[serde(default)]
    pub pending_used_count: i32,
    #[serde(default)]
    pub pending_idle_count: i32,
}

/// A pool together with its identifier and read-only status.
///
/// This is both the edit request and the get response. `default_tags`,
/// `state` and `stats` are only ever filled by the remote service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstancePoolAndStats {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_pool_id: String,

    #[serde(flatten)]
    pub pool: InstancePool,

    /// Tags the platform adds to every instance.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_tags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<InstancePoolState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<InstancePoolStats>,
}

impl InstancePoolAndStats {
    /// Builds an edit request for `pool` with identifier `id`.
    #[must_use]
    pub fn for_update(id: impl Into<String>, pool: InstancePool) -> Self {
        Self {
            instance_pool_id: id.into(),
            pool,
            ..Self::default()
        }
    }
}

/// Response of the create endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedInstancePool {
    #[serde(default)]
    pub instance_pool_id: String,
}

/// Response of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct InstancePoolList {
    #[serde(default)]
    pub instance_pools: Vec<InstancePoolAndStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shared_pool() -> InstancePool {
        InstancePool {
            instance_pool_name: "Shared Pool".to_string(),
            min_idle_instances: 10,
            max_capacity: 1000,
            node_type_id: "i3.xlarge".to_string(),
            idle_instance_autotermination_minutes: 15,
            enable_elastic_disk: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_pool_serializes_declared_fields_only() {
        let body = serde_json::to_value(shared_pool()).unwrap();
        assert_eq!(
            body,
            json!({
                "instance_pool_name": "Shared Pool",
                "min_idle_instances": 10,
                "max_capacity": 1000,
                "node_type_id": "i3.xlarge",
                "idle_instance_autotermination_minutes": 15,
                "enable_elastic_disk": true
            })
        );
    }

    #[test]
    fn test_zero_values_are_omitted() {
        let pool = InstancePool {
            instance_pool_name: "p".to_string(),
            node_type_id: "n".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(pool).unwrap();
        let object = body.as_object().unwrap();
        assert!(!object.contains_key("min_idle_instances"));
        assert!(!object.contains_key("max_capacity"));
        assert!(!object.contains_key("enable_elastic_disk"));
        assert!(!object.contains_key("custom_tags"));
        assert!(!object.contains_key("disk_spec"));
        assert_eq!(object["idle_instance_autotermination_minutes"], 0);
    }

    #[test]
    fn test_update_request_never_carries_read_only_fields() {
        let request = InstancePoolAndStats::for_update("abc", shared_pool());
        let body = serde_json::to_value(request).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object["instance_pool_id"], "abc");
        assert!(!object.contains_key("state"));
        assert!(!object.contains_key("stats"));
        assert!(!object.contains_key("default_tags"));
    }

    #[test]
    fn test_get_response_decodes_status_fields() {
        let response: InstancePoolAndStats = serde_json::from_value(json!({
            "instance_pool_id": "abc",
            "instance_pool_name": "Shared Pool",
            "node_type_id": "i3.xlarge",
            "idle_instance_autotermination_minutes": 15,
            "default_tags": {"Vendor": "Databricks"},
            "state": "ACTIVE",
            "stats": {"used_count": 1, "idle_count": 2}
        }))
        .unwrap();

        assert_eq!(response.instance_pool_id, "abc");
        assert_eq!(response.pool.instance_pool_name, "Shared Pool");
        assert_eq!(response.state, Some(InstancePoolState::Active));
        assert_eq!(response.stats.unwrap().idle_count, 2);
        assert_eq!(response.default_tags.get("Vendor").map(String::as_str), Some("Databricks"));
    }

    #[test]
    fn test_cloud_attributes_use_wire_names() {
        let pool = InstancePool {
            aws_attributes: Some(InstancePoolAwsAttributes {
                availability: Some(AwsAvailability::Spot),
                ..Default::default()
            }),
            disk_spec: Some(InstancePoolDiskSpec {
                disk_type: Some(InstancePoolDiskType {
                    ebs_volume_type: Some(EbsVolumeType::GeneralPurposeSsd),
                    azure_disk_volume_type: None,
                }),
                disk_count: 1,
                disk_size: 32,
            }),
            ..Default::default()
        };
        let body = serde_json::to_value(pool).unwrap();
        assert_eq!(body["aws_attributes"], json!({"availability": "SPOT"}));
        assert_eq!(
            body["disk_spec"],
            json!({
                "disk_type": {"ebs_volume_type": "GENERAL_PURPOSE_SSD"},
                "disk_count": 1,
                "disk_size": 32
            })
        );

        let azure: InstancePoolAzureAttributes =
            serde_json::from_value(json!({"availability": "SPOT_AZURE", "spot_bid_max_price": -1.0}))
                .unwrap();
        assert_eq!(azure.availability, Some(AzureAvailability::SpotAzure));
    }
}
