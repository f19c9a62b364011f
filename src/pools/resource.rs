//! The `instance_pool` resource.

use crate::clients::HttpClient;
use crate::pools::api::InstancePoolsApi;
use crate::pools::model::{InstancePool, InstancePoolAndStats};
use crate::resource::{Attribute, AttributeKind, Resource, ResourceData, ResourceError, Schema};

const AWS_ATTRIBUTES: &[(&str, Attribute)] = &[
    (
        "availability",
        Attribute::optional(AttributeKind::Enum(&["SPOT", "ON_DEMAND"])),
    ),
    ("zone_id", Attribute::optional(AttributeKind::String)),
    ("spot_bid_price_percent", Attribute::optional(AttributeKind::Int)),
];
const AWS_SCHEMA: Schema = Schema::new(AWS_ATTRIBUTES);

const AZURE_ATTRIBUTES: &[(&str, Attribute)] = &[
    (
        "availability",
        Attribute::optional(AttributeKind::Enum(&["SPOT_AZURE", "ON_DEMAND_AZURE"])),
    ),
    ("spot_bid_max_price", Attribute::optional(AttributeKind::Float)),
];
const AZURE_SCHEMA: Schema = Schema::new(AZURE_ATTRIBUTES);

const DISK_TYPE_ATTRIBUTES: &[(&str, Attribute)] = &[
    (
        "ebs_volume_type",
        Attribute::optional(AttributeKind::Enum(&[
            "GENERAL_PURPOSE_SSD",
            "THROUGHPUT_OPTIMIZED_HDD",
        ])),
    ),
    (
        "azure_disk_volume_type",
        Attribute::optional(AttributeKind::Enum(&["PREMIUM_LRS", "STANDARD_LRS"])),
    ),
];
const DISK_TYPE_SCHEMA: Schema = Schema::new(DISK_TYPE_ATTRIBUTES);

const DISK_SPEC_ATTRIBUTES: &[(&str, Attribute)] = &[
    ("disk_type", Attribute::optional(AttributeKind::Block(&DISK_TYPE_SCHEMA))),
    ("disk_count", Attribute::optional(AttributeKind::Int)),
    ("disk_size", Attribute::optional(AttributeKind::Int)),
];
const DISK_SPEC_SCHEMA: Schema = Schema::new(DISK_SPEC_ATTRIBUTES);

const INSTANCE_POOL_ATTRIBUTES: &[(&str, Attribute)] = &[
    ("instance_pool_name", Attribute::required(AttributeKind::String)),
    (
        "min_idle_instances",
        Attribute::optional(AttributeKind::Int).with_default_int(0),
    ),
    ("max_capacity", Attribute::optional(AttributeKind::Int)),
    (
        "idle_instance_autotermination_minutes",
        Attribute::required(AttributeKind::Int),
    ),
    ("node_type_id", Attribute::required(AttributeKind::String).force_new()),
    (
        "aws_attributes",
        Attribute::optional(AttributeKind::Block(&AWS_SCHEMA)).force_new(),
    ),
    (
        "azure_attributes",
        Attribute::optional(AttributeKind::Block(&AZURE_SCHEMA)).force_new(),
    ),
    (
        "custom_tags",
        Attribute::optional(AttributeKind::StringMap).force_new(),
    ),
    (
        "enable_elastic_disk",
        Attribute::optional(AttributeKind::Bool)
            .force_new()
            .with_default_bool(true),
    ),
    (
        "disk_spec",
        Attribute::optional(AttributeKind::Block(&DISK_SPEC_SCHEMA)).force_new(),
    ),
    (
        "preloaded_spark_versions",
        Attribute::optional(AttributeKind::StringList).force_new(),
    ),
    ("default_tags", Attribute::computed(AttributeKind::StringMap)),
];

/// Schema of the `instance_pool` resource.
pub const INSTANCE_POOL_SCHEMA: Schema = Schema::new(INSTANCE_POOL_ATTRIBUTES);

/// Manages instance pools.
///
/// The identifier of a resource is the remote `instance_pool_id`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstancePoolResource;

impl InstancePoolResource {
    /// Creates the resource handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Resource for InstancePoolResource {
    const TYPE_NAME: &'static str = "instance_pool";
    const SCHEMA: &'static Schema = &INSTANCE_POOL_SCHEMA;

    async fn create(
        &self,
        client: &HttpClient,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        let pool: InstancePool = data.decode()?;
        let created = InstancePoolsApi::new(client).create(&pool).await?;
        if created.instance_pool_id.is_empty() {
            return Err(ResourceError::MissingId { operation: "create" });
        }
        data.set_id(created.instance_pool_id);
        self.read(client, data).await
    }

    async fn read(&self, client: &HttpClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        match InstancePoolsApi::new(client).read(data.id()).await {
            Ok(remote) => {
                data.encode(&remote)?;
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    resource = Self::TYPE_NAME,
                    id = %data.id(),
                    "Removing resource from state because it no longer exists"
                );
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        client: &HttpClient,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        if data.id().is_empty() {
            return Err(ResourceError::MissingId { operation: "update" });
        }
        let pool: InstancePool = data.decode()?;
        let request = InstancePoolAndStats::for_update(data.id(), pool);
        InstancePoolsApi::new(client).update(&request).await?;
        self.read(client, data).await
    }

    async fn delete(
        &self,
        client: &HttpClient,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        match InstancePoolsApi::new(client).delete(data.id()).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    resource = Self::TYPE_NAME,
                    id = %data.id(),
                    "Resource was already deleted"
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::model::{
        AwsAvailability, AzureAvailability, InstancePoolAwsAttributes, InstancePoolAzureAttributes,
    };
    use crate::resource::StateError;
    use serde_json::{json, Map, Value};

    fn config(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn shared_pool() -> Map<String, Value> {
        config(json!({
            "instance_pool_name": "Shared Pool",
            "min_idle_instances": 10,
            "max_capacity": 1000,
            "node_type_id": "i3.xlarge",
            "idle_instance_autotermination_minutes": 15
        }))
    }

    #[test]
    fn test_schema_accepts_minimal_pool() {
        assert!(INSTANCE_POOL_SCHEMA.validate(&shared_pool()).is_ok());
    }

    #[test]
    fn test_schema_requires_name_node_type_and_timeout() {
        let result = INSTANCE_POOL_SCHEMA.validate(&config(json!({"max_capacity": 5})));
        let Err(StateError::InvalidConfig { problems }) = result else {
            panic!("expected InvalidConfig");
        };
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn test_schema_rejects_unknown_availability() {
        let mut pool = shared_pool();
        pool.insert("aws_attributes".to_string(), json!({"availability": "SOMETIMES"}));
        assert!(INSTANCE_POOL_SCHEMA.validate(&pool).is_err());
    }

    #[test]
    fn test_schema_rejects_setting_default_tags() {
        let mut pool = shared_pool();
        pool.insert("default_tags".to_string(), json!({"a": "b"}));
        assert!(INSTANCE_POOL_SCHEMA.validate(&pool).is_err());
    }

    #[test]
    fn test_planned_state_decodes_with_elastic_disk_default() {
        let plan = INSTANCE_POOL_SCHEMA
            .plan(&InstancePoolResource.new_data(), &shared_pool())
            .unwrap();
        let pool: InstancePool = plan.planned.decode().unwrap();

        assert!(pool.enable_elastic_disk);
        assert_eq!(pool.max_capacity, 1000);
        assert!(pool.disk_spec.is_none());
        assert!(!plan.requires_replace);
    }

    #[test]
    fn test_changing_node_type_requires_replace() {
        let prior = ResourceData::with_state(
            &INSTANCE_POOL_SCHEMA,
            "abc",
            config(json!({
                "instance_pool_name": "Shared Pool",
                "min_idle_instances": 10,
                "max_capacity": 1000,
                "node_type_id": "i3.xlarge",
                "idle_instance_autotermination_minutes": 15,
                "enable_elastic_disk": true
            })),
        )
        .unwrap();

        let mut desired = shared_pool();
        desired.insert("max_capacity".to_string(), json!(20));
        let plan = INSTANCE_POOL_SCHEMA.plan(&prior, &desired).unwrap();
        assert!(!plan.requires_replace);

        desired.insert("node_type_id".to_string(), json!("i3.2xlarge"));
        let plan = INSTANCE_POOL_SCHEMA.plan(&prior, &desired).unwrap();
        assert!(plan.requires_replace);
        assert_eq!(plan.replacing_attributes().collect::<Vec<_>>(), vec!["node_type_id"]);
    }

    fn read_back(pool: InstancePool) -> ResourceData {
        let mut data = InstancePoolResource.new_data();
        data.set_id("abc");
        data.encode(&InstancePoolAndStats::for_update("abc", pool)).unwrap();
        data
    }

    #[test]
    fn test_unchanged_azure_pool_plans_no_changes() {
        let prior = read_back(InstancePool {
            instance_pool_name: "Shared Pool".to_string(),
            node_type_id: "Standard_DS3_v2".to_string(),
            idle_instance_autotermination_minutes: 15,
            azure_attributes: Some(InstancePoolAzureAttributes {
                availability: Some(AzureAvailability::SpotAzure),
                spot_bid_max_price: Some(-1.0),
            }),
            ..Default::default()
        });

        let plan = INSTANCE_POOL_SCHEMA
            .plan(
                &prior,
                &config(json!({
                    "instance_pool_name": "Shared Pool",
                    "node_type_id": "Standard_DS3_v2",
                    "idle_instance_autotermination_minutes": 15,
                    "enable_elastic_disk": false,
                    "azure_attributes": {
                        "availability": "SPOT_AZURE",
                        "spot_bid_max_price": -1
                    }
                })),
            )
            .unwrap();

        assert!(plan.is_empty(), "unexpected changes: {:?}", plan.changes);
        assert!(!plan.requires_replace);
    }

    #[test]
    fn test_explicit_zero_spot_bid_matches_omitted_value() {
        let prior = read_back(InstancePool {
            instance_pool_name: "Shared Pool".to_string(),
            node_type_id: "i3.xlarge".to_string(),
            idle_instance_autotermination_minutes: 15,
            aws_attributes: Some(InstancePoolAwsAttributes {
                availability: Some(AwsAvailability::Spot),
                ..Default::default()
            }),
            ..Default::default()
        });

        let mut desired = config(json!({
            "instance_pool_name": "Shared Pool",
            "node_type_id": "i3.xlarge",
            "idle_instance_autotermination_minutes": 15,
            "enable_elastic_disk": false,
            "aws_attributes": {
                "availability": "SPOT",
                "zone_id": "",
                "spot_bid_price_percent": 0
            }
        }));
        let plan = INSTANCE_POOL_SCHEMA.plan(&prior, &desired).unwrap();
        assert!(plan.is_empty(), "unexpected changes: {:?}", plan.changes);

        desired.insert(
            "aws_attributes".to_string(),
            json!({"availability": "SPOT", "spot_bid_price_percent": 90}),
        );
        let plan = INSTANCE_POOL_SCHEMA.plan(&prior, &desired).unwrap();
        assert!(plan.requires_replace);
        assert_eq!(plan.replacing_attributes().collect::<Vec<_>>(), vec!["aws_attributes"]);
    }

    #[test]
    fn test_encode_read_response() {
        let mut data = InstancePoolResource.new_data();
        data.encode(&InstancePoolAndStats {
            instance_pool_id: "abc".to_string(),
            pool: InstancePool {
                instance_pool_name: "Shared Pool".to_string(),
                node_type_id: "i3.xlarge".to_string(),
                idle_instance_autotermination_minutes: 15,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();

        assert_eq!(data.get("instance_pool_name"), Some(&json!("Shared Pool")));
        assert_eq!(data.get("max_capacity"), Some(&json!(0)));
        assert_eq!(data.get("enable_elastic_disk"), Some(&json!(false)));
        assert!(data.get("instance_pool_id").is_none());
    }
}
