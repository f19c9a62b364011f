//! Fixture harness for resource lifecycle tests.
//!
//! A [`ResourceFixture`] replays canned [`HttpFixture`]s on a local mock
//! server, drives exactly one lifecycle operation of a resource against it,
//! and hands back the resulting data and operation result.

#![allow(dead_code)]

use std::collections::BTreeMap;

use instance_pool_provider::resource::{Resource, ResourceData, ResourceError};
use instance_pool_provider::{ApiToken, ClientConfig, HostUrl, HttpClient};
use serde::Serialize;
use serde_json::{Map, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// One expected request and its canned response.
#[derive(Clone, Debug)]
pub struct HttpFixture {
    pub method: &'static str,
    /// Full path, optionally with a query string.
    pub resource: &'static str,
    /// When set, the request body must equal this JSON exactly.
    pub expected_request: Option<Value>,
    pub response: Option<Value>,
    pub status: u16,
}

impl HttpFixture {
    fn new(method: &'static str, resource: &'static str) -> Self {
        Self {
            method,
            resource,
            expected_request: None,
            response: None,
            status: 200,
        }
    }

    pub fn get(resource: &'static str) -> Self {
        Self::new("GET", resource)
    }

    pub fn post(resource: &'static str) -> Self {
        Self::new("POST", resource)
    }

    pub fn expect_request(mut self, body: impl Serialize) -> Self {
        self.expected_request = Some(serde_json::to_value(body).unwrap());
        self
    }

    pub fn respond(mut self, body: impl Serialize) -> Self {
        self.response = Some(serde_json::to_value(body).unwrap());
        self
    }

    pub const fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    async fn mount(&self, server: &MockServer) {
        let (resource_path, query) = self
            .resource
            .split_once('?')
            .unwrap_or((self.resource, ""));

        let mut mock = Mock::given(method(self.method))
            .and(path(resource_path))
            .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()));

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            mock = mock.and(query_param(
                urlencoding::decode(key).unwrap().into_owned(),
                urlencoding::decode(value).unwrap().into_owned(),
            ));
        }

        if let Some(expected) = &self.expected_request {
            mock = mock.and(body_json(expected.clone()));
        }

        let mut template = ResponseTemplate::new(self.status);
        if let Some(response) = &self.response {
            template = template.set_body_json(response.clone());
        }

        mock.respond_with(template).expect(1..).mount(server).await;
    }
}

/// A single lifecycle operation to drive against mounted fixtures.
#[derive(Clone, Debug, Default)]
pub struct ResourceFixture {
    pub fixtures: Vec<HttpFixture>,
    /// Desired configuration, used by create and update.
    pub state: Option<Value>,
    /// Prior state in flat string form.
    pub instance_state: BTreeMap<String, String>,
    pub id: &'static str,
    /// Start from bare data carrying only `id`.
    pub new: bool,
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    /// Assert the identifier was cleared.
    pub removed: bool,
    /// Expected replacement decision of the plan.
    pub requires_new: bool,
}

impl ResourceFixture {
    /// Runs the selected operation and returns the resulting data and result.
    pub async fn apply<R: Resource>(self, resource: &R) -> (ResourceData, Result<(), ResourceError>) {
        let operations = [self.create, self.read, self.update, self.delete];
        assert_eq!(
            operations.iter().filter(|selected| **selected).count(),
            1,
            "exactly one of create, read, update or delete must be set"
        );

        let server = MockServer::start().await;
        for fixture in &self.fixtures {
            fixture.mount(&server).await;
        }

        let config = ClientConfig::builder()
            .host(HostUrl::new(server.uri()).unwrap())
            .token(ApiToken::new(TEST_TOKEN).unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let mut prior = if self.new {
            ResourceData::with_id(R::SCHEMA, self.id)
        } else {
            let mut data = ResourceData::from_flat(R::SCHEMA, &self.instance_state).unwrap();
            if !self.id.is_empty() {
                data.set_id(self.id);
            }
            data
        };

        let (data, result) = if self.create || self.update {
            let config: Map<String, Value> = self
                .state
                .as_ref()
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            match R::SCHEMA.plan(&prior, &config) {
                Ok(plan) => {
                    assert_eq!(
                        plan.requires_replace, self.requires_new,
                        "unexpected replacement decision, changes: {:?}",
                        plan.changes
                    );
                    let mut data = plan.planned;
                    let result = if self.create {
                        resource.create(&client, &mut data).await
                    } else {
                        resource.update(&client, &mut data).await
                    };
                    (data, result)
                }
                Err(e) => (prior, Err(e.into())),
            }
        } else {
            let result = if self.read {
                resource.read(&client, &mut prior).await
            } else {
                resource.delete(&client, &mut prior).await
            };
            (prior, result)
        };

        if self.removed {
            assert_eq!(data.id(), "", "resource should have been removed");
        }

        server.verify().await;
        (data, result)
    }

    /// Runs the selected operation and asserts it succeeded.
    pub async fn apply_no_error<R: Resource>(self, resource: &R) -> ResourceData {
        let (data, result) = self.apply(resource).await;
        tokio_test::assert_ok!(result);
        data
    }
}

/// Asserts `result` failed with a message starting with `prefix`.
pub fn assert_error_starts_with(result: &Result<(), ResourceError>, prefix: &str) {
    match result {
        Ok(()) => panic!("expected an error starting with {prefix:?}, got success"),
        Err(e) => {
            let message = e.to_string();
            assert!(
                message.starts_with(prefix),
                "expected error starting with {prefix:?}, got {message:?}"
            );
        }
    }
}

/// Converts a `json!` object literal into a map.
pub fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Builds a flat state map from pairs.
pub fn flat(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}
