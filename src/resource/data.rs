//! Resource data: the identifier and state map of one managed object.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::resource::errors::StateError;
use crate::resource::schema::{AttributeKind, Schema};

/// Flat state key carrying the identifier.
const ID_KEY: &str = "id";

/// The identifier and attribute values of a single resource instance.
///
/// An empty identifier means the resource does not exist remotely, either
/// because it was never created or because a read found it gone.
///
/// # Example
///
/// ```rust
/// use instance_pool_provider::resource::{Attribute, AttributeKind, ResourceData, Schema};
/// use serde_json::json;
///
/// const ATTRIBUTES: &[(&str, Attribute)] = &[
///     ("name", Attribute::required(AttributeKind::String)),
/// ];
/// const SCHEMA: Schema = Schema::new(ATTRIBUTES);
///
/// let mut data = ResourceData::new(&SCHEMA);
/// data.set("name", json!("pool")).unwrap();
/// data.set_id("abc");
///
/// assert_eq!(data.id(), "abc");
/// assert_eq!(data.get("name"), Some(&json!("pool")));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceData {
    schema: &'static Schema,
    id: String,
    state: Map<String, Value>,
}

impl ResourceData {
    /// Creates empty resource data with no identifier.
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            id: String::new(),
            state: Map::new(),
        }
    }

    /// Creates resource data with an identifier and no state.
    #[must_use]
    pub fn with_id(schema: &'static Schema, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new(schema)
        }
    }

    /// Creates resource data from a JSON state object.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownAttribute`] if the state carries a key
    /// the schema does not define.
    pub fn with_state(
        schema: &'static Schema,
        id: impl Into<String>,
        state: Map<String, Value>,
    ) -> Result<Self, StateError> {
        if let Some(name) = state.keys().find(|name| schema.attribute(name).is_none()) {
            return Err(StateError::UnknownAttribute { name: name.clone() });
        }
        Ok(Self {
            schema,
            id: id.into(),
            state,
        })
    }

    /// Creates resource data from a flat string map.
    ///
    /// The `id` key sets the identifier; any other key must name a top-level
    /// primitive attribute and is coerced to the attribute's kind.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] for unknown keys, non-primitive attributes, and
    /// values that do not parse as the attribute's kind.
    pub fn from_flat(
        schema: &'static Schema,
        flat: &BTreeMap<String, String>,
    ) -> Result<Self, StateError> {
        let mut data = Self::new(schema);
        for (name, raw) in flat {
            if name == ID_KEY {
                data.id.clone_from(raw);
                continue;
            }
            let attribute = schema
                .attribute(name)
                .ok_or_else(|| StateError::UnknownAttribute { name: name.clone() })?;
            let invalid = || StateError::InvalidFlatValue {
                name: name.clone(),
                value: raw.clone(),
                expected: attribute.kind.type_name(),
            };
            let value = match attribute.kind {
                AttributeKind::String | AttributeKind::Enum(_) => Value::String(raw.clone()),
                AttributeKind::Int => Value::from(raw.parse::<i64>().map_err(|_| invalid())?),
                AttributeKind::Float => Value::from(raw.parse::<f64>().map_err(|_| invalid())?),
                AttributeKind::Bool => Value::Bool(raw.parse::<bool>().map_err(|_| invalid())?),
                AttributeKind::StringList | AttributeKind::StringMap | AttributeKind::Block(_) => {
                    return Err(StateError::UnsupportedFlatKey { name: name.clone() });
                }
            };
            data.state.insert(name.clone(), value);
        }
        Ok(data)
    }

    /// Returns the schema this data follows.
    #[must_use]
    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Returns the identifier, empty when the resource does not exist.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Clears the identifier, marking the resource as removed.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// Returns the stored value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.state.get(name)
    }

    /// Sets the value of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownAttribute`] if the schema does not
    /// define `name`.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), StateError> {
        if self.schema.attribute(name).is_none() {
            return Err(StateError::UnknownAttribute {
                name: name.to_string(),
            });
        }
        self.state.insert(name.to_string(), value);
        Ok(())
    }

    /// Returns the full state map.
    #[must_use]
    pub const fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    /// Decodes the state into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Json`] if the state does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StateError> {
        Ok(serde_json::from_value(Value::Object(self.state.clone()))?)
    }

    /// Replaces the state with the schema attributes of a typed value.
    ///
    /// Fields outside the schema are dropped. Absent attributes read as the
    /// zero value of their kind, except blocks, which are left unset.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotAnObject`] if `value` does not serialize to a
    /// JSON object, or [`StateError::Json`] if serialization fails.
    pub fn encode<T: Serialize>(&mut self, value: &T) -> Result<(), StateError> {
        let Value::Object(mut source) = serde_json::to_value(value)? else {
            return Err(StateError::NotAnObject);
        };

        let mut state = Map::new();
        for (name, attribute) in self.schema.attributes() {
            match source.remove(name).filter(|v| !v.is_null()) {
                Some(value) => {
                    state.insert(name.to_string(), value);
                }
                None if matches!(attribute.kind, AttributeKind::Block(_)) => {}
                None => {
                    state.insert(name.to_string(), attribute.kind.zero_value());
                }
            }
        }
        self.state = state;
        Ok(())
    }

    /// Overlays desired configuration onto this state.
    ///
    /// Set values win. Unset optional-computed and computed attributes keep
    /// their current value; any other unset attribute takes its default, or
    /// is removed if it is a block.
    pub fn apply_config(&mut self, config: &Map<String, Value>) {
        for (name, attribute) in self.schema.attributes() {
            match config.get(name).filter(|v| !v.is_null()) {
                Some(value) if attribute.is_configurable() => {
                    self.state.insert(name.to_string(), value.clone());
                }
                _ if attribute.keeps_prior() => {}
                _ if matches!(attribute.kind, AttributeKind::Block(_)) => {
                    self.state.remove(name);
                }
                _ => {
                    self.state.insert(name.to_string(), attribute.default_value());
                }
            }
        }
    }
}
