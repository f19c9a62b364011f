//! Attribute schemas for declarative resources.
//!
//! A [`Schema`] is a static table of named [`Attribute`]s built with
//! `const fn`s, so it can live in a `const` next to the resource that owns it.
//!
//! # Example
//!
//! ```rust
//! use instance_pool_provider::resource::{Attribute, AttributeKind, Schema};
//!
//! const ATTRIBUTES: &[(&str, Attribute)] = &[
//!     ("name", Attribute::required(AttributeKind::String)),
//!     ("size", Attribute::optional(AttributeKind::Int).with_default_int(1)),
//!     ("zone", Attribute::required(AttributeKind::String).force_new()),
//! ];
//! const SCHEMA: Schema = Schema::new(ATTRIBUTES);
//!
//! assert!(SCHEMA.attribute("zone").unwrap().force_new);
//! assert!(SCHEMA.attribute("missing").is_none());
//! ```

use serde_json::{Map, Value};

use crate::resource::errors::StateError;

/// The value type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttributeKind {
    /// A string.
    String,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
    /// A signed integer.
    Int,
    /// A floating point number.
    Float,
    /// A boolean.
    Bool,
    /// A list of strings.
    StringList,
    /// A map of string to string.
    StringMap,
    /// A single nested block with its own schema.
    Block(&'static Schema),
}

impl AttributeKind {
    /// Returns the value an absent attribute of this kind reads as.
    ///
    /// Blocks have no zero value and read as `null`.
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::String | Self::Enum(_) => Value::String(String::new()),
            Self::Int => Value::from(0),
            Self::Float => Value::from(0.0),
            Self::Bool => Value::Bool(false),
            Self::StringList => Value::Array(Vec::new()),
            Self::StringMap => Value::Object(Map::new()),
            Self::Block(_) => Value::Null,
        }
    }

    /// Returns a short name used in validation messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Enum(_) => "one of a fixed set of strings",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Bool => "boolean",
            Self::StringList => "list of strings",
            Self::StringMap => "map of strings",
            Self::Block(_) => "block",
        }
    }

    /// Returns `value` in the canonical form used for comparison.
    ///
    /// Integers compare as `i64` and floats as `f64`, so `-1` and `-1.0`
    /// are the same `Float`. Block values keep only their schema's
    /// attributes, each in its effective form.
    #[must_use]
    pub fn normalize(&self, value: &Value) -> Value {
        match (self, value) {
            (Self::Int, Value::Number(n)) => n.as_i64().map_or_else(|| value.clone(), Value::from),
            (Self::Float, Value::Number(n)) => n.as_f64().map_or_else(|| value.clone(), Value::from),
            (Self::Block(schema), Value::Object(map)) => Value::Object(
                schema
                    .attributes()
                    .map(|(name, attribute)| (name.to_string(), attribute.effective(map.get(name))))
                    .collect(),
            ),
            _ => value.clone(),
        }
    }

    fn check(&self, path: &str, value: &Value, problems: &mut Vec<String>) {
        let ok = match (self, value) {
            (Self::String, Value::String(_))
            | (Self::Float, Value::Number(_))
            | (Self::Bool, Value::Bool(_)) => true,
            (Self::Enum(allowed), Value::String(s)) => {
                if !allowed.contains(&s.as_str()) {
                    problems.push(format!(
                        "{path}: expected one of [{}], got \"{s}\"",
                        allowed.join(", ")
                    ));
                }
                true
            }
            (Self::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::StringList, Value::Array(items)) => items.iter().all(Value::is_string),
            (Self::StringMap, Value::Object(map)) => map.values().all(Value::is_string),
            (Self::Block(schema), Value::Object(map)) => {
                schema.check_object(Some(path), map, problems);
                true
            }
            _ => false,
        };
        if !ok {
            problems.push(format!("{path}: expected {}", self.type_name()));
        }
    }
}

/// How an attribute's value is supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Must be set in configuration.
    Required,
    /// May be set in configuration.
    Optional,
    /// May be set; when unset, the last known value is kept.
    OptionalComputed,
    /// Set only by the remote service.
    Computed,
}

/// A const-friendly default value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultValue {
    /// Integer default.
    Int(i64),
    /// Boolean default.
    Bool(bool),
    /// String default.
    Str(&'static str),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            Self::Int(i) => Value::from(i),
            Self::Bool(b) => Value::Bool(b),
            Self::Str(s) => Value::String(s.to_string()),
        }
    }
}

/// A single attribute definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attribute {
    /// The value type.
    pub kind: AttributeKind,
    /// How the value is supplied.
    pub presence: Presence,
    /// Changing this attribute on an existing resource requires replacement.
    pub force_new: bool,
    /// Value used when the attribute is absent from configuration.
    pub default: Option<DefaultValue>,
}

impl Attribute {
    const fn with_presence(kind: AttributeKind, presence: Presence) -> Self {
        Self {
            kind,
            presence,
            force_new: false,
            default: None,
        }
    }

    /// A required attribute.
    #[must_use]
    pub const fn required(kind: AttributeKind) -> Self {
        Self::with_presence(kind, Presence::Required)
    }

    /// An optional attribute.
    #[must_use]
    pub const fn optional(kind: AttributeKind) -> Self {
        Self::with_presence(kind, Presence::Optional)
    }

    /// An optional attribute that keeps its prior value when unset.
    #[must_use]
    pub const fn optional_computed(kind: AttributeKind) -> Self {
        Self::with_presence(kind, Presence::OptionalComputed)
    }

    /// An attribute set only by the remote service.
    #[must_use]
    pub const fn computed(kind: AttributeKind) -> Self {
        Self::with_presence(kind, Presence::Computed)
    }

    /// Marks the attribute as requiring replacement when changed.
    #[must_use]
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Sets an integer default.
    #[must_use]
    pub const fn with_default_int(mut self, value: i64) -> Self {
        self.default = Some(DefaultValue::Int(value));
        self
    }

    /// Sets a boolean default.
    #[must_use]
    pub const fn with_default_bool(mut self, value: bool) -> Self {
        self.default = Some(DefaultValue::Bool(value));
        self
    }

    /// Sets a string default.
    #[must_use]
    pub const fn with_default_str(mut self, value: &'static str) -> Self {
        self.default = Some(DefaultValue::Str(value));
        self
    }

    /// Returns `true` if configuration may set this attribute.
    #[must_use]
    pub const fn is_configurable(&self) -> bool {
        !matches!(self.presence, Presence::Computed)
    }

    /// Returns `true` if an unset configuration value keeps the prior value.
    #[must_use]
    pub const fn keeps_prior(&self) -> bool {
        matches!(self.presence, Presence::OptionalComputed | Presence::Computed)
    }

    /// Returns the value used when configuration leaves this attribute unset.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default
            .map_or_else(|| self.kind.zero_value(), DefaultValue::to_value)
    }

    /// Returns the effective value of a stored value, treating absent and
    /// `null` as the kind's zero value. Present values are normalized with
    /// [`AttributeKind::normalize`].
    #[must_use]
    pub fn effective(&self, value: Option<&Value>) -> Value {
        match value {
            Some(v) if !v.is_null() => self.kind.normalize(v),
            _ => self.kind.zero_value(),
        }
    }
}

/// A static table of attributes.
#[derive(Debug, PartialEq)]
pub struct Schema {
    attributes: &'static [(&'static str, Attribute)],
}

impl Schema {
    /// Creates a schema from an attribute table.
    #[must_use]
    pub const fn new(attributes: &'static [(&'static str, Attribute)]) -> Self {
        Self { attributes }
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| *attr_name == name)
            .map(|(_, attribute)| attribute)
    }

    /// Iterates over all attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Attribute)> + '_ {
        self.attributes.iter().map(|(name, attribute)| (*name, attribute))
    }

    /// Validates a configuration object against this schema.
    ///
    /// Every problem is reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidConfig`] listing missing required
    /// attributes, unknown or computed-only attributes, and type mismatches.
    pub fn validate(&self, config: &Map<String, Value>) -> Result<(), StateError> {
        let mut problems = Vec::new();
        self.check_object(None, config, &mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(StateError::InvalidConfig { problems })
        }
    }

    fn check_object(
        &self,
        prefix: Option<&str>,
        object: &Map<String, Value>,
        problems: &mut Vec<String>,
    ) {
        let qualify = |name: &str| {
            prefix.map_or_else(|| name.to_string(), |prefix| format!("{prefix}.{name}"))
        };

        for (name, attribute) in self.attributes() {
            let value = object.get(name).filter(|v| !v.is_null());
            match value {
                None if attribute.presence == Presence::Required => {
                    problems.push(format!("{}: required attribute is not set", qualify(name)));
                }
                None => {}
                Some(_) if !attribute.is_configurable() => {
                    problems.push(format!("{}: attribute is computed and cannot be set", qualify(name)));
                }
                Some(value) => attribute.kind.check(&qualify(name), value, problems),
            }
        }

        for name in object.keys() {
            if self.attribute(name).is_none() {
                problems.push(format!("{}: unknown attribute", qualify(name)));
            }
        }
    }
}
