//! Planning: diffing prior state against desired configuration.

use serde_json::{Map, Value};

use crate::resource::data::ResourceData;
use crate::resource::errors::StateError;
use crate::resource::schema::Schema;

/// A single attribute whose effective value changes.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeChange {
    /// The attribute name.
    pub name: &'static str,
    /// The effective prior value.
    pub old: Value,
    /// The effective planned value.
    pub new: Value,
    /// Whether the attribute forces replacement.
    pub force_new: bool,
}

/// The outcome of planning a configuration against prior state.
#[derive(Clone, Debug)]
pub struct Plan {
    /// Changed attributes, in schema order.
    pub changes: Vec<AttributeChange>,
    /// `true` when an existing resource must be destroyed and recreated.
    pub requires_replace: bool,
    /// The prior data with the configuration applied.
    pub planned: ResourceData,
}

impl Plan {
    /// Returns `true` if nothing changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the names of changed attributes that force replacement.
    pub fn replacing_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.changes
            .iter()
            .filter(|change| change.force_new)
            .map(|change| change.name)
    }
}

impl Schema {
    /// Plans `config` against `prior`.
    ///
    /// Absent and `null` values compare as the zero value of their kind, so
    /// an unset optional attribute does not show up as a change. Numbers and
    /// nested blocks compare by kind (see [`crate::resource::Attribute::effective`]). Replacement
    /// is only required when the prior resource exists and a force-new
    /// attribute changes.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidConfig`] if `config` fails validation.
    pub fn plan(&self, prior: &ResourceData, config: &Map<String, Value>) -> Result<Plan, StateError> {
        self.validate(config)?;

        let mut planned = prior.clone();
        planned.apply_config(config);

        let changes: Vec<AttributeChange> = self
            .attributes()
            .filter_map(|(name, attribute)| {
                let old = attribute.effective(prior.get(name));
                let new = attribute.effective(planned.get(name));
                (old != new).then_some(AttributeChange {
                    name,
                    old,
                    new,
                    force_new: attribute.force_new,
                })
            })
            .collect();

        let requires_replace =
            !prior.id().is_empty() && changes.iter().any(|change| change.force_new);

        tracing::debug!(
            changes = changes.len(),
            requires_replace,
            "Planned resource changes"
        );

        Ok(Plan {
            changes,
            requires_replace,
            planned,
        })
    }
}
