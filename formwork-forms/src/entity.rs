//! The entity shapes the compiler reads from and writes back to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An existing record being edited.
///
/// `properties` holds the built-in entity properties (fields flagged
/// `is_default` map onto these); `custom_fields` holds everything the
/// catalog configured on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a built-in property.
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set a custom field value.
    pub fn with_custom_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.custom_fields.insert(name.into(), value);
        self
    }

    /// Stored value for a field name: built-in property first, then custom
    /// field. Stored nulls count as absent.
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.properties
            .get(name)
            .or_else(|| self.custom_fields.get(name))
            .filter(|v| !v.is_null())
    }

    /// Stored sub-value of a dictionary field, looked up by option value.
    pub fn dictionary_value(&self, name: &str, option_value: &str) -> Option<&Value> {
        self.custom_fields
            .get(name)
            .and_then(|v| v.get(option_value))
            .filter(|v| !v.is_null())
    }
}

/// Submitted form values regrouped and routed for persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitPayload {
    /// Values destined for built-in entity properties.
    pub default_fields: Map<String, Value>,
    /// Values destined for the entity's custom field bag.
    pub custom_fields: Map<String, Value>,
}
