//! Record instances
//!
//! A [`Record`] is new while its identifier is `null` or absent and
//! persisted once the server has assigned one.

use crate::class::ModelClass;
use crate::error::ModelError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One instance of a model
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: Arc<ModelClass>,
    attributes: Map<String, Value>,
}

impl Record {
    /// Create from an attribute map
    ///
    /// Schema fields missing from `attributes` are set to `null`; keys outside
    /// the schema are kept.
    #[must_use]
    pub fn new(class: Arc<ModelClass>, mut attributes: Map<String, Value>) -> Self {
        for field in &class.fields {
            attributes.entry(field.as_str()).or_insert(Value::Null);
        }
        Self { class, attributes }
    }

    /// Create from a JSON object
    ///
    /// # Errors
    /// `NotAnObject` when `value` is not an object.
    pub fn build(class: &Arc<ModelClass>, value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(attributes) => Ok(Self::new(Arc::clone(class), attributes)),
            other => Err(ModelError::NotAnObject {
                model: class.model_name.clone(),
                value: other,
            }),
        }
    }

    /// Model class
    #[inline]
    #[must_use]
    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// Model name
    #[inline]
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.class.model_name
    }

    /// Full attribute mapping
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Consume into the attribute mapping
    #[inline]
    #[must_use]
    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }

    /// Attribute value
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Set attribute value
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.attributes.insert(field.into(), value);
    }

    /// Identifier, when assigned
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.attributes
            .get(&self.class.identifier)
            .filter(|value| !value.is_null())
    }

    /// Assign identifier
    pub fn set_id(&mut self, id: Value) {
        let field = self.class.identifier.clone();
        self.attributes.insert(field, id);
    }

    /// No identifier assigned yet
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Identifier assigned
    #[inline]
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.is_new()
    }

    /// Identifier rendered for URL substitution
    ///
    /// `None` for new records.
    ///
    /// # Errors
    /// `InvalidIdentifier` when the identifier is not a string or number.
    pub fn id_string(&self) -> Result<Option<String>, ModelError> {
        match self.id() {
            None => Ok(None),
            Some(Value::String(id)) => Ok(Some(id.clone())),
            Some(Value::Number(id)) => Ok(Some(id.to_string())),
            Some(other) => Err(ModelError::InvalidIdentifier {
                model: self.class.model_name.clone(),
                value: other.clone(),
            }),
        }
    }

    /// Attributes as a JSON object
    #[inline]
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}
