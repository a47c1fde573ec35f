//! Request parameters
//!
//! `scope`, `order` and `attributes` travel as JSON-encoded strings; `skip`
//! and `limit` as integers. Scope and order are always sent, `{}` when unset.

use apiorm_model::{ModelClass, Record};
use serde::Serialize;
use serde_json::{json, Value};

const EMPTY_OBJECT: &str = "{}";

/// Parameter set of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    /// JSON-encoded filter predicate
    pub scope: String,
    /// JSON-encoded sort specification
    pub order: String,
    /// Records to skip (0: unconstrained)
    pub skip: u64,
    /// Records to return (0: unconstrained)
    pub limit: u64,
    /// JSON-encoded attribute mapping, for instance-bound actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
}

impl RequestParams {
    /// Collection parameters from a model's defaults
    #[must_use]
    pub fn for_class(class: &ModelClass) -> Self {
        Self {
            scope: encode(class.default_scope.as_ref()),
            order: encode(class.default_order.as_ref()),
            skip: class.skip(),
            limit: class.limit(),
            attributes: None,
        }
    }

    /// Add a record's full attribute mapping
    #[must_use]
    pub fn with_record(mut self, record: &Record) -> Self {
        self.attributes = Some(Value::Object(record.attributes().clone()).to_string());
        self
    }

    /// JSON body form
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "scope": self.scope,
            "order": self.order,
            "skip": self.skip,
            "limit": self.limit,
        });
        if let (Some(attributes), Value::Object(map)) = (&self.attributes, &mut body) {
            map.insert("attributes".to_string(), Value::String(attributes.clone()));
        }
        body
    }

    /// Query string form, in a stable order
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("scope".to_string(), self.scope.clone()),
            ("order".to_string(), self.order.clone()),
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(attributes) = &self.attributes {
            query.push(("attributes".to_string(), attributes.clone()));
        }
        query
    }
}

/// JSON-encode, defaulting to `{}`
fn encode(value: Option<&Value>) -> String {
    match value {
        Some(Value::Null) | None => EMPTY_OBJECT.to_string(),
        Some(value) => value.to_string(),
    }
}
