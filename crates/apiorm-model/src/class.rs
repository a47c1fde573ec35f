//! Model class configuration
//!
//! Everything the request builder reads from a model: naming, identifier
//! field, schema, default scope and order, pagination and route overrides.

use apiorm_route::{naming, RouterConfig, DEFAULT_IDENTIFIER};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-model replacements for the router's root fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOverrides {
    /// Replaces the router domain
    pub domain: Option<String>,
    /// Replaces the router path prefix
    pub path: Option<String>,
    /// Replaces the router version prefix
    pub version: Option<String>,
    /// Appended to every route template of the model
    pub postfix: Option<String>,
}

impl RouteOverrides {
    /// Root fragments as a router configuration
    #[must_use]
    pub fn root_fragments(&self) -> RouterConfig {
        RouterConfig {
            domain: self.domain.clone(),
            path: self.path.clone(),
            version: self.version.clone(),
        }
    }

    /// Any root fragment overridden?
    #[inline]
    #[must_use]
    pub fn overrides_root(&self) -> bool {
        self.domain.is_some() || self.path.is_some() || self.version.is_some()
    }
}

/// Static model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelClass {
    /// Route table key
    pub model_name: String,
    /// Identifier field name
    #[serde(default = "default_identifier")]
    pub identifier: String,
    /// Schema fields; records carry each one, `null` when unset
    #[serde(default)]
    pub fields: Vec<String>,
    /// Filter predicate sent as `scope`
    #[serde(default)]
    pub default_scope: Option<Value>,
    /// Sort specification sent as `order`
    #[serde(default)]
    pub default_order: Option<Value>,
    /// Records to skip; 0 means no constraint
    #[serde(default)]
    pub skip: Option<u64>,
    /// Records to return; 0 means no constraint
    #[serde(default)]
    pub limit: Option<u64>,
    /// Table / collection name
    #[serde(default)]
    pub table_name: Option<String>,
    /// Root fragment and postfix overrides
    #[serde(default)]
    pub route: RouteOverrides,
}

fn default_identifier() -> String {
    DEFAULT_IDENTIFIER.to_string()
}

impl ModelClass {
    /// Create model with `id` identifier and no schema
    #[must_use]
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            identifier: default_identifier(),
            fields: Vec::new(),
            default_scope: None,
            default_order: None,
            skip: None,
            limit: None,
            table_name: None,
            route: RouteOverrides::default(),
        }
    }

    /// With identifier field
    #[inline]
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// With schema fields
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// With default scope
    #[inline]
    #[must_use]
    pub fn with_default_scope(mut self, scope: Value) -> Self {
        self.default_scope = Some(scope);
        self
    }

    /// With default order
    #[inline]
    #[must_use]
    pub fn with_default_order(mut self, order: Value) -> Self {
        self.default_order = Some(order);
        self
    }

    /// With skip
    #[inline]
    #[must_use]
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// With limit
    #[inline]
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// With table name
    #[inline]
    #[must_use]
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// With route overrides
    #[inline]
    #[must_use]
    pub fn with_route(mut self, route: RouteOverrides) -> Self {
        self.route = route;
        self
    }

    /// Table name, or the pluralized model name
    #[must_use]
    pub fn table_name(&self) -> String {
        self.table_name
            .clone()
            .unwrap_or_else(|| naming::collection_name(&self.model_name))
    }

    /// Effective skip (0 when unset)
    #[inline]
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    /// Effective limit (0 when unset)
    #[inline]
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(0)
    }
}
