//! Route descriptors and the route table
//!
//! A [`RouteTable`] is an ordered list of [`RouteDescriptor`]s keyed by
//! `(model name, action)`. Lookup returns the first match, so a duplicated
//! pair shadows later entries.

use crate::action::{Action, HttpMethod};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Placeholder name used when a route does not configure one
pub const DEFAULT_IDENTIFIER: &str = "id";

/// One route: `(model, action) -> (method, url template)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    model_name: String,
    #[serde(deserialize_with = "deserialize_action")]
    action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<HttpMethod>,
    url: String,
    #[serde(default = "default_identifier")]
    identifier: String,
}

fn default_identifier() -> String {
    DEFAULT_IDENTIFIER.to_string()
}

/// Standard action names in canonical form (`list` -> `all`); custom names
/// pass through unchanged
fn canonical_action(name: &str) -> Cow<'_, str> {
    match name.parse::<Action>() {
        Ok(action) => Cow::Borrowed(action.as_str()),
        Err(_) => Cow::Borrowed(name),
    }
}

fn deserialize_action<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(canonical_action(&name).into_owned())
}

impl RouteDescriptor {
    /// Create a route with no configured method and the `:id` placeholder
    ///
    /// Standard action names are stored in canonical form, so a `list`
    /// route serves `all`.
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        action: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let action = action.into();
        Self {
            model_name: model_name.into(),
            action: canonical_action(&action).into_owned(),
            method: None,
            url: url.into(),
            identifier: default_identifier(),
        }
    }

    /// With configured HTTP method
    #[inline]
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// With placeholder name (the template then contains `:<identifier>`)
    #[inline]
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Model this route belongs to
    #[inline]
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Action name
    #[inline]
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Configured method, if any
    #[inline]
    #[must_use]
    pub fn configured_method(&self) -> Option<HttpMethod> {
        self.method
    }

    /// Effective method: configured, else POST
    #[inline]
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method.unwrap_or(HttpMethod::DEFAULT)
    }

    /// URL template, relative to the router root
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Placeholder name
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Placeholder token as it appears in the template: `:id`
    #[inline]
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!(":{}", self.identifier)
    }

    /// Template with the first placeholder replaced by `id`
    ///
    /// Templates without a placeholder are returned unchanged.
    #[must_use]
    pub fn expand(&self, id: &str) -> String {
        self.url.replacen(&self.placeholder(), id, 1)
    }

    /// Does this route serve `(model_name, action)`?
    #[inline]
    #[must_use]
    pub fn matches(&self, model_name: &str, action: &str) -> bool {
        self.model_name == model_name && self.action == canonical_action(action)
    }
}

/// Ordered collection of routes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route
    #[inline]
    pub fn push(&mut self, route: RouteDescriptor) {
        self.routes.push(route);
    }

    /// First route serving `(model_name, action)`
    #[must_use]
    pub fn find(&self, model_name: &str, action: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.matches(model_name, action))
    }

    /// Routes registered for one model
    pub fn for_model<'a>(
        &'a self,
        model_name: &'a str,
    ) -> impl Iterator<Item = &'a RouteDescriptor> + 'a {
        self.routes
            .iter()
            .filter(move |route| route.model_name == model_name)
    }

    /// Iterate in registration order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RouteDescriptor> {
        self.routes.iter()
    }

    /// Number of routes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Is the table empty?
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<RouteDescriptor> for RouteTable {
    fn from_iter<T: IntoIterator<Item = RouteDescriptor>>(iter: T) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl Extend<RouteDescriptor> for RouteTable {
    fn extend<T: IntoIterator<Item = RouteDescriptor>>(&mut self, iter: T) {
        self.routes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteDescriptor;
    type IntoIter = std::slice::Iter<'a, RouteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
