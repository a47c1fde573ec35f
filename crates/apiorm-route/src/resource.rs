//! Resource definitions
//!
//! A resource expands one model name into its standard routes:
//!
//! | action | path                    |
//! |--------|-------------------------|
//! | all    | `/users`                |
//! | first  | `/users/first`          |
//! | last   | `/users/last`           |
//! | count  | `/users/count`          |
//! | create | `/users/create`         |
//! | update | `/user/:id/update`      |
//! | delete | `/user/:id/delete`      |
//!
//! plus any custom collection and member actions.

use crate::action::{Action, ActionScope, HttpMethod};
use crate::error::RouteError;
use crate::naming;
use crate::table::{RouteDescriptor, DEFAULT_IDENTIFIER};
use crate::url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings applied to every route of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDefaults {
    /// Method for routes that do not override it
    pub method: Option<HttpMethod>,
    /// Suffix appended to every path, e.g. `.json`
    pub postfix: Option<String>,
}

/// Per-action path and method override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOverride {
    /// Replaces the action's path segment
    pub path: Option<String>,
    /// Replaces the default method
    pub method: Option<HttpMethod>,
}

impl RouteOverride {
    /// Override with a path segment
    #[inline]
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            method: None,
        }
    }

    /// Override with a method
    #[inline]
    #[must_use]
    pub fn method(method: HttpMethod) -> Self {
        Self {
            path: None,
            method: Some(method),
        }
    }
}

/// Options for [`Router::resource`](crate::Router::resource)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceOptions {
    /// Defaults for every generated route
    pub defaults: RouteDefaults,
    /// Generate only these standard actions, with optional overrides
    pub only: Option<BTreeMap<String, RouteOverride>>,
    /// Skip these standard actions
    pub except: Vec<String>,
    /// Extra collection actions: `/<collection>/<path or name>`
    pub collection: BTreeMap<String, RouteOverride>,
    /// Extra member actions: `/<member>/:id/<path or name>`
    pub member: BTreeMap<String, RouteOverride>,
    /// Placeholder name (default `id`)
    pub identifier: Option<String>,
    /// Collection path name (default: plural of the model name)
    pub collection_name: Option<String>,
    /// Member path name (default: snake case of the model name)
    pub member_name: Option<String>,
}

impl ResourceOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default method
    #[inline]
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.defaults.method = Some(method);
        self
    }

    /// With path postfix
    #[inline]
    #[must_use]
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.defaults.postfix = Some(postfix.into());
        self
    }

    /// Restrict to `action`, with an override
    #[must_use]
    pub fn only(mut self, action: Action, route: RouteOverride) -> Self {
        self.only
            .get_or_insert_with(BTreeMap::new)
            .insert(action.as_str().to_string(), route);
        self
    }

    /// Skip `action`
    #[inline]
    #[must_use]
    pub fn except(mut self, action: Action) -> Self {
        self.except.push(action.as_str().to_string());
        self
    }

    /// Add a custom collection action
    #[inline]
    #[must_use]
    pub fn with_collection_action(mut self, name: impl Into<String>, route: RouteOverride) -> Self {
        self.collection.insert(name.into(), route);
        self
    }

    /// Add a custom member action
    #[inline]
    #[must_use]
    pub fn with_member_action(mut self, name: impl Into<String>, route: RouteOverride) -> Self {
        self.member.insert(name.into(), route);
        self
    }

    /// With placeholder name
    #[inline]
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// With collection path name
    #[inline]
    #[must_use]
    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = Some(name.into());
        self
    }

    /// Expand into route descriptors for `model_name`
    ///
    /// # Errors
    /// `UnknownAction` if `only` or `except` names a non-standard action,
    /// `EmptyModelName` for an empty model name.
    pub fn routes(&self, model_name: &str) -> Result<Vec<RouteDescriptor>, RouteError> {
        if model_name.trim().is_empty() {
            return Err(RouteError::EmptyModelName);
        }

        let only = self
            .only
            .as_ref()
            .map(|only| {
                only.iter()
                    .map(|(name, route)| Ok((name.parse::<Action>()?, route)))
                    .collect::<Result<BTreeMap<_, _>, RouteError>>()
            })
            .transpose()?;
        let except = self
            .except
            .iter()
            .map(|name| name.parse::<Action>())
            .collect::<Result<Vec<_>, _>>()?;

        let builder = PathBuilder {
            model_name,
            collection: self
                .collection_name
                .clone()
                .unwrap_or_else(|| naming::collection_name(model_name)),
            member: self
                .member_name
                .clone()
                .unwrap_or_else(|| naming::member_name(model_name)),
            identifier: self.identifier.as_deref().unwrap_or(DEFAULT_IDENTIFIER),
            defaults: &self.defaults,
        };

        let mut routes = Vec::new();
        for action in Action::STANDARD {
            if except.contains(&action) {
                continue;
            }
            let route = match &only {
                Some(only) => match only.get(&action) {
                    Some(route) => Some(*route),
                    None => continue,
                },
                None => None,
            };
            let segment = route
                .and_then(|r| r.path.as_deref())
                .or_else(|| action.default_segment());
            routes.push(builder.build(
                action.as_str(),
                action.scope(),
                segment,
                route.and_then(|r| r.method),
            ));
        }

        for (name, route) in &self.collection {
            let segment = route.path.as_deref().unwrap_or(name);
            routes.push(builder.build(name, ActionScope::Collection, Some(segment), route.method));
        }
        for (name, route) in &self.member {
            let segment = route.path.as_deref().unwrap_or(name);
            routes.push(builder.build(name, ActionScope::Member, Some(segment), route.method));
        }

        tracing::debug!("Expanded resource {} into {} routes", model_name, routes.len());
        Ok(routes)
    }
}

struct PathBuilder<'a> {
    model_name: &'a str,
    collection: String,
    member: String,
    identifier: &'a str,
    defaults: &'a RouteDefaults,
}

impl PathBuilder<'_> {
    fn build(
        &self,
        action: &str,
        scope: ActionScope,
        segment: Option<&str>,
        method: Option<HttpMethod>,
    ) -> RouteDescriptor {
        let placeholder = format!(":{}", self.identifier);
        let segment = segment.unwrap_or("");
        let mut path = match scope {
            ActionScope::Collection => url::path([self.collection.as_str(), segment]),
            ActionScope::Member => {
                url::path([self.member.as_str(), placeholder.as_str(), segment])
            }
        };
        if let Some(postfix) = &self.defaults.postfix {
            path.push_str(postfix);
        }

        let route = RouteDescriptor::new(self.model_name, action, path)
            .with_identifier(self.identifier);
        match method.or(self.defaults.method) {
            Some(method) => route.with_method(method),
            None => route,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn urls(routes: &[RouteDescriptor]) -> Vec<(&str, &str)> {
        routes.iter().map(|r| (r.action(), r.url())).collect()
    }

    #[test]
    fn standard_routes() {
        let routes = ResourceOptions::default().routes("User").unwrap();
        assert_eq!(
            urls(&routes),
            vec![
                ("all", "/users"),
                ("first", "/users/first"),
                ("last", "/users/last"),
                ("count", "/users/count"),
                ("create", "/users/create"),
                ("update", "/user/:id/update"),
                ("delete", "/user/:id/delete"),
            ]
        );
        assert!(routes.iter().all(|r| r.configured_method().is_none()));
    }

    #[test]
    fn postfix_and_method_defaults() {
        let routes = ResourceOptions::new()
            .with_postfix(".json")
            .with_method(HttpMethod::Get)
            .routes("User")
            .unwrap();
        assert_eq!(routes[0].url(), "/users.json");
        assert_eq!(routes[1].url(), "/users/first.json");
        assert_eq!(routes[6].url(), "/user/:id/delete.json");
        assert!(routes.iter().all(|r| r.method() == HttpMethod::Get));
    }

    #[test]
    fn only_with_path_override() {
        for path in ["foo", "/foo", "foo/"] {
            let routes = ResourceOptions::new()
                .only(Action::All, RouteOverride::path(path))
                .routes("User")
                .unwrap();
            assert_eq!(urls(&routes), vec![("all", "/users/foo")]);

            let routes = ResourceOptions::new()
                .only(Action::Delete, RouteOverride::path(path))
                .routes("User")
                .unwrap();
            assert_eq!(urls(&routes), vec![("delete", "/user/:id/foo")]);
        }
    }

    #[test]
    fn only_with_method_override_keeps_path() {
        let routes = ResourceOptions::new()
            .with_method(HttpMethod::Get)
            .only(Action::Count, RouteOverride::method(HttpMethod::Put))
            .routes("User")
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].url(), "/users/count");
        assert_eq!(routes[0].method(), HttpMethod::Put);
    }

    #[test]
    fn except_skips_actions() {
        let routes = ResourceOptions::new()
            .except(Action::Delete)
            .except(Action::Count)
            .routes("User")
            .unwrap();
        assert_eq!(routes.len(), 5);
        assert!(routes.iter().all(|r| r.action() != "delete" && r.action() != "count"));
    }

    #[test]
    fn custom_actions() {
        let routes = ResourceOptions::new()
            .only(Action::All, RouteOverride::default())
            .with_collection_action("search", RouteOverride::method(HttpMethod::Get))
            .with_member_action("archive", RouteOverride::path("/archive/now/"))
            .routes("User")
            .unwrap();
        assert_eq!(
            urls(&routes),
            vec![
                ("all", "/users"),
                ("search", "/users/search"),
                ("archive", "/user/:id/archive/now"),
            ]
        );
        assert_eq!(routes[1].method(), HttpMethod::Get);
    }

    #[test]
    fn custom_identifier_and_names() {
        let routes = ResourceOptions::new()
            .with_identifier("uuid")
            .with_collection_name("people")
            .routes("Person")
            .unwrap();
        assert_eq!(routes[0].url(), "/people");
        assert_eq!(routes[5].url(), "/person/:uuid/update");
        assert_eq!(routes[5].identifier(), "uuid");
    }

    #[test]
    fn unknown_only_action_rejected() {
        let mut options = ResourceOptions::new();
        options
            .only
            .get_or_insert_with(BTreeMap::new)
            .insert("frobnicate".into(), RouteOverride::default());
        assert_eq!(
            options.routes("User").unwrap_err(),
            RouteError::UnknownAction("frobnicate".into())
        );
    }

    #[test]
    fn empty_model_rejected() {
        assert_eq!(
            ResourceOptions::new().routes(" ").unwrap_err(),
            RouteError::EmptyModelName
        );
    }
}
