//! Router: root URL plus route table

use crate::error::RouteError;
use crate::resource::ResourceOptions;
use crate::table::{RouteDescriptor, RouteTable};
use crate::url;
use serde::{Deserialize, Serialize};

/// Root URL fragments
///
/// Any fragment may carry leading or trailing slashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Scheme and host: `http://example.com`, `//example.com`
    pub domain: Option<String>,
    /// Path prefix: `api`
    pub path: Option<String>,
    /// Version prefix: `v1`
    pub version: Option<String>,
}

impl RouterConfig {
    /// Create empty configuration (host-relative root)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With domain
    #[inline]
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// With path prefix
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// With version prefix
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Fragments of `other` replace ours where set
    #[must_use]
    pub fn merged(&self, other: &RouterConfig) -> RouterConfig {
        RouterConfig {
            domain: other.domain.clone().or_else(|| self.domain.clone()),
            path: other.path.clone().or_else(|| self.path.clone()),
            version: other.version.clone().or_else(|| self.version.clone()),
        }
    }

    /// Any fragment set?
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.path.is_none() && self.version.is_none()
    }

    /// Root URL: `domain/path/version` with single separators
    ///
    /// Empty when no fragment is set, making routes host-relative.
    #[must_use]
    pub fn root(&self) -> String {
        url::join(
            self.domain.as_deref().unwrap_or(""),
            [self.path.as_deref(), self.version.as_deref()]
                .into_iter()
                .flatten(),
        )
    }
}

/// Route table with its root URL
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
    root: String,
    routes: RouteTable,
}

impl Router {
    /// Create router with an empty table
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        let root = config.root();
        Self {
            config,
            root,
            routes: RouteTable::new(),
        }
    }

    /// Create router over an existing table
    #[must_use]
    pub fn with_routes(config: RouterConfig, routes: RouteTable) -> Self {
        let mut router = Self::new(config);
        router.routes = routes;
        router
    }

    /// Root URL (no trailing slash)
    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Root fragments
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route table
    #[inline]
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Lookup route for `(model_name, action)`
    #[inline]
    #[must_use]
    pub fn find(&self, model_name: &str, action: &str) -> Option<&RouteDescriptor> {
        self.routes.find(model_name, action)
    }

    /// Append a single route
    pub fn add_route(&mut self, route: RouteDescriptor) -> &mut Self {
        self.routes.push(route);
        self
    }

    /// Define the standard routes of a model
    ///
    /// # Errors
    /// See [`ResourceOptions::routes`].
    pub fn resource(
        &mut self,
        model_name: &str,
        options: ResourceOptions,
    ) -> Result<&mut Self, RouteError> {
        let routes = options.routes(model_name)?;
        self.routes.extend(routes);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::HttpMethod;

    #[test]
    fn empty_config_has_empty_root() {
        assert_eq!(Router::new(RouterConfig::new()).root(), "");
    }

    #[test]
    fn root_from_fragments() {
        let config = RouterConfig::new()
            .with_domain("http://example.com/")
            .with_path("/api/")
            .with_version("v1/");
        assert_eq!(config.root(), "http://example.com/api/v1");

        let config = RouterConfig::new().with_path("api").with_version("/v1");
        assert_eq!(config.root(), "/api/v1");
    }

    #[test]
    fn scheme_relative_domain_preserved() {
        let config = RouterConfig::new().with_domain("//example.com");
        assert_eq!(config.root(), "//example.com");
    }

    #[test]
    fn merged_prefers_override() {
        let base = RouterConfig::new()
            .with_domain("http://example.com")
            .with_path("api");
        let merged = base.merged(&RouterConfig::new().with_version("v2"));
        assert_eq!(merged.root(), "http://example.com/api/v2");

        let merged = base.merged(&RouterConfig::new().with_domain("http://other.org"));
        assert_eq!(merged.root(), "http://other.org/api");
        assert!(!merged.is_empty());
        assert!(RouterConfig::new().is_empty());
    }

    #[test]
    fn resource_fills_table() {
        let mut router = Router::new(RouterConfig::new());
        router
            .resource("User", ResourceOptions::new().with_method(HttpMethod::Get))
            .unwrap()
            .add_route(RouteDescriptor::new("User", "search", "/users/search"));

        assert_eq!(router.routes().len(), 8);
        assert_eq!(router.find("User", "first").unwrap().url(), "/users/first");
        assert_eq!(router.find("User", "search").unwrap().method(), HttpMethod::Post);
    }
}
