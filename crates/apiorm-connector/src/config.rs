//! TOML configuration
//!
//! One file describes the router root, the resources to expand into routes
//! and the model classes:
//!
//! ```toml
//! timeout_secs = 30
//!
//! [router]
//! domain = "http://example.com"
//! path = "api"
//!
//! [[resources]]
//! model = "User"
//! [resources.defaults]
//! method = "get"
//!
//! [[models]]
//! model_name = "User"
//! fields = ["id", "name", "age"]
//! ```

use crate::connector::Connector;
use crate::error::ConfigError;
use crate::transport::ReqwestTransport;
use apiorm_model::ModelClass;
use apiorm_route::{ResourceOptions, RouteDescriptor, Router, RouterConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// One resource definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Model name
    pub model: String,
    /// Resource DSL options
    #[serde(flatten)]
    pub options: ResourceOptions,
}

/// Connector configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Request timeout; none when unset
    pub timeout_secs: Option<u64>,
    /// Root URL fragments
    pub router: RouterConfig,
    /// Resources expanded into routes, in order
    pub resources: Vec<ResourceConfig>,
    /// Extra hand-written routes, appended after resources
    pub routes: Vec<RouteDescriptor>,
    /// Model classes
    pub models: Vec<ModelClass>,
}

impl ConnectorConfig {
    /// Parse TOML
    ///
    /// # Errors
    /// `Parse` for invalid TOML, `Invalid` for duplicate model names.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// `Io` when the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for model in &self.models {
            if model.model_name.trim().is_empty() {
                return Err(ConfigError::Invalid("model_name must not be empty".into()));
            }
            if !seen.insert(model.model_name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "model {} defined twice",
                    model.model_name
                )));
            }
        }
        Ok(())
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the router: resources first, then explicit routes
    ///
    /// A resource without its own `collection_name` uses its model's table
    /// name for collection paths.
    ///
    /// # Errors
    /// `Route` when a resource definition is rejected.
    pub fn build_router(&self) -> Result<Router, ConfigError> {
        let mut router = Router::new(self.router.clone());
        for resource in &self.resources {
            let mut options = resource.options.clone();
            if options.collection_name.is_none() {
                if let Some(class) = self.models.iter().find(|m| m.model_name == resource.model) {
                    options.collection_name = Some(class.table_name());
                }
            }
            router.resource(&resource.model, options)?;
        }
        for route in &self.routes {
            router.add_route(route.clone());
        }
        tracing::info!(
            "Router at '{}' with {} routes",
            router.root(),
            router.routes().len()
        );
        Ok(router)
    }

    /// Model class by name
    #[must_use]
    pub fn model(&self, name: &str) -> Option<Arc<ModelClass>> {
        self.models
            .iter()
            .find(|model| model.model_name == name)
            .cloned()
            .map(Arc::new)
    }

    /// Connector over the configured router with a `reqwest` transport
    ///
    /// # Errors
    /// `Route` or `Transport` when the router or client cannot be built.
    pub fn connector(&self) -> Result<Connector, ConfigError> {
        let router = self.build_router()?;
        let transport = ReqwestTransport::with_timeout(self.timeout())?;
        Ok(Connector::with_transport(router, Arc::new(transport)))
    }
}
