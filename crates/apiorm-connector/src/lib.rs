//! apiorm Connector
//!
//! Delegates a model's persistence operations to a REST API described by a
//! route table:
//! - Resolves the route for a model and action
//! - Builds scope/order/pagination (and attribute) parameters
//! - Builds the URL, substituting the identifier of persisted records
//! - Sends one request and maps the JSON response back into records
//!
//! # Example
//!
//! ```rust,ignore
//! use apiorm_connector::Connector;
//! use apiorm_model::{ModelClass, Record};
//! use apiorm_route::{ResourceOptions, Router, RouterConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new(RouterConfig::new().with_domain("http://localhost:3000"));
//! router.resource("User", ResourceOptions::default())?;
//!
//! let connector = Connector::new(router)?;
//! let user = Arc::new(ModelClass::new("User").with_fields(["id", "name"]));
//!
//! let mut record = Record::build(&user, serde_json::json!({ "name": "foo" }))?;
//! connector.save(&mut record).await?;
//! println!("{} users", connector.count(&user).await?);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod connector;
pub mod error;
pub mod params;
pub mod response;
pub mod transport;

// Re-exports for convenience
pub use config::{ConnectorConfig, ResourceConfig};
pub use connector::Connector;
pub use error::{ConfigError, ConnectorError, TransportError};
pub use params::RequestParams;
pub use response::ResponsePayload;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the connector
    pub use crate::{Connector, ConnectorConfig, ConnectorError, ResponsePayload, Transport};
    pub use apiorm_model::{ModelClass, Record};
    pub use apiorm_route::{Action, HttpMethod, ResourceOptions, Router, RouterConfig};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
