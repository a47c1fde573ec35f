//! apiorm Route Table
//!
//! Maps `(model name, action)` pairs to an HTTP method and URL template.
//!
//! # Overview
//!
//! The route layer provides:
//! - **RouteTable**: ordered, read-only lookup of [`RouteDescriptor`]s
//! - **Router**: root URL assembly from domain/path/version fragments
//! - **ResourceOptions**: the resource DSL that fills a table with the standard
//!   collection and member routes of a model
//!
//! # Example
//!
//! ```rust
//! use apiorm_route::{ResourceOptions, Router, RouterConfig};
//!
//! let mut router = Router::new(RouterConfig::new().with_domain("http://example.com/"));
//! router.resource("User", ResourceOptions::default()).unwrap();
//!
//! let route = router.find("User", "update").unwrap();
//! assert_eq!(route.url(), "/user/:id/update");
//! assert_eq!(router.root(), "http://example.com");
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod error;
pub mod naming;
pub mod resource;
pub mod router;
pub mod table;
pub mod url;

// Re-exports
pub use action::{Action, ActionScope, HttpMethod};
pub use error::RouteError;
pub use resource::{ResourceOptions, RouteDefaults, RouteOverride};
pub use router::{Router, RouterConfig};
pub use table::{RouteDescriptor, RouteTable, DEFAULT_IDENTIFIER};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for route definitions
    pub use crate::{
        Action, HttpMethod, ResourceOptions, RouteDescriptor, RouteError, RouteTable, Router,
        RouterConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
