//! apiorm Models
//!
//! The model side of the connector:
//! - [`ModelClass`]: static configuration of a model (name, identifier field,
//!   schema fields, default scope/order, pagination, route overrides)
//! - [`Record`]: one instance with its attribute mapping
//!
//! # Example
//!
//! ```rust
//! use apiorm_model::{ModelClass, Record};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let user = Arc::new(ModelClass::new("User").with_fields(["id", "name", "age"]));
//! let record = Record::build(&user, json!({ "name": "foo" })).unwrap();
//!
//! assert!(record.is_new());
//! assert_eq!(record.get("age"), Some(&json!(null)));
//! ```

#![warn(unreachable_pub)]

pub mod class;
pub mod error;
pub mod record;

pub use class::{ModelClass, RouteOverrides};
pub use error::ModelError;
pub use record::Record;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
