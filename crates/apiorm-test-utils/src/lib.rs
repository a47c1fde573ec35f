//! Testing utilities for apiorm workspace
//!
//! Shared fixtures and a recording transport.

#![allow(missing_docs)]

use apiorm_connector::{Connector, HttpRequest, HttpResponse, Transport, TransportError};
use apiorm_model::{ModelClass, Record};
use apiorm_route::{ResourceOptions, Router, RouterConfig};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Transport that records every request and replays queued responses
///
/// Answers `null` once the queue is empty.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_with(&self, body: impl Into<String>) -> &Self {
        self.responses.lock().push_back(Ok(HttpResponse::ok(body)));
        self
    }

    pub fn respond_with_json(&self, body: &Value) -> &Self {
        self.respond_with(body.to_string())
    }

    pub fn fail_with(&self, error: TransportError) -> &Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::ok("null")))
    }
}

/// `User { id, name, age }` with default configuration
pub fn user_class() -> ModelClass {
    ModelClass::new("User")
        .with_fields(["id", "name", "age"])
        .with_table_name("users")
}

pub fn user_router(config: RouterConfig, options: ResourceOptions) -> Router {
    let mut router = Router::new(config);
    router
        .resource("User", options)
        .expect("User resource options are valid");
    router
}

/// Connector over the default `User` routes
pub fn setup_connector(
    config: RouterConfig,
    options: ResourceOptions,
) -> (Connector, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let connector = Connector::with_transport(user_router(config, options), transport.clone());
    (connector, transport)
}

pub fn new_user(class: &Arc<ModelClass>, name: &str) -> Record {
    Record::build(class, serde_json::json!({ "name": name })).expect("object attributes")
}

pub fn persisted_user(class: &Arc<ModelClass>, id: i64, name: &str) -> Record {
    let mut record = new_user(class, name);
    record.set_id(Value::from(id));
    record
}
