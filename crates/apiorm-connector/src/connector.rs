//! Request builder and dispatcher
//!
//! Translates `(model class, action[, record])` into exactly one HTTP request
//! and the response back into records:
//!
//! 1. resolve the route for `(model name, action)`
//! 2. method: the route's, else POST
//! 3. parameters: scope, order, skip, limit (+ attributes for records)
//! 4. URL: root + template, placeholder replaced for persisted records
//! 5. POST/PUT/PATCH carry a JSON body, other methods a query string
//! 6. send once
//! 7. map the JSON body by shape
//!
//! Calls share no mutable state; the router and model classes are read-only.

use crate::error::ConnectorError;
use crate::params::RequestParams;
use crate::response::ResponsePayload;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use apiorm_model::{ModelClass, Record};
use apiorm_route::url::append_template;
use apiorm_route::{Action, RouteDescriptor, Router};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// REST persistence connector
#[derive(Clone)]
pub struct Connector {
    router: Arc<Router>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("root", &self.router.root())
            .field("routes", &self.router.routes().len())
            .finish_non_exhaustive()
    }
}

impl Connector {
    /// Create connector over `router` using [`ReqwestTransport`]
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(router: impl Into<Arc<Router>>) -> Result<Self, ConnectorError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(router, Arc::new(transport)))
    }

    /// Create with custom transport
    #[must_use]
    pub fn with_transport(router: impl Into<Arc<Router>>, transport: Arc<dyn Transport>) -> Self {
        Self {
            router: router.into(),
            transport,
        }
    }

    /// Router in use
    #[inline]
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Fetch every record in the model's default scope
    ///
    /// # Errors
    /// Any [`ConnectorError`]; `UnexpectedResponse` for a non-null scalar body.
    pub async fn all(&self, class: &Arc<ModelClass>) -> Result<Vec<Record>, ConnectorError> {
        self.collection_action(class, Action::All.as_str())
            .await?
            .into_records()
            .ok_or_else(|| ConnectorError::unexpected(Action::All.as_str(), "a list of records"))
    }

    /// Fetch the first record in scope; `None` when the server answers null
    ///
    /// # Errors
    /// Any [`ConnectorError`].
    pub async fn first(&self, class: &Arc<ModelClass>) -> Result<Option<Record>, ConnectorError> {
        self.fetch_one(class, Action::First).await
    }

    /// Fetch the last record in scope; `None` when the server answers null
    ///
    /// # Errors
    /// Any [`ConnectorError`].
    pub async fn last(&self, class: &Arc<ModelClass>) -> Result<Option<Record>, ConnectorError> {
        self.fetch_one(class, Action::Last).await
    }

    /// Count records in scope
    ///
    /// # Errors
    /// Any [`ConnectorError`]; `UnexpectedResponse` unless the body is a
    /// non-negative integer.
    pub async fn count(&self, class: &Arc<ModelClass>) -> Result<u64, ConnectorError> {
        match self.collection_action(class, Action::Count.as_str()).await? {
            ResponsePayload::Scalar(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| ConnectorError::unexpected(Action::Count.as_str(), "a count")),
            _ => Err(ConnectorError::unexpected(Action::Count.as_str(), "a count")),
        }
    }

    /// Create a new record or update a persisted one
    ///
    /// On create, the identifier from the response is written onto `record`;
    /// a failed or identifier-less response leaves it untouched. On update,
    /// the server's copy is returned when it sends one.
    ///
    /// # Errors
    /// Any [`ConnectorError`].
    pub async fn save(&self, record: &mut Record) -> Result<Record, ConnectorError> {
        if record.is_new() {
            let payload = self.member_action(record, Action::Create.as_str()).await?;
            let id = match &payload {
                ResponsePayload::Single(saved) => saved.id().cloned(),
                _ => None,
            }
            .ok_or_else(|| {
                ConnectorError::unexpected(Action::Create.as_str(), "a record with an identifier")
            })?;
            record.set_id(id);
            tracing::info!("Created {} {:?}", record.model_name(), record.id());
            Ok(record.clone())
        } else {
            match self.member_action(record, Action::Update.as_str()).await? {
                ResponsePayload::Single(saved) => Ok(saved),
                _ => Ok(record.clone()),
            }
        }
    }

    /// Delete a record, returning whatever the server answers
    ///
    /// # Errors
    /// Any [`ConnectorError`].
    pub async fn delete(&self, record: &Record) -> Result<ResponsePayload, ConnectorError> {
        self.member_action(record, Action::Delete.as_str()).await
    }

    /// Run any collection-level action, standard or custom
    ///
    /// # Errors
    /// Any [`ConnectorError`].
    pub async fn collection_action(
        &self,
        class: &Arc<ModelClass>,
        action: &str,
    ) -> Result<ResponsePayload, ConnectorError> {
        let request = self.build_request(class, action, None)?;
        self.dispatch(class, action, request).await
    }

    /// Run any record-level action, standard or custom
    ///
    /// # Errors
    /// Any [`ConnectorError`].
    pub async fn member_action(
        &self,
        record: &Record,
        action: &str,
    ) -> Result<ResponsePayload, ConnectorError> {
        let class = Arc::clone(record.class());
        let request = self.build_request(&class, action, Some(record))?;
        self.dispatch(&class, action, request).await
    }

    /// Build the request for an action without sending it
    ///
    /// # Errors
    /// `RouteNotFound` when the table has no route for the model and action;
    /// `InvalidIdentifier` when a persisted record's identifier is not a
    /// string or number.
    pub fn build_request(
        &self,
        class: &ModelClass,
        action: &str,
        record: Option<&Record>,
    ) -> Result<HttpRequest, ConnectorError> {
        let route = self.resolve(class, action)?;
        let method = route.method();

        let mut params = RequestParams::for_class(class);
        if let Some(record) = record {
            params = params.with_record(record);
        }

        let url = self.url(class, route, record)?;

        let request = if method.carries_body() {
            HttpRequest {
                method,
                url,
                query: Vec::new(),
                body: Some(params.to_json()),
            }
        } else {
            HttpRequest {
                method,
                url,
                query: params.to_query(),
                body: None,
            }
        };

        tracing::debug!(
            "Built {}#{} request: {} {}",
            class.model_name,
            action,
            request.method,
            request.url
        );
        Ok(request)
    }

    fn resolve(&self, class: &ModelClass, action: &str) -> Result<&RouteDescriptor, ConnectorError> {
        self.router.find(&class.model_name, action).ok_or_else(|| {
            tracing::warn!("No route for {}#{}", class.model_name, action);
            ConnectorError::route_not_found(&class.model_name, action)
        })
    }

    fn url(
        &self,
        class: &ModelClass,
        route: &RouteDescriptor,
        record: Option<&Record>,
    ) -> Result<String, ConnectorError> {
        let root: Cow<'_, str> = if class.route.overrides_root() {
            Cow::Owned(
                self.router
                    .config()
                    .merged(&class.route.root_fragments())
                    .root(),
            )
        } else {
            Cow::Borrowed(self.router.root())
        };

        let mut template = match record.map(Record::id_string).transpose()?.flatten() {
            Some(id) => route.expand(&id),
            None => route.url().to_string(),
        };
        if let Some(postfix) = &class.route.postfix {
            if !template.ends_with(postfix.as_str()) {
                template.push_str(postfix);
            }
        }

        Ok(append_template(&root, &template))
    }

    async fn dispatch(
        &self,
        class: &Arc<ModelClass>,
        action: &str,
        request: HttpRequest,
    ) -> Result<ResponsePayload, ConnectorError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::info!("{} {} ({}#{})", method, url, class.model_name, action);

        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!("{} {} failed: {}", method, url, err);
            err
        })?;

        let payload = ResponsePayload::parse(class, &response.body)?;
        tracing::debug!(
            "{} {} answered {} with {} payload",
            method,
            url,
            response.status,
            payload.kind()
        );
        Ok(payload)
    }

    async fn fetch_one(
        &self,
        class: &Arc<ModelClass>,
        action: Action,
    ) -> Result<Option<Record>, ConnectorError> {
        match self.collection_action(class, action.as_str()).await? {
            ResponsePayload::Single(record) => Ok(Some(record)),
            ResponsePayload::Scalar(Value::Null) => Ok(None),
            _ => Err(ConnectorError::unexpected(action.as_str(), "a single record")),
        }
    }
}
