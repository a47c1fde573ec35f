//! HTTP transport seam
//!
//! The connector hands a fully built [`HttpRequest`] to a [`Transport`] and
//! only reads the body of the [`HttpResponse`]. [`ReqwestTransport`] is the
//! production implementation.

use crate::error::TransportError;
use apiorm_route::HttpMethod;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// One outbound request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute or host-relative URL, without query string
    pub url: String,
    /// Query parameters (empty for body-carrying methods)
    pub query: Vec<(String, String)>,
    /// JSON body (`None` for query-carrying methods)
    pub body: Option<Value>,
}

impl HttpRequest {
    /// URL with the query string appended
    ///
    /// Encoded as `application/x-www-form-urlencoded`, the same form
    /// [`ReqwestTransport`] puts on the wire.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.url, query)
    }

    /// Query parameter by name
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Response as seen by the connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Raw body
    pub body: String,
}

impl HttpResponse {
    /// 200 response with `body`
    #[inline]
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Sends one request, once
///
/// Implementations must not retry.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch `request` and wait for its response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest` backed transport
///
/// Non-2xx responses are reported as [`TransportError::Status`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create transport without a timeout
    ///
    /// # Errors
    /// Returns `TransportError::Request` if the client cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Create transport with an optional request timeout
    ///
    /// # Errors
    /// Returns `TransportError::Request` if the client cannot be built.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wrap an existing client
    #[inline]
    #[must_use]
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(to_reqwest(request.method), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("{} {} answered {}", request.method, request.url, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}
