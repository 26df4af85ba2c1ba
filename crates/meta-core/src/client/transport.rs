use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::trace;

use super::GraphResponse;
use crate::error::MetaError;

/// A fully built Graph API request.
#[derive(Debug, Clone)]
pub struct GraphRequest {
    pub method: Method,
    pub url: Url,
    /// Token for the `Authorization` header. `None` when it travels in the
    /// query string.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// HTTP executor used by [`GraphClient`](super::GraphClient).
///
/// Implementations return every HTTP response, 2xx or not, as [`GraphResponse`];
/// only failures to get a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: GraphRequest) -> Result<GraphResponse, MetaError>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, MetaError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: GraphRequest) -> Result<GraphResponse, MetaError> {
        trace!(
            target: "meta.core.http",
            method = %request.method,
            path = request.url.path(),
            "send"
        );

        let mut builder = self.client.request(request.method, request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        trace!(target: "meta.core.http", status, "received");
        Ok(GraphResponse { status, body })
    }
}
