//! Graph API request builder.
//!
//! Composes `{base_url}/{api_version}/{path}` URLs, attaches the access token
//! according to [`AuthStrategy`], serialises JSON bodies and hands the request
//! to a [`Transport`]. One client is created per task invocation and dropped
//! with it.

mod transport;
pub use transport::{GraphRequest, HttpTransport, Transport};

use std::sync::Arc;

use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    config::{AuthStrategy, GraphConfig},
    error::{MetaError, Result},
};

/// Raw HTTP status and body of a Graph API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphResponse {
    pub status: u16,
    pub body: String,
}

impl GraphResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn any non-2xx response into [`MetaError::RemoteApi`], body included verbatim.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(MetaError::RemoteApi {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|_| self.malformed())
    }

    /// The `id` field of the response. Numeric ids are accepted and rendered as strings.
    pub fn id(&self) -> Result<String> {
        let json = self.json()?;
        match json.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(self.malformed()),
        }
    }

    /// The `data` array of the response. A missing or non-array `data` is an empty page.
    pub fn data(&self) -> Result<Vec<Value>> {
        let json = self.json()?;
        match json.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn malformed(&self) -> MetaError {
        MetaError::MalformedResponse {
            body: self.body.clone(),
        }
    }
}

pub struct GraphClient {
    config: GraphConfig,
    transport: Arc<dyn Transport>,
}

impl GraphClient {
    /// Create a client with the `reqwest` transport.
    pub fn new(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create a client on top of a custom transport.
    pub fn with_transport(config: GraphConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the absolute URL for `path` with `query` appended.
    ///
    /// With [`AuthStrategy::QueryParam`] the token is appended as `access_token`.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/'),
            path.trim_start_matches('/'),
        );
        let mut url =
            Url::parse(&raw).map_err(|e| MetaError::Config(format!("invalid url {raw}: {e}")))?;

        let with_token = self.config.auth == AuthStrategy::QueryParam;
        if !query.is_empty() || with_token {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if with_token {
                pairs.append_pair("access_token", &self.config.access_token);
            }
        }
        Ok(url)
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<GraphResponse> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<GraphResponse> {
        self.send(Method::POST, path, &[], Some(body.clone())).await
    }

    pub async fn delete(&self, path: &str) -> Result<GraphResponse> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// `POST` and extract the `id` of the created object.
    pub async fn post_for_id(&self, path: &str, body: &Value) -> Result<String> {
        self.post(path, body).await?.ensure_success()?.id()
    }

    #[instrument(level = "debug", skip(self, query, body), fields(method = %method))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<GraphResponse> {
        let url = self.url(path, query)?;
        let bearer = match self.config.auth {
            AuthStrategy::BearerHeader => Some(self.config.access_token.clone()),
            AuthStrategy::QueryParam => None,
        };

        let response = self
            .transport
            .execute(GraphRequest {
                method,
                url,
                bearer,
                body,
            })
            .await?;

        debug!(status = response.status, "graph api responded");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Recorder {
        seen: Mutex<Vec<GraphRequest>>,
        reply: GraphResponse,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn execute(&self, request: GraphRequest) -> Result<GraphResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    fn recorder(reply: GraphResponse) -> Arc<Recorder> {
        Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
            reply,
        })
    }

    #[test]
    fn url_joins_segments() {
        let cfg = GraphConfig::new("tok").with_base_url("http://localhost:9000/");
        let client = GraphClient::with_transport(cfg, recorder(GraphResponse::new(200, "{}")));

        let url = client.url("/123/feed", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v24.0/123/feed");
    }

    #[test]
    fn url_encodes_query() {
        let cfg = GraphConfig::new("tok");
        let client = GraphClient::with_transport(cfg, recorder(GraphResponse::new(200, "{}")));

        let query = [
            ("metric", "a,b".to_string()),
            ("since", "2025-01-01 10:00".to_string()),
        ];
        let url = client.url("1_2/insights", &query).unwrap();
        assert_eq!(url.query(), Some("metric=a%2Cb&since=2025-01-01+10%3A00"));
    }

    #[tokio::test]
    async fn bearer_strategy_uses_header() {
        let transport = recorder(GraphResponse::new(200, r#"{"id":"1"}"#));
        let client = GraphClient::with_transport(GraphConfig::new("tok"), transport.clone());

        client.get("me", &[]).await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].bearer.as_deref(), Some("tok"));
        assert_eq!(seen[0].url.query(), None);
    }

    #[tokio::test]
    async fn query_strategy_uses_access_token_param() {
        let transport = recorder(GraphResponse::new(200, r#"{"success":true}"#));
        let cfg = GraphConfig::new("tok").with_auth(AuthStrategy::QueryParam);
        let client = GraphClient::with_transport(cfg, transport.clone());

        client.delete("1_2").await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::DELETE);
        assert!(seen[0].bearer.is_none());
        assert_eq!(seen[0].url.query(), Some("access_token=tok"));
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_query_token() {
        let cfg = GraphConfig::new("SECRET-TOKEN-123")
            .with_base_url("http://127.0.0.1:1")
            .with_auth(AuthStrategy::QueryParam);
        let client = GraphClient::new(cfg).unwrap();

        let err = client.get("A/insights", &[]).await.unwrap_err();
        assert!(matches!(err, MetaError::Transport(_)), "{err:?}");
        assert!(!err.to_string().contains("SECRET-TOKEN-123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-TOKEN-123"), "{err:?}");
    }

    #[tokio::test]
    async fn post_for_id_surfaces_remote_errors() {
        let transport = recorder(GraphResponse::new(400, r#"{"error":"bad"}"#));
        let client = GraphClient::with_transport(GraphConfig::new("tok"), transport);

        let err = client.post_for_id("1/feed", &json!({})).await.unwrap_err();
        match err {
            MetaError::RemoteApi { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"error":"bad"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn id_extraction() {
        assert_eq!(GraphResponse::new(200, r#"{"id":"123_456"}"#).id().unwrap(), "123_456");
        assert_eq!(GraphResponse::new(200, r#"{"id":17}"#).id().unwrap(), "17");

        assert!(matches!(
            GraphResponse::new(200, r#"{"success":true}"#).id(),
            Err(MetaError::MalformedResponse { .. })
        ));
        assert!(matches!(
            GraphResponse::new(200, "not json").id(),
            Err(MetaError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn data_defaults_to_empty() {
        let page = GraphResponse::new(200, r#"{"data":[{"id":"1"},{"id":"2"}]}"#);
        assert_eq!(page.data().unwrap().len(), 2);
        assert!(GraphResponse::new(200, "{}").data().unwrap().is_empty());
    }
}
