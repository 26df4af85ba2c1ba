#![allow(dead_code)]

use meta_core::{AuthStrategy, GraphClient, GraphConfig, PollPolicy};
use serde_json::Value;
use wiremock::{MockServer, Request};

pub const TOKEN: &str = "test-token";

pub fn config(server: &MockServer) -> GraphConfig {
    GraphConfig::new(TOKEN)
        .with_base_url(server.uri())
        .with_api_version("v24.0")
        .with_timeout_ms(5_000)
}

pub fn client(server: &MockServer) -> GraphClient {
    GraphClient::new(config(server)).expect("valid config")
}

pub fn query_auth_client(server: &MockServer) -> GraphClient {
    GraphClient::new(config(server).with_auth(AuthStrategy::QueryParam)).expect("valid config")
}

/// Poll quickly so tests finish in milliseconds.
pub fn fast_poll() -> PollPolicy {
    PollPolicy::new(10, 0, 2_000)
}

pub fn api(path: &str) -> String {
    format!("/v24.0/{path}")
}

pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

pub fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("json body")
}
