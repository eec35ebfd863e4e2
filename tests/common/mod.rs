//! Common fixtures for integration tests.
//!
//! Each test starts its own [`MockServer`]s; [`api_server`] serves the three
//! bootstrap endpoints with a small account (two flows in one organization).

#![allow(dead_code)]

use flowdock::ClientConfig;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";

/// Expected `Authorization` header for [`API_KEY`] and the placeholder password.
pub fn auth_header() -> String {
    "Basic dGVzdC1hcGkta2V5OkJBVE1BTg==".to_string()
}

/// Install a subscriber honouring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn organization() -> Value {
    json!({
        "id": 1,
        "parameterized_name": "acme",
        "name": "Acme",
        "url": "https://api.flowdock.com/organizations/acme"
    })
}

pub fn users() -> Value {
    json!([
        {"id": 7, "nick": "bob", "name": "Bob Builder", "email": "bob@example.com", "avatar": "https://example.com/bob.png"},
        {"id": 9, "nick": "alice", "name": "Alice", "email": "alice@example.com"}
    ])
}

pub fn flows() -> Value {
    json!([
        {"id": "f-main", "name": "Main", "parameterized_name": "main", "organization": organization()},
        {"id": "f-ops", "name": "Ops", "parameterized_name": "ops", "organization": organization()}
    ])
}

pub fn organizations() -> Value {
    json!([organization()])
}

/// Mount `GET {resource}` requiring basic auth.
pub async fn mount_resource(server: &MockServer, resource: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(resource))
        .and(header("Authorization", auth_header()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A REST server with the default fixture account.
pub async fn api_server() -> MockServer {
    let server = MockServer::start().await;
    mount_resource(&server, "/users", users()).await;
    mount_resource(&server, "/flows", flows()).await;
    mount_resource(&server, "/organizations", organizations()).await;
    server
}

/// Config pointing every endpoint at `server`.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_url(server.uri())
        .with_stream_url(server.uri())
        .with_push_url(server.uri())
}
