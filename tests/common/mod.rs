//! Common test utilities

#![allow(dead_code)]

use portal_core::client::{PortalClient, SharedToken};
use portal_core::config::ApiConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        token: None,
    }
}

/// Client against a mock server, sharing `token` with the caller
pub fn test_client(server: &MockServer, token: SharedToken) -> PortalClient {
    PortalClient::new(&test_config(&server.uri()), Arc::new(token))
        .expect("client should build against mock server")
}

pub fn note_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "Body text",
        "category": "work",
        "tags": ["rust"],
        "isPublic": false,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": "user-1",
        "email": "ada@example.com",
        "name": "Ada",
        "role": role,
        "preferences": { "menuLayout": "sidebar" }
    })
}
