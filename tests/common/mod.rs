//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use lead_console::api::Api;
use lead_console::config::Config;
use lead_console::transport::ApiClient;
use lead_console::SessionManager;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

use mock_backend::{MockBackend, MockResponse};

/// Client pointed at the mock backend.
pub fn client_for(backend: &MockBackend) -> ApiClient {
    ApiClient::new(&Config::with_base_url(backend.base_url())).expect("Failed to build client")
}

pub fn api_for(backend: &MockBackend) -> Api {
    Api::new(client_for(backend))
}

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn user_json(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "secret_fact": []
    })
}

/// Queue the three replies of a successful login: CSRF bootstrap, login,
/// user detail.
pub async fn enqueue_login(backend: &MockBackend, username: &str) {
    backend
        .enqueue_json(json!({"csrftoken": "tok-login"}))
        .await;
    backend.enqueue_json(json!({"success": true})).await;
    backend.enqueue_json(user_json(username)).await;
}

/// A session manager already signed in as `username`.
pub async fn signed_in(backend: &MockBackend, username: &str) -> SessionManager {
    let session = SessionManager::new(client_for(backend));
    enqueue_login(backend, username).await;
    session
        .login(&lead_console::Credentials::new(
            format!("{}@example.com", username),
            "pw",
        ))
        .await
        .expect("login should succeed");
    backend.clear().await;
    session
}

pub fn contact_json(id: i64, name: &str, email: &str, company: &str) -> Value {
    json!({
        "id": id,
        "Full_name": name,
        "email": email,
        "phone_number": null,
        "company": company,
        "lead_class": "New",
        "notes": "",
        "address": "",
        "created_at": "2025-01-02T10:00:00Z"
    })
}

pub fn lead_json(id: i64, name: &str, promoted: bool) -> Value {
    json!({
        "id": id,
        "company": "Harbour Health",
        "website": "https://harbour.example",
        "full_name": name,
        "phone_number": "+61 2 5550 1234",
        "email": format!("{}@harbour.example", name.to_lowercase().replace(' ', ".")),
        "promoted": promoted,
        "is_active_lead": false,
        "lead_class": "New",
        "notes": null,
        "address": null
    })
}

pub fn ok() -> MockResponse {
    MockResponse::default()
}
