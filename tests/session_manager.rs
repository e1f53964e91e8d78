//! Session lifecycle against a mock backend.

mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use common::{client_for, enqueue_login, signed_in, user_json};
use lead_console::api::UserUpdate;
use lead_console::transport::ErrorKind;
use lead_console::{Credentials, SessionError, SessionManager, SessionState};
use serde_json::json;

fn credentials() -> Credentials {
    Credentials::new("ada@example.com", "correct horse")
}

#[tokio::test]
async fn test_login_success_sets_identity() {
    let backend = MockBackend::start().await;
    enqueue_login(&backend, "ada").await;

    let session = SessionManager::new(client_for(&backend));
    let user = session.login(&credentials()).await.unwrap();

    assert_eq!(user.username, "ada");
    let view = session.view();
    assert!(view.is_authenticated);
    assert!(!view.is_loading);
    assert_eq!(view.user.unwrap().email, "ada@example.com");

    let requests = backend.captured_requests().await;
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/api/auth/set-csrf-token", "/api/auth/login", "/api/auth/user"]
    );
    assert_eq!(requests[1].header("x-csrftoken"), Some("tok-login"));
    assert_eq!(
        requests[1].json(),
        json!({"email": "ada@example.com", "password": "correct horse"})
    );
}

#[tokio::test]
async fn test_rejected_login_returns_error_and_stays_signed_out() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend
        .enqueue_json(json!({"success": false, "message": "Invalid credentials"}))
        .await;

    let session = SessionManager::new(client_for(&backend));
    let err = session.login(&credentials()).await.unwrap_err();

    match err {
        SessionError::Remote(remote) => {
            assert_eq!(remote.message, "Invalid credentials");
            assert_eq!(remote.kind, ErrorKind::Rejected);
            assert_eq!(remote.status_code, 401);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(session.view().user.is_none());
}

#[tokio::test]
async fn test_login_http_failure_is_not_swallowed() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend
        .enqueue_response(MockResponse::text(403, "CSRF verification failed"))
        .await;

    let session = SessionManager::new(client_for(&backend));
    let err = session.login(&credentials()).await.unwrap_err();

    assert!(!err.to_string().is_empty());
    assert!(!session.view().is_authenticated);
}

#[tokio::test]
async fn test_login_is_loading_while_in_flight() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::value(json!({"csrftoken": "tok"})).with_delay(100))
        .await;
    backend.enqueue_json(json!({"success": true})).await;
    backend.enqueue_json(user_json("ada")).await;

    let session = SessionManager::new(client_for(&backend));
    let mut rx = session.subscribe();

    let handle = {
        let session = session.clone();
        tokio::spawn(async move { session.login(&credentials()).await })
    };

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), SessionState::Authenticating);
    assert!(session.view().is_loading);
    assert!(session.view().user.is_none());

    // A second sign-in while the first is pending is refused.
    let busy = session.login(&credentials()).await.unwrap_err();
    assert!(matches!(busy, SessionError::Busy));

    handle.await.unwrap().unwrap();
    assert!(session.view().is_authenticated);
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let backend = MockBackend::start().await;
    let session = signed_in(&backend, "ada").await;
    backend.enqueue_response(MockResponse::error(500, "boom")).await;

    session.logout().await;

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(session.view().user.is_none());
    assert_eq!(backend.requests_to("/api/auth/logout").await.len(), 1);
}

#[tokio::test]
async fn test_failed_logout_leaves_nothing_to_restore() {
    let backend = MockBackend::start().await;
    let session = SessionManager::new(client_for(&backend));
    backend
        .enqueue_json(json!({"csrftoken": "tok-login"}))
        .await;
    backend
        .enqueue_response(
            MockResponse::value(json!({"success": true}))
                .with_cookie("sessionid=s-77; Path=/; HttpOnly"),
        )
        .await;
    backend.enqueue_json(user_json("ada")).await;
    session.login(&credentials()).await.unwrap();

    backend.enqueue_response(MockResponse::error(500, "boom")).await;
    session.logout().await;
    assert_eq!(session.state(), SessionState::Unauthenticated);

    // The server still honours the old session, but the client no longer
    // presents it.
    backend.enqueue_json(json!({"csrftoken": "tok-2"})).await;
    backend
        .enqueue_response(MockResponse::error(401, "Not authenticated"))
        .await;
    session.initialize().await;

    assert_eq!(session.state(), SessionState::Unauthenticated);
    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 6);
    assert!(requests[3].header("cookie").unwrap_or("").contains("sessionid=s-77"));
    for request in &requests[4..] {
        let cookie = request.header("cookie").unwrap_or("");
        assert!(
            !cookie.contains("sessionid"),
            "{} still sent {}",
            request.path,
            cookie
        );
    }
}

#[tokio::test]
async fn test_logout_during_login_wins() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend
        .enqueue_response(MockResponse::value(json!({"success": true})).with_delay(150))
        .await;
    // Logout reply, served while the login reply is still delayed.
    backend.enqueue_response(MockResponse::no_content()).await;
    backend.enqueue_json(user_json("ada")).await;

    let session = SessionManager::new(client_for(&backend));
    let handle = {
        let session = session.clone();
        tokio::spawn(async move { session.login(&credentials()).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    session.logout().await;

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(SessionError::Interrupted)));
    assert_eq!(session.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_initialize_restores_existing_session() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend.enqueue_json(user_json("grace")).await;

    let session = SessionManager::new(client_for(&backend));
    session.initialize().await;

    assert_eq!(session.view().user.unwrap().username, "grace");
}

#[tokio::test]
async fn test_initialize_without_session_is_silent() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend
        .enqueue_response(MockResponse::error(401, "Unauthorized"))
        .await;

    let session = SessionManager::new(client_for(&backend));
    session.initialize().await;

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(!session.view().is_loading);
}

#[tokio::test]
async fn test_signup_registers_then_logs_in() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend
        .enqueue_json(json!({"success": "User registered successfully"}))
        .await;
    backend.enqueue_json(json!({"success": true})).await;
    backend.enqueue_json(user_json("ada")).await;

    let session = SessionManager::new(client_for(&backend));
    let user = session.signup(&credentials()).await.unwrap();

    assert_eq!(user.username, "ada");
    let paths: Vec<String> = backend
        .captured_requests()
        .await
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "/api/auth/set-csrf-token",
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/user"
        ]
    );
}

#[tokio::test]
async fn test_signup_duplicate_email_is_rejected() {
    let backend = MockBackend::start().await;
    backend.enqueue_json(json!({"csrftoken": "tok"})).await;
    backend
        .enqueue_json(json!({"error": "Email already exists"}))
        .await;

    let session = SessionManager::new(client_for(&backend));
    let err = session.signup(&credentials()).await.unwrap_err();

    assert_eq!(err.to_string(), "Email already exists (status 400)");
    assert!(!session.view().is_authenticated);
}

#[tokio::test]
async fn test_refresh_failure_keeps_identity() {
    let backend = MockBackend::start().await;
    let session = signed_in(&backend, "ada").await;
    backend.enqueue_response(MockResponse::error(500, "down")).await;

    session.refresh_user().await;

    assert_eq!(session.view().user.unwrap().username, "ada");
}

#[tokio::test]
async fn test_refresh_replaces_identity() {
    let backend = MockBackend::start().await;
    let session = signed_in(&backend, "ada").await;
    backend.enqueue_json(user_json("ada_l")).await;

    session.refresh_user().await;

    assert_eq!(session.view().user.unwrap().username, "ada_l");
}

#[tokio::test]
async fn test_update_user_uses_server_reply() {
    let backend = MockBackend::start().await;
    let session = signed_in(&backend, "ada").await;
    backend
        .enqueue_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "first_name": "Ada"
        }))
        .await;

    let update = UserUpdate {
        first_name: Some("Ada".to_string()),
        ..UserUpdate::default()
    };
    let user = session.update_user(&update).await.unwrap();

    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(session.view().user.unwrap().first_name.as_deref(), Some("Ada"));

    let patch = &backend.requests_to("/api/auth/user").await[0];
    assert_eq!(patch.method, "PATCH");
    assert_eq!(patch.json(), json!({"first_name": "Ada"}));
}
