//! Tests for CLI argument parsing, run against the built binary.

mod common;

use std::process::Command;

use common::mock_backend::MockBackend;
use common::{enqueue_login, lead_json, temp_config};
use serde_json::json;

fn lead_console_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lead-console"));
    cmd.env_remove("LEAD_CONSOLE_EMAIL")
        .env_remove("LEAD_CONSOLE_PASSWORD")
        .env_remove("LEAD_CONSOLE_LOG")
        .env_remove("LEAD_CONSOLE_API_URL");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let output = lead_console_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["whoami", "contacts", "leads", "email", "sms", "logs"] {
        assert!(stdout.contains(command), "missing {} in help", command);
    }
    assert!(stdout.contains("--api-url"));
}

#[test]
fn test_unknown_lead_class_is_rejected() {
    let output = lead_console_cmd()
        .args(["leads", "classify", "3", "warm"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown lead class"));
}

#[test]
fn test_email_without_password_exits_with_error() {
    let output = lead_console_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "--email", "a@example.com", "whoami"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Both --email and --password are required"));
}

#[test]
fn test_invalid_api_url_exits_with_error() {
    let output = lead_console_cmd()
        .args(["--api-url", "ftp://nowhere", "whoami"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must use http or https"));
}

#[tokio::test]
async fn test_leads_stats_against_backend() {
    let backend = MockBackend::start().await;
    enqueue_login(&backend, "ada").await;
    backend
        .enqueue_json(json!([
            lead_json(1, "Ann Lee", true),
            lead_json(2, "Bo Chen", false),
        ]))
        .await;
    let (_dir, config) = temp_config("");

    let mut cmd = lead_console_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["--api-url", &backend.base_url()])
        .args(["--email", "ada@example.com", "--password", "pw"])
        .args(["leads", "stats"]);
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("total:     2"));
    assert!(stdout.contains("promoted:  1"));

    // The run ends its own session.
    assert_eq!(backend.requests_to("/api/auth/logout").await.len(), 1);
}
