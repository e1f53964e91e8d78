//! Normalized error type for every remote interaction.
//!
//! Network failures, undecodable bodies and non-2xx responses all surface
//! as a single [`RemoteError`], so callers never branch on error origin.

use serde_json::Value;
use thiserror::Error;

/// Message used when an error body carries nothing readable.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Server unreachable, connection reset, TLS failure.
    Network,
    /// The response body did not match the expected shape.
    Decode,
    /// 400 / 422: the server rejected the input.
    Validation,
    /// 401 / 403: missing or invalid session, or a CSRF failure.
    Unauthorized,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 5xx.
    Server,
    /// A 2xx reply whose body reports failure (`{"success": false}`).
    Rejected,
    /// Any other non-success status.
    Other,
}

impl ErrorKind {
    /// Map an HTTP status to its kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::Validation,
            401 | 403 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Other,
        }
    }

    /// Get error type string for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network_error",
            ErrorKind::Decode => "decode_error",
            ErrorKind::Validation => "validation_error",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Server => "server_error",
            ErrorKind::Rejected => "rejected",
            ErrorKind::Other => "http_error",
        }
    }
}

/// Error produced for any failed or non-success HTTP interaction.
///
/// `status_code` is 0 when no HTTP status was received.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} (status {status_code})")]
pub struct RemoteError {
    pub status_code: u16,
    pub message: String,
    pub payload: Option<Value>,
    pub kind: ErrorKind,
}

impl RemoteError {
    /// Build an error from a non-2xx response body.
    ///
    /// The body is parsed as JSON on a best-effort basis; an unparsable or
    /// empty body yields the generic message and no payload.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<Value>(body).ok();
        let message = payload
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

        Self {
            status_code: status,
            message,
            payload,
            kind: ErrorKind::from_status(status),
        }
    }

    /// The request never produced an HTTP response.
    pub fn network(err: &reqwest::Error) -> Self {
        Self {
            status_code: 0,
            message: format!("Network request failed: {}", err),
            payload: None,
            kind: ErrorKind::Network,
        }
    }

    /// A success response whose body could not be decoded.
    pub fn decode(status: u16, detail: impl std::fmt::Display) -> Self {
        Self {
            status_code: status,
            message: format!("Malformed response body: {}", detail),
            payload: None,
            kind: ErrorKind::Decode,
        }
    }

    /// The request could not be built (bad path or base URL).
    pub fn invalid_url(url: &str, detail: impl std::fmt::Display) -> Self {
        Self {
            status_code: 0,
            message: format!("Invalid request URL '{}': {}", url, detail),
            payload: None,
            kind: ErrorKind::Other,
        }
    }

    /// A 2xx reply that reports failure in its body.
    pub fn rejected(status: u16, message: impl Into<String>, payload: Option<Value>) -> Self {
        let message = message.into();
        Self {
            status_code: status,
            message: if message.trim().is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            payload,
            kind: ErrorKind::Rejected,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Pick the human-readable message out of an error body.
///
/// Precedence: `error`, then `message`, then `detail`. A `detail` list (as
/// produced by request validation) contributes its first `msg`.
pub fn extract_message(body: &Value) -> Option<String> {
    for key in ["error", "message"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    match body.get("detail")? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
