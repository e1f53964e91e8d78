//! Transport layer: the single choke point for outbound HTTP.
//!
//! Owns the base URL, the cookie jar (credentials are always sent), the
//! in-memory CSRF token and response normalization.

mod client;
mod cookies;
mod csrf;
mod error;
mod query;
mod reply;

pub use client::{ApiClient, CSRF_BOOTSTRAP_PATH, NO_BODY};
pub use csrf::CsrfToken;
pub use error::{extract_message, ErrorKind, RemoteError, UNKNOWN_ERROR_MESSAGE};
pub use query::{build_url, QueryParam};
pub use reply::Reply;
pub use reqwest::Method;
