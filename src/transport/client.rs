//! Session-aware HTTP client.
//!
//! Every outbound call goes through [`ApiClient::request`], which attaches
//! cookies, JSON headers and the CSRF token, and normalizes every failure
//! into a [`RemoteError`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

use super::cookies::SessionCookies;
use super::csrf::{CsrfStore, CsrfToken};
use super::error::RemoteError;
use super::query::{build_url, QueryParam};
use super::reply::Reply;

/// Endpoint that issues a fresh CSRF token (and sets the matching cookie).
pub const CSRF_BOOTSTRAP_PATH: &str = "/api/auth/set-csrf-token";

/// Pass as `body` for requests without one.
pub const NO_BODY: Option<&()> = None;

const JSON: &str = "application/json";

#[derive(Debug, Deserialize)]
struct CsrfBootstrap {
    #[serde(default)]
    csrftoken: Option<String>,
}

/// Cheaply cloneable handle; clones share cookies and the CSRF token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    base_url: Url,
    jar: Arc<SessionCookies>,
    csrf: CsrfStore,
    csrf_header: HeaderName,
}

impl ApiClient {
    /// Build a client from validated configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let base_url =
            Url::parse(config.api.base_url.trim()).map_err(|e| ConfigError::ValidationError {
                message: format!("api.base_url is not a valid URL: {}", e),
            })?;
        let csrf_header = HeaderName::from_bytes(config.csrf.header_name.trim().as_bytes())
            .map_err(|e| ConfigError::ValidationError {
                message: format!("csrf.header_name is not a valid header name: {}", e),
            })?;

        let jar = Arc::new(SessionCookies::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .connect_timeout(Duration::from_secs(u64::from(
                config.api.connect_timeout_seconds,
            )))
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::ClientBuild { source: e })?;

        tracing::debug!(base_url = %base_url, "API client created");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                jar,
                csrf: CsrfStore::new(config.csrf.cookie_name.trim()),
                csrf_header,
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The token that would be attached to the next request, if any.
    pub fn csrf_token(&self) -> Option<CsrfToken> {
        self.inner
            .csrf
            .current(&*self.inner.jar, &self.inner.base_url)
    }

    pub fn set_csrf_token(&self, token: CsrfToken) {
        self.inner.csrf.set(token);
    }

    /// Forget the in-memory token. A token cookie still in the jar will be
    /// picked up again on the next request.
    pub fn clear_csrf_token(&self) {
        self.inner.csrf.clear();
    }

    /// Forget every cookie and the in-memory token, leaving the client as
    /// if freshly built.
    pub fn clear_credentials(&self) {
        self.inner.jar.reset();
        self.inner.csrf.clear();
        tracing::debug!("Cookies and CSRF token cleared");
    }

    /// Fetch a fresh token from the bootstrap endpoint and memoize it.
    ///
    /// The JSON `csrftoken` field wins; the cookie set by the same response
    /// is the fallback.
    pub async fn refresh_csrf_token(&self) -> Result<CsrfToken, RemoteError> {
        let url = build_url(&self.inner.base_url, CSRF_BOOTSTRAP_PATH, &[])?;
        let reply: Reply<CsrfBootstrap> = self
            .request(Method::GET, CSRF_BOOTSTRAP_PATH, NO_BODY, &[])
            .await?;

        let token = reply
            .content()
            .and_then(|body| body.csrftoken)
            .and_then(CsrfToken::new)
            .or_else(|| self.inner.csrf.read_cookie(&*self.inner.jar, &url))
            .ok_or_else(|| RemoteError::decode(200, "CSRF bootstrap returned no token"))?;

        self.inner.csrf.set(token.clone());
        tracing::debug!("CSRF token refreshed");
        Ok(token)
    }

    /// Issue a request and decode the response.
    ///
    /// - `body` is serialized as JSON with a JSON content type.
    /// - `query` entries with `None` values are skipped.
    /// - 204 (or an empty 2xx body) yields [`Reply::NoContent`] without a
    ///   parse attempt.
    /// - Non-2xx statuses and network failures yield [`RemoteError`].
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[QueryParam<'_>],
    ) -> Result<Reply<T>, RemoteError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let inner = &self.inner;
        let url = build_url(&inner.base_url, path, query)?;

        let mut builder = inner
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, HeaderValue::from_static(JSON));

        if let Some(token) = inner.csrf.current(&*inner.jar, &url) {
            match HeaderValue::from_str(token.as_str()) {
                Ok(value) => builder = builder.header(inner.csrf_header.clone(), value),
                Err(_) => tracing::warn!("CSRF token is not a valid header value, omitting"),
            }
        }

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| RemoteError::decode(0, e))?;
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON))
                .body(bytes);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, error = %e, "Request failed");
            RemoteError::network(&e)
        })?;

        self.observe_csrf_cookie(&url);

        let status = response.status();
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Request completed"
        );

        if status == StatusCode::NO_CONTENT {
            return Ok(Reply::NoContent);
        }

        // A body that cannot be read on an error status still yields the fallback message.
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let err = RemoteError::from_response(status.as_u16(), &bytes);
            tracing::warn!(
                method = %method,
                path = %path,
                status = err.status_code,
                kind = err.kind.as_str(),
                message = %err.message,
                "Remote returned an error"
            );
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::network(&e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Reply::NoContent);
        }

        serde_json::from_slice(&bytes)
            .map(Reply::Content)
            .map_err(|e| RemoteError::decode(status.as_u16(), e))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[QueryParam<'_>],
    ) -> Result<T, RemoteError> {
        self.request(Method::GET, path, NO_BODY, query)
            .await?
            .require(200)
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, body, &[])
            .await?
            .require(200)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), &[])
            .await?
            .require(200)
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), &[])
            .await?
            .require(200)
    }

    /// Destructive calls commonly answer 204, so the tag is kept.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>, RemoteError> {
        self.request(Method::DELETE, path, NO_BODY, &[]).await
    }

    /// Adopt a token the server rotated through its cookie.
    fn observe_csrf_cookie(&self, url: &Url) {
        let inner = &self.inner;
        let Some(cookie_token) = inner.csrf.read_cookie(&*inner.jar, url) else {
            return;
        };
        if inner.csrf.get().as_ref() != Some(&cookie_token) {
            tracing::debug!("CSRF token rotated by server cookie");
            inner.csrf.set(cookie_token);
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("csrf_header", &self.inner.csrf_header)
            .finish_non_exhaustive()
    }
}
