//! In-memory CSRF token handling.

use parking_lot::RwLock;
use reqwest::cookie::CookieStore;
use reqwest::Url;

/// Opaque anti-forgery token issued by the server.
///
/// Never persisted and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Wrap a token value; empty or whitespace-only values are refused.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CsrfToken(••••••••)")
    }
}

/// Memoized token plus the cookie it can be recovered from.
pub(crate) struct CsrfStore {
    token: RwLock<Option<CsrfToken>>,
    cookie_name: String,
}

impl CsrfStore {
    pub(crate) fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(None),
            cookie_name: cookie_name.into(),
        }
    }

    pub(crate) fn get(&self) -> Option<CsrfToken> {
        self.token.read().clone()
    }

    pub(crate) fn set(&self, token: CsrfToken) {
        *self.token.write() = Some(token);
    }

    pub(crate) fn clear(&self) {
        *self.token.write() = None;
    }

    /// Return the known token, or adopt the one in the cookie jar.
    pub(crate) fn current(&self, jar: &dyn CookieStore, url: &Url) -> Option<CsrfToken> {
        if let Some(token) = self.get() {
            return Some(token);
        }

        let token = self.read_cookie(jar, url)?;
        tracing::debug!("CSRF token adopted from cookie");
        self.set(token.clone());
        Some(token)
    }

    /// Read the token cookie for `url` without touching the memoized value.
    pub(crate) fn read_cookie(&self, jar: &dyn CookieStore, url: &Url) -> Option<CsrfToken> {
        let header = jar.cookies(url)?;
        let header = header.to_str().ok()?;
        cookie_value(header, &self.cookie_name).and_then(CsrfToken::new)
    }
}

/// Find `name` in a `Cookie` header value (`a=1; b=2`).
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"').to_string())
    })
}
