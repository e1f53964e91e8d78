//! Cookie store that can be emptied without rebuilding the HTTP client.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;

/// Delegates to a [`Jar`] that [`SessionCookies::reset`] swaps out.
#[derive(Default)]
pub(crate) struct SessionCookies {
    jar: RwLock<Arc<Jar>>,
}

impl SessionCookies {
    /// Drop every stored cookie.
    pub(crate) fn reset(&self) {
        *self.jar.write() = Arc::new(Jar::default());
    }

    fn current(&self) -> Arc<Jar> {
        Arc::clone(&self.jar.read())
    }
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.current().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.current().cookies(url)
    }
}
