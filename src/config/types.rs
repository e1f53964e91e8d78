use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub csrf: CsrfConfig,
}

/// Remote service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g., "http://localhost:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// TCP connect timeout in seconds (default: 5).
    ///
    /// Bounds connection setup only; requests themselves are never timed out.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Anti-forgery token handshake settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrfConfig {
    /// Cookie the server stores the token in (default: "csrftoken").
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Header the token is echoed back in (default: "X-CSRFToken").
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_user_agent() -> String {
    format!("lead-console/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_header_name() -> String {
    "X-CSRFToken".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            header_name: default_header_name(),
        }
    }
}

impl Config {
    /// Config pointing at an explicit base URL, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            csrf: CsrfConfig::default(),
        }
    }
}
