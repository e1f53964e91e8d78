//! Configuration loading, storage and credentials.

pub mod credentials;
mod loader;
mod store;
mod types;

pub use credentials::{Credentials, SecureString};
pub use loader::{ConfigError, API_URL_ENV};
pub use store::ConfigStore;
pub use types::{ApiConfig, Config, CsrfConfig};
