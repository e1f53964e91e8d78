//! Client-side session and API access for the lead console backend.
//!
//! - [`transport`]: cookie/CSRF-aware HTTP client and error normalization
//! - [`session`]: sign-in state machine and identity
//! - [`resource`]: fetch/mutate state per entity view
//! - [`api`]: typed endpoints for contacts, leads and communications

pub mod api;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod resource;
pub mod session;
pub mod transport;

pub use api::Api;
pub use config::{Config, Credentials};
pub use session::{SessionError, SessionManager, SessionState};
pub use transport::{ApiClient, RemoteError};
