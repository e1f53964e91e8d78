//! Authentication endpoints.
//!
//! The backend answers failed logins and registrations with HTTP 200 and a
//! body describing the failure; those replies are turned into
//! [`ErrorKind::Rejected`](crate::transport::ErrorKind::Rejected) errors here.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Credentials;
use crate::transport::{ApiClient, CsrfToken, RemoteError, NO_BODY};

use super::endpoints;
use super::models::{User, UserUpdate};

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterReply {
    #[serde(default)]
    error: Option<String>,
}

/// Thin typed wrapper over the `/api/auth` routes.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn bootstrap_csrf(&self) -> Result<CsrfToken, RemoteError> {
        self.client.refresh_csrf_token().await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<(), RemoteError> {
        let raw: Value = self.client.post(endpoints::LOGIN, Some(credentials)).await?;
        let reply: LoginReply =
            serde_json::from_value(raw.clone()).map_err(|e| RemoteError::decode(200, e))?;

        if reply.success {
            Ok(())
        } else {
            Err(RemoteError::rejected(
                401,
                reply.message.unwrap_or_else(|| "Invalid credentials".to_string()),
                Some(raw),
            ))
        }
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), RemoteError> {
        let raw: Value = self
            .client
            .post(endpoints::REGISTER, Some(credentials))
            .await?;
        let reply: RegisterReply =
            serde_json::from_value(raw.clone()).map_err(|e| RemoteError::decode(200, e))?;

        match reply.error {
            Some(message) => Err(RemoteError::rejected(400, message, Some(raw))),
            None => Ok(()),
        }
    }

    /// The reply body, if any, carries nothing useful.
    pub async fn logout(&self) -> Result<(), RemoteError> {
        self.client
            .request::<Value, ()>(reqwest::Method::POST, endpoints::LOGOUT, NO_BODY, &[])
            .await
            .map(|_| ())
    }

    pub async fn current_user(&self) -> Result<User, RemoteError> {
        self.client.get(endpoints::USER, &[]).await
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<User, RemoteError> {
        self.client.patch(endpoints::USER, update).await
    }
}
