//! Owner of the authenticated identity.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::api::{AuthApi, User, UserUpdate};
use crate::config::Credentials;
use crate::mvi::{self, Reducer};
use crate::transport::{ApiClient, RemoteError};

use super::intent::SessionIntent;
use super::reducer::SessionReducer;
use super::state::{SessionState, SessionView};

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Another login or signup is still in flight.
    #[error("Another sign-in is already in progress")]
    Busy,

    /// The exchange succeeded but a logout landed before it finished.
    #[error("Signed out while signing in")]
    Interrupted,
}

/// Drives login, signup, logout and identity refresh, and publishes the
/// resulting [`SessionState`].
///
/// Clones share state and the underlying client.
#[derive(Clone)]
pub struct SessionManager {
    auth: AuthApi,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            auth: AuthApi::new(client),
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> SessionView {
        self.state.borrow().view()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Probe for an existing server session. Never fails: any error just
    /// leaves the session unauthenticated.
    pub async fn initialize(&self) {
        self.apply(SessionIntent::ProbeStarted);

        match self.fetch_identity().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Existing session restored");
                self.apply(SessionIntent::Authenticated { user });
            }
            Err(err) => {
                tracing::debug!(status = err.status_code, "No existing session: {}", err.message);
                self.apply(SessionIntent::ProbeFailed);
            }
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        self.begin(SessionIntent::LoginStarted)?;
        tracing::debug!(email = %credentials.email, "Login started");

        let result = self.sign_in(credentials).await;
        self.finish(result)
    }

    /// Register, then sign in with the same credentials.
    pub async fn signup(&self, credentials: &Credentials) -> Result<User, SessionError> {
        self.begin(SessionIntent::SignupStarted)?;
        tracing::debug!(email = %credentials.email, "Signup started");

        let result = self.register_and_sign_in(credentials).await;
        self.finish(result)
    }

    /// Best-effort server logout. Locally the session always ends, and the
    /// client drops its cookies so a failed server call cannot leave a
    /// restorable session behind.
    pub async fn logout(&self) {
        if let Err(err) = self.auth.logout().await {
            tracing::warn!(status = err.status_code, "Server logout failed: {}", err.message);
        }
        self.auth.client().clear_credentials();
        self.apply(SessionIntent::LoggedOut);
        tracing::info!("Logged out");
    }

    /// Re-read the identity; failures are logged and otherwise ignored.
    pub async fn refresh_user(&self) {
        match self.auth.current_user().await {
            Ok(user) => self.apply(SessionIntent::IdentityRefreshed { user }),
            Err(err) => {
                tracing::warn!(status = err.status_code, "Failed to refresh user: {}", err.message)
            }
        }
    }

    /// Send a partial update; the stored identity becomes the server's reply.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<User, SessionError> {
        let user = self.auth.update_user(update).await?;
        self.apply(SessionIntent::IdentityRefreshed { user: user.clone() });
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<User, RemoteError> {
        self.auth.bootstrap_csrf().await?;
        self.auth.login(credentials).await?;
        self.auth.current_user().await
    }

    async fn register_and_sign_in(&self, credentials: &Credentials) -> Result<User, RemoteError> {
        self.auth.bootstrap_csrf().await?;
        self.auth.register(credentials).await?;
        self.auth.login(credentials).await?;
        self.auth.current_user().await
    }

    async fn fetch_identity(&self) -> Result<User, RemoteError> {
        self.auth.bootstrap_csrf().await?;
        self.auth.current_user().await
    }

    /// Enter `Authenticating` unless already there.
    fn begin(&self, intent: SessionIntent) -> Result<(), SessionError> {
        let mut busy = false;
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                busy = true;
                return false;
            }
            *state = SessionReducer::reduce(std::mem::take(state), intent);
            true
        });

        if busy {
            tracing::debug!("Sign-in rejected, another one is in flight");
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    fn finish(&self, result: Result<User, RemoteError>) -> Result<User, SessionError> {
        match result {
            Ok(user) => {
                self.apply(SessionIntent::Authenticated { user: user.clone() });
                if self.state.borrow().user() != Some(&user) {
                    return Err(SessionError::Interrupted);
                }
                tracing::info!(username = %user.username, "Signed in");
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(
                    status = err.status_code,
                    kind = err.kind.as_str(),
                    "Sign-in failed: {}",
                    err.message
                );
                self.apply(SessionIntent::Failed {
                    message: err.message.clone(),
                });
                Err(err.into())
            }
        }
    }

    fn apply(&self, intent: SessionIntent) {
        mvi::dispatch::<SessionReducer>(&self.state, intent);
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
