use crate::api::User;
use crate::mvi::Intent;

/// Session transitions, raised by the manager around each network step.
#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// Start-up identity probe began.
    ProbeStarted,
    LoginStarted,
    SignupStarted,
    /// Credential exchange and identity fetch both succeeded.
    Authenticated { user: User },
    /// Credential exchange failed.
    Failed { message: String },
    /// Start-up probe found no valid session.
    ProbeFailed,
    IdentityRefreshed { user: User },
    LoggedOut,
}

impl Intent for SessionIntent {}
