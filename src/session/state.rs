use crate::api::User;
use crate::mvi::ViewState;

/// Where the session stands. The identity exists only while authenticated.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// A probe or credential exchange is in flight.
    Authenticating,
    Authenticated { user: User },
}

impl ViewState for SessionState {}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Authenticating)
    }

    /// Flattened form for rendering.
    pub fn view(&self) -> SessionView {
        SessionView {
            user: self.user().cloned(),
            is_authenticated: self.is_authenticated(),
            is_loading: self.is_loading(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}
