use crate::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::SessionState;

/// Pure session state machine.
///
/// ```text
/// Unauthenticated ──probe/login/signup──→ Authenticating
/// Authenticating  ──authenticated───────→ Authenticated
/// Authenticating  ──failed/probe failed─→ Unauthenticated
/// Authenticated   ──login/signup────────→ Authenticating
/// any             ──logged out──────────→ Unauthenticated
/// ```
///
/// Outcomes that arrive in an unexpected state are ignored, so a logout
/// that lands mid-login is not undone by the login finishing later.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (SessionState::Unauthenticated, SessionIntent::ProbeStarted) => {
                SessionState::Authenticating
            }
            (state, SessionIntent::ProbeStarted) => state,

            (_, SessionIntent::LoginStarted | SessionIntent::SignupStarted) => {
                SessionState::Authenticating
            }

            (SessionState::Authenticating, SessionIntent::Authenticated { user }) => {
                SessionState::Authenticated { user }
            }

            (
                SessionState::Authenticating,
                SessionIntent::Failed { .. } | SessionIntent::ProbeFailed,
            ) => SessionState::Unauthenticated,

            (SessionState::Authenticated { .. }, SessionIntent::IdentityRefreshed { user }) => {
                SessionState::Authenticated { user }
            }

            (_, SessionIntent::LoggedOut) => SessionState::Unauthenticated,

            (state, _) => state,
        }
    }
}
