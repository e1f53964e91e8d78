//! Session lifecycle: who is signed in, and how that changes.

mod intent;
mod manager;
mod reducer;
mod state;

pub use intent::SessionIntent;
pub use manager::{SessionError, SessionManager};
pub use reducer::SessionReducer;
pub use state::{SessionState, SessionView};
