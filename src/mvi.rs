//! State/intent/reducer primitives shared by the session and resource layers.
//!
//! ```text
//! network outcome ─→ Intent ─→ Reducer ─→ State ─→ watch subscribers
//! ```
//!
//! State only changes inside a reducer, and every change is published
//! through a `tokio::sync::watch` channel.

use tokio::sync::watch;

/// An event that may move a state machine: a caller action or a request
/// outcome.
pub trait Intent: Send + 'static {}

/// Snapshot handed to observers. Must be cheap to compare so subscribers
/// can skip redundant renders.
pub trait ViewState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Pure transition function: `(State, Intent) -> State`.
pub trait Reducer {
    type State: ViewState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Reduce `intent` into the channel's current value and notify receivers.
pub fn dispatch<R: Reducer>(state: &watch::Sender<R::State>, intent: R::Intent) {
    state.send_modify(|current| {
        *current = R::reduce(std::mem::take(current), intent);
    });
}
