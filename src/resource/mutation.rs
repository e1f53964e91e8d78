//! Imperative operations with their own loading/error tracking.
//!
//! A mutation never touches any resource's data and never refetches on its
//! own; the caller decides when to resynchronize.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::mvi::{dispatch, Intent, Reducer, ViewState};
use crate::transport::RemoteError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<String>,
}

impl ViewState for MutationState {}

#[derive(Debug, Clone)]
pub enum MutationIntent {
    Started,
    Succeeded,
    Failed { message: String },
}

impl Intent for MutationIntent {}

pub struct MutationReducer;

impl Reducer for MutationReducer {
    type State = MutationState;
    type Intent = MutationIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MutationIntent::Started => MutationState {
                loading: true,
                error: None,
            },
            MutationIntent::Succeeded => MutationState::default(),
            MutationIntent::Failed { message } => MutationState {
                loading: false,
                error: Some(message),
            },
        }
    }
}

/// One tracked operation (e.g. "toggle promoted").
#[derive(Clone)]
pub struct Mutation {
    label: &'static str,
    state: Arc<watch::Sender<MutationState>>,
}

impl Mutation {
    pub fn new(label: &'static str) -> Self {
        let (state, _) = watch::channel(MutationState::default());
        Self {
            label,
            state: Arc::new(state),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn state(&self) -> MutationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }

    /// Run `operation`, recording its progress. The error is both stored
    /// and returned.
    pub async fn run<T, Fut>(&self, operation: Fut) -> Result<T, RemoteError>
    where
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        self.apply(MutationIntent::Started);

        match operation.await {
            Ok(value) => {
                self.apply(MutationIntent::Succeeded);
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(
                    mutation = self.label,
                    status = err.status_code,
                    "Mutation failed: {}",
                    err.message
                );
                self.apply(MutationIntent::Failed {
                    message: err.message.clone(),
                });
                Err(err)
            }
        }
    }

    fn apply(&self, intent: MutationIntent) {
        dispatch::<MutationReducer>(&self.state, intent);
    }
}

impl std::fmt::Debug for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("label", &self.label)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
