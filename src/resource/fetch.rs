//! Observable fetch state for one (entity, filter) pair.
//!
//! Every fetch takes a ticket. Only the most recently issued ticket may
//! commit; earlier fetches are aborted when a newer one starts, and their
//! results are discarded if they still complete. The commit runs on its own
//! task, independent of whoever awaits the outcome.

use std::fmt::Debug;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinError, JoinHandle};

use crate::mvi;
use crate::transport::RemoteError;

use super::intent::ResourceIntent;
use super::reducer::ResourceReducer;
use super::state::ResourceState;

/// Produces the data for a given filter (or id).
pub type Fetcher<T, F> = Arc<dyn Fn(F) -> BoxFuture<'static, Result<T, RemoteError>> + Send + Sync>;

/// What happened to the fetch a call issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result (data or error) is now the visible state.
    Committed,
    /// A newer fetch was issued first; the result was dropped.
    Superseded,
}

/// Cheaply cloneable handle; clones observe and drive the same state.
pub struct Resource<T, F> {
    inner: Arc<Inner<T, F>>,
}

impl<T, F> Clone for Resource<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T, F> {
    label: String,
    fetcher: Fetcher<T, F>,
    state: watch::Sender<ResourceState<T>>,
    control: Mutex<Control<F>>,
}

struct Control<F> {
    filter: F,
    issued: u64,
    in_flight: Option<AbortHandle>,
}

impl<T, F> Resource<T, F>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    /// Create an idle resource; nothing is fetched until [`Resource::mount`].
    pub fn new(label: impl Into<String>, filter: F, fetcher: Fetcher<T, F>) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            inner: Arc::new(Inner {
                label: label.into(),
                fetcher,
                state,
                control: Mutex::new(Control {
                    filter,
                    issued: 0,
                    in_flight: None,
                }),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Current snapshot.
    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    pub fn filter(&self) -> F {
        self.inner.control.lock().filter.clone()
    }

    /// Issue the initial fetch for the current filter.
    pub async fn mount(&self) -> FetchOutcome {
        tracing::debug!(resource = %self.inner.label, "Mounted");
        self.refetch().await
    }

    /// Fetch again with the current filter. Safe to call while another
    /// fetch is in flight; the latest call wins.
    ///
    /// The result is committed by a background task, so dropping the
    /// returned future does not lose it.
    pub async fn refetch(&self) -> FetchOutcome {
        let task = {
            let mut control = self.inner.control.lock();
            let filter = control.filter.clone();
            self.issue(&mut control, filter)
        };
        outcome_of(task).await
    }

    /// Switch to `filter`, fetching only if it differs structurally.
    ///
    /// Returns `None` when the filter is unchanged and no request was made.
    pub async fn set_filter(&self, filter: F) -> Option<FetchOutcome> {
        let task = {
            let mut control = self.inner.control.lock();
            if control.filter == filter {
                tracing::debug!(
                    resource = %self.inner.label,
                    ?filter,
                    "Filter unchanged, no fetch"
                );
                return None;
            }
            control.filter = filter.clone();
            self.issue(&mut control, filter)
        };
        Some(outcome_of(task).await)
    }

    fn issue(&self, control: &mut Control<F>, filter: F) -> JoinHandle<FetchOutcome> {
        control.issued += 1;
        let ticket = control.issued;

        tracing::debug!(resource = %self.inner.label, ticket, ?filter, "Fetch issued");
        let request = tokio::spawn((self.inner.fetcher)(filter));

        if let Some(previous) = control.in_flight.replace(request.abort_handle()) {
            previous.abort();
        }
        self.inner.apply(ResourceIntent::FetchStarted);

        // Commits need the control lock, which the caller holds until
        // FetchStarted is applied.
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = request.await;
            inner.settle(ticket, result)
        })
    }
}

impl<T, F> Inner<T, F>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn settle(
        &self,
        ticket: u64,
        result: Result<Result<T, RemoteError>, JoinError>,
    ) -> FetchOutcome {
        let mut control = self.control.lock();
        if control.issued != ticket {
            tracing::debug!(
                resource = %self.label,
                ticket,
                latest = control.issued,
                "Fetch superseded, result dropped"
            );
            return FetchOutcome::Superseded;
        }
        control.in_flight = None;

        match result {
            Ok(Ok(data)) => self.apply(ResourceIntent::FetchSucceeded(data)),
            Ok(Err(err)) => {
                tracing::warn!(
                    resource = %self.label,
                    status = err.status_code,
                    kind = err.kind.as_str(),
                    "Fetch failed: {}",
                    err.message
                );
                self.apply(ResourceIntent::FetchFailed {
                    message: err.message,
                });
            }
            Err(join_err) => {
                tracing::error!(
                    resource = %self.label,
                    error = %join_err,
                    "Fetch task did not complete"
                );
                self.apply(ResourceIntent::FetchFailed {
                    message: format!("Failed to fetch {}", self.label),
                });
            }
        }

        FetchOutcome::Committed
    }

    fn apply(&self, intent: ResourceIntent<T>) {
        mvi::dispatch::<ResourceReducer<T>>(&self.state, intent);
    }
}

async fn outcome_of(task: JoinHandle<FetchOutcome>) -> FetchOutcome {
    // The commit task is never aborted; a join error means the runtime is
    // shutting down.
    task.await.unwrap_or(FetchOutcome::Superseded)
}

/// Wrap an async closure as a [`Fetcher`].
pub fn fetcher<T, F, Fut>(f: impl Fn(F) -> Fut + Send + Sync + 'static) -> Fetcher<T, F>
where
    Fut: std::future::Future<Output = Result<T, RemoteError>> + Send + 'static,
{
    Arc::new(move |filter| Box::pin(f(filter)))
}
