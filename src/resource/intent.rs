use crate::mvi::Intent;

/// Outcomes of a single fetch, in the order they occur.
#[derive(Debug, Clone)]
pub enum ResourceIntent<T> {
    /// A fetch was issued.
    FetchStarted,
    /// The latest fetch returned data.
    FetchSucceeded(T),
    /// The latest fetch failed.
    FetchFailed { message: String },
}

impl<T: Send + 'static> Intent for ResourceIntent<T> {}
