//! Reusable fetch/mutate pattern instantiated per entity.
//!
//! - [`Resource`]: `{data, loading, error}` plus `refetch`, latest-issued wins
//! - [`Mutation`]: independently tracked imperative operations
//! - [`Filter`]: structural server-side selection
//! - [`search`]: local free-text narrowing that never hits the network

mod fetch;
mod filter;
mod intent;
mod mutation;
mod reducer;
pub mod search;
mod state;

pub use fetch::{fetcher, FetchOutcome, Fetcher, Resource};
pub use filter::{Filter, NoFilter};
pub use intent::ResourceIntent;
pub use mutation::{Mutation, MutationIntent, MutationReducer, MutationState};
pub use reducer::ResourceReducer;
pub use search::{filter_local, Searchable};
pub use state::ResourceState;
