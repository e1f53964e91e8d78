//! Client-side free-text search over already fetched records.
//!
//! Nothing here performs I/O; changing the query never triggers a fetch.

use super::state::ResourceState;

/// Records that expose text fields to the local search box.
pub trait Searchable {
    /// Fields matched by the search; `None` fields never match.
    fn search_fields(&self) -> Vec<Option<&str>>;
}

/// Case-insensitive substring match on any field.
///
/// A blank query matches everything.
pub fn matches<T: Searchable>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    item.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// The subset of `items` matching `query`, in the original order.
pub fn filter_local<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, query)).collect()
}

impl<T: Searchable> ResourceState<Vec<T>> {
    /// Matching records from the last committed data.
    pub fn search(&self, query: &str) -> Vec<&T> {
        self.data
            .as_deref()
            .map(|items| filter_local(items, query))
            .unwrap_or_default()
    }
}
