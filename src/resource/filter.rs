use std::fmt::Debug;

use crate::transport::QueryParam;

/// Server-side selection criteria for a list endpoint.
///
/// Filters are compared structurally (`PartialEq`); a resource only
/// refetches when the new filter differs from the current one.
pub trait Filter: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Query parameters for this filter; unset fields map to `None`.
    fn to_query(&self) -> Vec<QueryParam<'static>>;
}

/// Selects the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilter;

impl Filter for NoFilter {
    fn to_query(&self) -> Vec<QueryParam<'static>> {
        Vec::new()
    }
}
