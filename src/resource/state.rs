use crate::mvi::ViewState;

/// Uniform snapshot every list/detail resource publishes.
///
/// `data` survives failures and reloads; only a successful fetch replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ViewState for ResourceState<T> {}

impl<T> ResourceState<T> {
    /// True once any fetch has committed data.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
