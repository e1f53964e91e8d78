use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::ResourceIntent;
use super::state::ResourceState;

pub struct ResourceReducer<T>(PhantomData<T>);

impl<T: Clone + PartialEq + Send + Sync + 'static> Reducer for ResourceReducer<T> {
    type State = ResourceState<T>;
    type Intent = ResourceIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ResourceIntent::FetchStarted => ResourceState {
                data: state.data,
                loading: true,
                error: None,
            },
            ResourceIntent::FetchSucceeded(data) => ResourceState {
                data: Some(data),
                loading: false,
                error: None,
            },
            ResourceIntent::FetchFailed { message } => ResourceState {
                data: state.data,
                loading: false,
                error: Some(message),
            },
        }
    }
}
