use queries::{QueryEvent, QueryResult};
use std::rc::Rc;
use std::sync::Arc;
use yew::prelude::*;

use super::FetchState;

/// What a query hook shows: the last data, whether a fetch is running, and
/// the error of the last failed fetch.
#[derive(Debug, PartialEq)]
pub struct QueryState<T, E> {
    pub data: FetchState<T>,
    pub fetching: bool,
    pub error: Option<Arc<E>>,
}

impl<T, E> Default for QueryState<T, E> {
    fn default() -> Self {
        Self {
            data: FetchState::NotFetched,
            fetching: false,
            error: None,
        }
    }
}

impl<T: Clone, E> Clone for QueryState<T, E> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            fetching: self.fetching,
            error: self.error.clone(),
        }
    }
}

impl<T, E> QueryState<T, E> {
    pub fn from_cache(cached: Option<T>) -> Self {
        Self {
            data: match cached {
                Some(data) => FetchState::Fetched(data),
                None => FetchState::NotFetched,
            },
            ..Default::default()
        }
    }

    /// Loading while a fetch runs, and also before the first fetch has
    /// produced either data or an error.
    pub fn is_loading(&self) -> bool {
        self.fetching || (!self.data.is_fetched() && self.error.is_none())
    }
}

pub enum QueryAction<T, E> {
    FetchStarted,
    FetchSettled(QueryResult<T, E>),
    /// A cache event for the key, with the cached data at that moment.
    Cache(QueryEvent, Option<T>),
}

/// Cache events after which the hook has to fetch again to have anything
/// current to show.
pub fn needs_refetch(event: QueryEvent) -> bool {
    matches!(event, QueryEvent::Invalidated | QueryEvent::Removed)
}

impl<T: Clone + 'static, E: 'static> Reducible for QueryState<T, E> {
    type Action = QueryAction<T, E>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = Rc::unwrap_or_clone(self);

        match action {
            QueryAction::FetchStarted => {
                state.fetching = true;
            }
            QueryAction::FetchSettled(Ok(data)) => {
                state.data = FetchState::Fetched(data);
                state.error = None;
                state.fetching = false;
            }
            QueryAction::FetchSettled(Err(e)) => {
                state.error = Some(e);
                state.fetching = false;
            }
            QueryAction::Cache(QueryEvent::Updated, Some(data)) => {
                state.data = FetchState::Fetched(data);
                state.error = None;
            }
            QueryAction::Cache(QueryEvent::Updated, None) => {}
            QueryAction::Cache(QueryEvent::Invalidated, _) => {}
            QueryAction::Cache(QueryEvent::Removed, _) => {
                state.data = FetchState::NotFetched;
                state.error = None;
            }
        }

        Rc::new(state)
    }
}
