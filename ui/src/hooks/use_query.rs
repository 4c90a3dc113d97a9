use queries::Query;
use std::rc::Rc;
use std::sync::Arc;
use yew::prelude::*;

use super::FetchState;
use super::query_state::{QueryAction, QueryState, needs_refetch};
use crate::get_query_client;

/// Query hook return type
pub struct QueryHookReturn<T, E> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<Arc<E>>,
    /// Fetch again, ignoring cached data.
    pub refetch: Callback<()>,
}

impl<T: Clone, E: std::fmt::Display> QueryHookReturn<T, E> {
    /// Render based on query state with contextual loading/error messages.
    ///
    /// - No data + error: "Error loading {context}: ..."
    /// - No data otherwise: "Loading {context}..."
    /// - Has data: calls `render_fn(data, is_loading, error)`, where
    ///   `is_loading` means a refetch is in progress and `error` is from a
    ///   failed refetch (the previous data is still shown).
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&E>) -> Html,
    {
        match self.data.as_ref() {
            None => {
                if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {}: {}", context, error)}
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {}...", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => {
                render_fn(data, self.is_loading, self.error.as_deref())
            }
        }
    }
}

/// Read a query through the shared [`queries::QueryClient`].
///
/// Renders cached data immediately if there is any, fetches on mount and
/// whenever the query key changes, and fetches again when the key is
/// invalidated or removed. Components mounting the same key at the same
/// time share a single request.
///
/// # Example
///
/// ```ignore
/// #[hook]
/// pub fn use_credits() -> QueryHookReturn<CreditBalance, ClientError> {
///     use_query(CreditsQuery::new(get_api_client()))
/// }
/// ```
#[hook]
pub fn use_query<Q>(query: Q) -> QueryHookReturn<Q::Data, Q::Error>
where
    Q: Query,
{
    let client = get_query_client();
    let key = query.key();

    let state = {
        let client = client.clone();
        let key = key.clone();
        use_reducer(move || {
            QueryState::from_cache(client.get_query_data::<Q::Data>(&key))
        })
    };

    // Emitting `true` bypasses fresh cached data.
    let fetch = {
        let dispatcher = state.dispatcher();
        let client = client.clone();
        let query = Rc::new(query);

        use_callback(key.clone(), move |force: bool, _| {
            let dispatcher = dispatcher.clone();
            let client = client.clone();
            let query = query.clone();

            yew::platform::spawn_local(async move {
                dispatcher.dispatch(QueryAction::FetchStarted);

                let result = if force {
                    client.refetch_query(&*query).await
                } else {
                    client.fetch_query(&*query).await
                };

                dispatcher.dispatch(QueryAction::FetchSettled(result));
            });
        })
    };

    // Auto-fetch on mount and when the key changes, and follow the cache
    // entry until unmount.
    {
        let fetch = fetch.clone();
        let dispatcher = state.dispatcher();

        use_effect_with(key, move |key| {
            let subscription = client.subscribe(key.clone(), {
                let client = client.clone();
                let key = key.clone();
                let fetch = fetch.clone();
                move |event| {
                    let cached = client.get_query_data::<Q::Data>(&key);
                    dispatcher.dispatch(QueryAction::Cache(event, cached));
                    if needs_refetch(event) {
                        fetch.emit(false);
                    }
                }
            });

            fetch.emit(false);

            move || drop(subscription)
        });
    }

    QueryHookReturn {
        data: state.data.clone(),
        is_loading: state.is_loading(),
        error: state.error.clone(),
        refetch: Callback::from(move |_| fetch.emit(true)),
    }
}
