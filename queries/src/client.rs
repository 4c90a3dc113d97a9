use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use jiff::{SignedDuration, Timestamp};

use crate::{Query, QueryKey};

/// Result of a query. Errors are shared so every caller waiting on the same
/// fetch sees the same error value.
pub type QueryResult<T, E> = Result<T, Arc<E>>;

type SharedFetch<T, E> = Shared<LocalBoxFuture<'static, QueryResult<T, E>>>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QueryOptions {
    /// How long fetched data is served from the cache before the next read
    /// refetches it. `None` keeps data fresh until it is invalidated.
    pub stale_time: Option<SignedDuration>,
}

/// Change to a cache entry, delivered to subscribers of its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEvent {
    /// New data was stored.
    Updated,
    /// Cached data went stale and should be refetched by anyone showing it.
    Invalidated,
    /// The entry was dropped from the cache.
    Removed,
}

struct CachedData {
    value: Rc<dyn Any>,
    updated_at: Timestamp,
    invalidated: bool,
}

impl CachedData {
    fn new<T: 'static>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            updated_at: Timestamp::now(),
            invalidated: false,
        }
    }

    fn is_stale(&self, options: &QueryOptions) -> bool {
        self.invalidated
            || options.stale_time.is_some_and(|stale_time| {
                Timestamp::now().duration_since(self.updated_at) >= stale_time
            })
    }
}

struct InFlight {
    id: u64,
    fetch: Rc<dyn Any>,
    /// Invalidated after the request went out; its result is stored stale
    /// and later reads do not join it.
    invalidated: bool,
}

#[derive(Default)]
struct Entry {
    data: Option<CachedData>,
    in_flight: Option<InFlight>,
}

type Listener = Rc<dyn Fn(QueryEvent)>;

#[derive(Default)]
struct Inner {
    options: QueryOptions,
    entries: HashMap<QueryKey, Entry>,
    listeners: HashMap<QueryKey, Vec<(u64, Listener)>>,
    next_id: u64,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

enum Lookup<T, E> {
    Fresh(T),
    InFlight(SharedFetch<T, E>),
    Miss,
}

/// Caches query results by key and deduplicates concurrent fetches.
///
/// Clones share the same cache. The client is single-threaded: it is meant
/// to live on the UI thread and be driven by a local executor.
#[derive(Clone, Default)]
pub struct QueryClient {
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                options,
                ..Default::default()
            })),
        }
    }

    /// Read `key` through the cache.
    ///
    /// Fresh cached data is returned as is. If a fetch for `key` is already
    /// running and was not invalidated since it started, its result is
    /// awaited instead of starting another one.
    /// Otherwise `fetcher` is called and its result is stored: data on
    /// success, nothing on failure.
    pub async fn fetch<T, E, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> QueryResult<T, E>
    where
        T: Clone + 'static,
        E: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let fetch = match self.lookup::<T, E>(&key) {
            Lookup::Fresh(value) => {
                tracing::debug!(%key, "query cache hit");
                return Ok(value);
            }
            Lookup::InFlight(fetch) => {
                tracing::debug!(%key, "joining in-flight query");
                fetch
            }
            Lookup::Miss => {
                tracing::debug!(%key, "fetching query");
                self.start_fetch(key, fetcher())
            }
        };
        fetch.await
    }

    /// Like [`fetch`](Self::fetch), but treats cached data as stale.
    /// A fetch that is already running is still joined.
    pub async fn refetch<T, E, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> QueryResult<T, E>
    where
        T: Clone + 'static,
        E: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        self.mark_stale(&key);
        self.fetch(key, fetcher).await
    }

    pub async fn fetch_query<Q: Query>(
        &self,
        query: &Q,
    ) -> QueryResult<Q::Data, Q::Error> {
        self.fetch(query.key(), || query.fetch()).await
    }

    pub async fn refetch_query<Q: Query>(
        &self,
        query: &Q,
    ) -> QueryResult<Q::Data, Q::Error> {
        self.refetch(query.key(), || query.fetch()).await
    }

    /// Cached data for `key`, stale or not.
    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.inner.borrow();
        let data = inner.entries.get(key)?.data.as_ref()?;
        data.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` as fresh data for `key`.
    pub fn set_query_data<T: 'static>(&self, key: QueryKey, value: T) {
        self.inner
            .borrow_mut()
            .entries
            .entry(key.clone())
            .or_default()
            .data = Some(CachedData::new(value));
        self.notify(&key, QueryEvent::Updated);
    }

    /// Mark cached data stale for every key starting with `prefix`, so the
    /// next read refetches it. A fetch already running for such a key is
    /// not joined by later reads, and its result is stored stale.
    /// Subscribers of those keys are told.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let keys: Vec<QueryKey> = {
            let mut inner = self.inner.borrow_mut();
            inner
                .entries
                .iter_mut()
                .filter(|(key, _)| key.starts_with(prefix))
                .map(|(key, entry)| {
                    if let Some(data) = entry.data.as_mut() {
                        data.invalidated = true;
                    }
                    if let Some(in_flight) = entry.in_flight.as_mut() {
                        in_flight.invalidated = true;
                    }
                    key.clone()
                })
                .collect()
        };
        for key in &keys {
            tracing::debug!(%key, "query invalidated");
            self.notify(key, QueryEvent::Invalidated);
        }
    }

    /// Drop the entry for `key`. A fetch still running for it will not be
    /// cached.
    pub fn remove(&self, key: &QueryKey) {
        let removed = self.inner.borrow_mut().entries.remove(key).is_some();
        if removed {
            self.notify(key, QueryEvent::Removed);
        }
    }

    pub fn clear(&self) {
        let keys: Vec<QueryKey> = self
            .inner
            .borrow_mut()
            .entries
            .drain()
            .map(|(key, _)| key)
            .collect();
        for key in &keys {
            self.notify(key, QueryEvent::Removed);
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Call `listener` on every change to `key` until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        key: QueryKey,
        listener: impl Fn(QueryEvent) + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id();
        inner
            .listeners
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(listener)));
        Subscription {
            client: Rc::downgrade(&self.inner),
            key,
            id,
        }
    }

    fn lookup<T, E>(&self, key: &QueryKey) -> Lookup<T, E>
    where
        T: Clone + 'static,
        E: 'static,
    {
        let inner = self.inner.borrow();
        let Some(entry) = inner.entries.get(key) else {
            return Lookup::Miss;
        };

        match &entry.in_flight {
            Some(in_flight) if in_flight.invalidated => {
                tracing::debug!(%key, "not joining invalidated query");
            }
            Some(in_flight) => {
                match in_flight.fetch.downcast_ref::<SharedFetch<T, E>>() {
                    Some(fetch) => return Lookup::InFlight(fetch.clone()),
                    None => {
                        tracing::warn!(%key, "in-flight query has another type")
                    }
                }
            }
            None => {}
        }

        match &entry.data {
            Some(data) if !data.is_stale(&inner.options) => {
                match data.value.downcast_ref::<T>() {
                    Some(value) => Lookup::Fresh(value.clone()),
                    None => {
                        tracing::warn!(%key, "cached query has another type");
                        Lookup::Miss
                    }
                }
            }
            _ => Lookup::Miss,
        }
    }

    fn start_fetch<T, E, Fut>(&self, key: QueryKey, fut: Fut) -> SharedFetch<T, E>
    where
        T: Clone + 'static,
        E: 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let id = self.inner.borrow_mut().next_id();

        // The shared future settles the cache itself so the result is stored
        // no matter which waiter ends up driving it.
        let client = Rc::downgrade(&self.inner);
        let settle_key = key.clone();
        let fetch = async move {
            let result = fut.await.map_err(Arc::new);
            if let Some(inner) = client.upgrade() {
                QueryClient { inner }.settle(&settle_key, id, &result);
            }
            result
        }
        .boxed_local()
        .shared();

        self.inner.borrow_mut().entries.entry(key).or_default().in_flight =
            Some(InFlight {
                id,
                fetch: Rc::new(fetch.clone()),
                invalidated: false,
            });
        fetch
    }

    fn settle<T, E>(&self, key: &QueryKey, id: u64, result: &QueryResult<T, E>)
    where
        T: Clone + 'static,
    {
        let updated = {
            let mut inner = self.inner.borrow_mut();
            let Some(entry) = inner.entries.get_mut(key) else {
                tracing::debug!(%key, "query removed while fetching");
                return;
            };
            let invalidated = match entry.in_flight.take() {
                Some(in_flight) if in_flight.id == id => in_flight.invalidated,
                other => {
                    // Superseded by a newer fetch.
                    entry.in_flight = other;
                    return;
                }
            };

            match result {
                Ok(value) => {
                    let mut data = CachedData::new(value.clone());
                    data.invalidated = invalidated;
                    entry.data = Some(data);
                    true
                }
                Err(_) => {
                    tracing::warn!(%key, "query failed");
                    if entry.data.is_none() {
                        inner.entries.remove(key);
                    }
                    false
                }
            }
        };

        if updated {
            self.notify(key, QueryEvent::Updated);
        }
    }

    fn mark_stale(&self, key: &QueryKey) {
        let mut inner = self.inner.borrow_mut();
        if let Some(data) =
            inner.entries.get_mut(key).and_then(|e| e.data.as_mut())
        {
            data.invalidated = true;
        }
    }

    fn notify(&self, key: &QueryKey, event: QueryEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .get(key)
            .map(|listeners| {
                listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
            })
            .unwrap_or_default();
        for listener in listeners {
            listener(event);
        }
    }
}

/// Keeps a listener registered with a [`QueryClient`]. Dropping it
/// unsubscribes.
pub struct Subscription {
    client: Weak<RefCell<Inner>>,
    key: QueryKey,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.client.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            tracing::warn!(
                key = %self.key,
                "query client busy, listener left registered"
            );
            return;
        };
        if let Some(listeners) = inner.listeners.get_mut(&self.key) {
            listeners.retain(|(id, _)| *id != self.id);
            if listeners.is_empty() {
                inner.listeners.remove(&self.key);
            }
        }
    }
}
