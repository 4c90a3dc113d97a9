//! Cached, deduplicated queries against the backend.
//!
//! [`QueryClient`] owns the cache. A [`Query`] names a cache key and knows
//! how to fetch the data behind it; [`ProfileQuery`] and [`CreditsQuery`]
//! are the account queries the client uses.

mod client;
mod key;
pub mod me;

pub use client::{
    QueryClient, QueryEvent, QueryOptions, QueryResult, Subscription,
};
pub use key::QueryKey;
pub use me::{CreditsQuery, ProfileQuery};

use futures::future::LocalBoxFuture;

/// A cacheable read: a key identifying the result, and the fetch that
/// produces it.
pub trait Query: 'static {
    type Data: Clone + 'static;
    type Error: 'static;

    fn key(&self) -> QueryKey;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<Self::Data, Self::Error>>;
}
