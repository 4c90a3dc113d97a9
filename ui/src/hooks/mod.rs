pub mod query_state;
pub mod use_credits;
pub mod use_profile;
pub mod use_query;

pub use use_credits::use_credits;
pub use use_profile::use_profile;
pub use use_query::{QueryHookReturn, use_query};

/// Distinguishes "not fetched yet" from fetched data, so a fetched empty
/// value is not mistaken for a pending load.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::NotFetched => None,
        }
    }
}
