//! Queries about the signed-in person.

use futures::future::{FutureExt, LocalBoxFuture};
use payloads::{APIClient, ClientError, CreditBalance, Person};

use crate::{Query, QueryKey};

/// The signed-in person's profile, cached under `["me", "profile-v1"]`.
#[derive(Clone)]
pub struct ProfileQuery {
    api: APIClient,
}

impl ProfileQuery {
    pub fn new(api: APIClient) -> Self {
        Self { api }
    }

    pub fn cache_key() -> QueryKey {
        QueryKey::from(["me", "profile-v1"])
    }
}

impl Query for ProfileQuery {
    type Data = Person;
    type Error = ClientError;

    fn key(&self) -> QueryKey {
        Self::cache_key()
    }

    fn fetch(&self) -> LocalBoxFuture<'static, Result<Person, ClientError>> {
        let api = self.api.clone();
        async move { api.get_profile().await }.boxed_local()
    }
}

/// The signed-in person's credit balance, cached under `["credits"]`.
#[derive(Clone)]
pub struct CreditsQuery {
    api: APIClient,
}

impl CreditsQuery {
    pub fn new(api: APIClient) -> Self {
        Self { api }
    }

    pub fn cache_key() -> QueryKey {
        QueryKey::from(["credits"])
    }
}

impl Query for CreditsQuery {
    type Data = CreditBalance;
    type Error = ClientError;

    fn key(&self) -> QueryKey {
        Self::cache_key()
    }

    fn fetch(
        &self,
    ) -> LocalBoxFuture<'static, Result<CreditBalance, ClientError>> {
        let api = self.api.clone();
        async move { api.get_credits().await }.boxed_local()
    }
}
