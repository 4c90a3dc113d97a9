use payloads::{ClientError, Person};
use queries::ProfileQuery;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{QueryHookReturn, use_query};

/// Hook to read the signed-in person's profile.
///
/// Cached under `["me", "profile-v1"]`, fetched from `/me/profile-v1`.
#[hook]
pub fn use_profile() -> QueryHookReturn<Person, ClientError> {
    use_query(ProfileQuery::new(get_api_client()))
}
