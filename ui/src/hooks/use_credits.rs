use payloads::{ClientError, CreditBalance};
use queries::CreditsQuery;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{QueryHookReturn, use_query};

/// Hook to read the signed-in person's credit balance.
#[hook]
pub fn use_credits() -> QueryHookReturn<CreditBalance, ClientError> {
    use_query(CreditsQuery::new(get_api_client()))
}
