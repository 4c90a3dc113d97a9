mod credits;
mod profile;

use queries::{CreditsQuery, ProfileQuery, QueryClient, QueryKey};
use test_helpers::{mock, spawn_app};

#[tokio::test]
async fn profile_and_credits_are_cached_independently() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.mock_profile(mock::alice_profile(), 2).await;
    app.mock_credits(mock::credits(42), 1).await;

    let queries = QueryClient::default();
    let profile = ProfileQuery::new(app.client.clone());
    let credits = CreditsQuery::new(app.client.clone());

    queries.fetch_query(&profile).await?;
    queries.fetch_query(&credits).await?;

    // Invalidating everything under "me" leaves the credits entry fresh.
    queries.invalidate(&QueryKey::from(["me"]));
    queries.fetch_query(&profile).await?;
    queries.fetch_query(&credits).await?;

    assert_eq!(app.request_count("/me/profile-v1").await, 2);
    assert_eq!(app.request_count("/me/credits").await, 1);
    Ok(())
}
