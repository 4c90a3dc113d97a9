use std::time::Duration;

use queries::{ProfileQuery, Query, QueryClient, QueryEvent};
use reqwest::StatusCode;
use std::cell::RefCell;
use std::rc::Rc;
use test_helpers::{assert_status_code, mock, spawn_app};
use wiremock::ResponseTemplate;

#[tokio::test]
async fn profile_is_fetched_once_per_cache_lifetime() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.mock_profile(mock::alice_profile(), 1).await;

    let queries = QueryClient::default();
    let query = ProfileQuery::new(app.client.clone());

    let first = queries.fetch_query(&query).await?;
    let second = queries.fetch_query(&query).await?;

    assert_eq!(first.id, mock::ALICE_ID);
    assert_eq!(first.name(), "Alice");
    assert_eq!(
        first.extra.get("avatar_url"),
        Some(&serde_json::json!("https://example.com/alice.png"))
    );
    assert_eq!(first, second);
    assert_eq!(app.request_count("/me/profile-v1").await, 1);
    Ok(())
}

#[tokio::test]
async fn simultaneous_profile_reads_share_one_request() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let response = ResponseTemplate::new(200)
        .set_body_json(mock::alice_profile())
        .set_delay(Duration::from_millis(100));
    app.mock_get_with("/me/profile-v1", response, 1).await;

    let queries = QueryClient::default();
    let first_mount = ProfileQuery::new(app.client.clone());
    let second_mount = ProfileQuery::new(app.client.clone());

    let (first, second) = futures::join!(
        queries.fetch_query(&first_mount),
        queries.fetch_query(&second_mount),
    );

    assert_eq!(first?, second?);
    assert_eq!(app.request_count("/me/profile-v1").await, 1);
    Ok(())
}

#[tokio::test]
async fn refetch_replaces_cached_profile() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.mock_profile(mock::alice_profile(), 2).await;

    let queries = QueryClient::default();
    let query = ProfileQuery::new(app.client.clone());

    let updates = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let updates = updates.clone();
        queries.subscribe(query.key(), move |event| {
            updates.borrow_mut().push(event)
        })
    };

    queries.fetch_query(&query).await?;
    queries.refetch_query(&query).await?;

    assert_eq!(
        *updates.borrow(),
        vec![QueryEvent::Updated, QueryEvent::Updated]
    );
    assert_eq!(app.request_count("/me/profile-v1").await, 2);
    Ok(())
}

#[tokio::test]
async fn unauthorized_profile_surfaces_status() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let response =
        ResponseTemplate::new(401).set_body_string("Not logged in");
    app.mock_get_with("/me/profile-v1", response, 1).await;

    let queries = QueryClient::default();
    let query = ProfileQuery::new(app.client.clone());

    let result = queries.fetch_query(&query).await;
    if let Err(e) = &result {
        assert_eq!(e.to_string(), "Not logged in");
    }
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    assert!(queries.get_query_data::<payloads::Person>(&query.key()).is_none());
    Ok(())
}
