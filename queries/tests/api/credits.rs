use payloads::{ClientError, CreditBalance};
use queries::{CreditsQuery, Query, QueryClient};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use test_helpers::{
    assert_status_code, mock, spawn_app, unreachable_client,
};
use wiremock::ResponseTemplate;

#[tokio::test]
async fn credits_balance_is_parsed() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.mock_credits(mock::credits(42), 1).await;

    let queries = QueryClient::default();
    let query = CreditsQuery::new(app.client.clone());

    let credits = queries.fetch_query(&query).await?;
    assert_eq!(credits.balance, Decimal::from(42));
    assert_eq!(
        queries.get_query_data::<CreditBalance>(&CreditsQuery::cache_key()),
        Some(credits)
    );
    Ok(())
}

#[tokio::test]
async fn network_failure_leaves_no_data() -> anyhow::Result<()> {
    let queries = QueryClient::default();
    let query = CreditsQuery::new(unreachable_client()?);

    let result = queries.fetch_query(&query).await;

    let Err(error) = result else {
        panic!("expected a network error");
    };
    assert!(matches!(*error, ClientError::Network(_)));
    assert!(queries.get_query_data::<CreditBalance>(&query.key()).is_none());
    assert!(!queries.is_fetching(&query.key()));
    Ok(())
}

#[tokio::test]
async fn failed_credits_are_retried_on_next_read() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let response =
        ResponseTemplate::new(500).set_body_string("Internal error");
    app.mock_get_with("/me/credits", response, 2).await;

    let queries = QueryClient::default();
    let query = CreditsQuery::new(app.client.clone());

    assert_status_code(
        queries.fetch_query(&query).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    assert_status_code(
        queries.fetch_query(&query).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    assert_eq!(app.request_count("/me/credits").await, 2);
    Ok(())
}

#[tokio::test]
async fn malformed_credits_body_is_an_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.mock_credits(serde_json::json!({ "credits": 42 }), 1).await;

    let queries = QueryClient::default();
    let query = CreditsQuery::new(app.client.clone());

    let result = queries.fetch_query(&query).await;
    assert!(result.is_err());
    assert!(queries.get_query_data::<CreditBalance>(&query.key()).is_none());
    Ok(())
}
