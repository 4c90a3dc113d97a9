pub mod mock;

use std::borrow::Borrow;

use payloads::{APIClient, ClientError};
use reqwest::StatusCode;
use serde_json::Value;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub server: MockServer,
    pub client: APIClient,
}

/// Mocked backend routes
impl TestApp {
    /// Serve `body` from `GET route`, expecting exactly `times` requests by
    /// the time the app is dropped.
    pub async fn mock_get(&self, route: &str, body: Value, times: u64) {
        let response = ResponseTemplate::new(200).set_body_json(body);
        self.mock_get_with(route, response, times).await;
    }

    pub async fn mock_get_with(
        &self,
        route: &str,
        response: ResponseTemplate,
        times: u64,
    ) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_profile(&self, body: Value, times: u64) {
        self.mock_get("/me/profile-v1", body, times).await;
    }

    pub async fn mock_credits(&self, body: Value, times: u64) {
        self.mock_get("/me/credits", body, times).await;
    }

    /// Number of requests the backend has seen for `route`.
    pub async fn request_count(&self, route: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == route)
            .count()
    }
}

fn init_logging() {
    let env_filter = if std::env::var("TEST_LOG").is_ok() {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("error")
    };
    let stderr = fmt::Layer::new().with_writer(std::io::stderr).pretty();
    let _ = LogTracer::init();
    let _ = Registry::default().with(env_filter).with(stderr).try_init();
}

/// Start a mock backend on an OS-assigned port and an API client for it.
pub async fn spawn_app() -> TestApp {
    init_logging();

    let server = MockServer::start().await;
    let client = APIClient {
        address: server.uri(),
        inner_client: reqwest::Client::new(),
    };

    TestApp { server, client }
}

/// An API client pointed at a port nothing listens on, so every request
/// fails at the network level.
pub fn unreachable_client() -> anyhow::Result<APIClient> {
    init_logging();

    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);

    Ok(APIClient {
        address: format!("http://127.0.0.1:{port}"),
        inner_client: reqwest::Client::new(),
    })
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T, E: Borrow<ClientError>>(
    result: Result<T, E>,
    expected: StatusCode,
) {
    match result {
        Err(e) => match Borrow::<ClientError>::borrow(&e) {
            ClientError::APIError(code, _) => assert_eq!(*code, expected),
            other => panic!("Expected APIError, got {other}"),
        },
        Ok(_) => panic!("Expected APIError"),
    };
}
