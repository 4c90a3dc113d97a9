use jiff::SignedDuration;
use payloads::APIClient;
use queries::{QueryClient, QueryOptions};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod hooks;
mod logs;

use components::AccountSummary;

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            // Fallback to same origin
            web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_else(|| {
                    tracing::warn!("No BACKEND_URL and no window origin");
                    String::new()
                })
        });

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

thread_local! {
    static QUERY_CLIENT: QueryClient = QueryClient::new(query_options());
}

/// The query cache shared by every hook in the app.
pub fn get_query_client() -> QueryClient {
    QUERY_CLIENT.with(QueryClient::clone)
}

/// Cached data stays fresh until invalidated unless `QUERY_STALE_SECS` is
/// set at build time.
fn query_options() -> QueryOptions {
    let stale_time = option_env!("QUERY_STALE_SECS").and_then(|secs| {
        match secs.parse::<i64>() {
            Ok(secs) => Some(SignedDuration::from_secs(secs)),
            Err(e) => {
                tracing::warn!("Ignoring QUERY_STALE_SECS={secs}: {e}");
                None
            }
        }
    });
    QueryOptions { stale_time }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <AccountSummary />
            </main>
        },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                    <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
                </div>
            </main>
        },
    }
}
