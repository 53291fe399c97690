use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;

use sightline_client::ScraperTextExtractor;
use sightline_core::testutil::{MockFetcher, MockLlm};
use sightline_server::routes;
use sightline_server::state::AppState;

pub const SAMPLE_PAGE: &str = "<html><head><title>Daily Brief</title></head>\
    <body><h1>Rain expected</h1><p>Bring an umbrella.</p></body></html>";

/// Router wired to mocks, plus handles for asserting on calls.
pub struct TestApp {
    pub router: Router,
    pub fetcher: MockFetcher,
    pub llm: MockLlm,
}

/// Build the app around a mock fetcher and mock LLM, with the real text extractor.
pub fn setup_test_app(fetcher: MockFetcher, llm: MockLlm) -> TestApp {
    let state = Arc::new(AppState::new(
        fetcher.clone(),
        ScraperTextExtractor::new(),
        llm.clone(),
    ));

    TestApp {
        router: routes::router(state),
        fetcher,
        llm,
    }
}

pub fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
