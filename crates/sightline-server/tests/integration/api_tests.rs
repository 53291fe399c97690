use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sightline_core::AppError;
use sightline_core::UserContent;
use sightline_core::testutil::{MockFetcher, MockLlm};

use crate::integration::common::{SAMPLE_PAGE, body_json, json_post, setup_test_app};

#[tokio::test]
async fn root_reports_running() {
    let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());

    let response = app
        .router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Server is running!");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());

    let response = app
        .router
        .oneshot(
            Request::get("/")
                .header("origin", "https://shop.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

// ---------------------------------------------------------------------------
// /generate-alt-text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn alt_text_missing_image_url_returns_400() {
    for body in [
        serde_json::json!({}),
        serde_json::json!({"imageUrl": ""}),
        serde_json::json!({"imageUrl": null}),
    ] {
        let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());

        let response = app
            .router
            .oneshot(json_post("/generate-alt-text", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Image URL is required"})
        );
        assert_eq!(app.llm.call_count(), 0);
    }
}

#[tokio::test]
async fn alt_text_malformed_body_returns_400() {
    let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());

    let response = app
        .router
        .oneshot(
            Request::post("/generate-alt-text")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Image URL is required");
    assert_eq!(app.llm.call_count(), 0);
}

#[tokio::test]
async fn alt_text_success_is_trimmed() {
    let app = setup_test_app(
        MockFetcher::new(SAMPLE_PAGE),
        MockLlm::new("\n  빨간 우산을 든 사람이 비 오는 거리를 걷고 있습니다.  \n"),
    );

    let response = app
        .router
        .oneshot(json_post(
            "/generate-alt-text",
            &serde_json::json!({"imageUrl": "https://cdn.example/umbrella.jpg"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"altText": "빨간 우산을 든 사람이 비 오는 거리를 걷고 있습니다."})
    );

    let prompts = app.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].temperature, 0.0);
    assert!(matches!(
        &prompts[0].user,
        UserContent::TextAndImage { image_url, .. } if image_url == "https://cdn.example/umbrella.jpg"
    ));
    assert_eq!(app.fetcher.call_count(), 0);
}

#[tokio::test]
async fn alt_text_provider_error_returns_500_with_details() {
    let app = setup_test_app(
        MockFetcher::new(SAMPLE_PAGE),
        MockLlm::with_error(AppError::llm("Incorrect API key provided")),
    );

    let response = app
        .router
        .oneshot(json_post(
            "/generate-alt-text",
            &serde_json::json!({"imageUrl": "https://cdn.example/a.png"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "error": "Failed to generate alt text",
            "details": "Incorrect API key provided"
        })
    );
}

// ---------------------------------------------------------------------------
// /summarize-html
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summarize_missing_url_returns_400() {
    for body in [serde_json::json!({}), serde_json::json!({"url": ""})] {
        let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());

        let response = app
            .router
            .oneshot(json_post("/summarize-html", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "URL is required"})
        );
        assert_eq!(app.fetcher.call_count(), 0);
        assert_eq!(app.llm.call_count(), 0);
    }
}

#[tokio::test]
async fn summarize_fetch_failure_skips_llm() {
    let app = setup_test_app(
        MockFetcher::with_error(AppError::Fetch("net::ERR_CONNECTION_REFUSED".into())),
        MockLlm::echo(),
    );

    let response = app
        .router
        .oneshot(json_post(
            "/summarize-html",
            &serde_json::json!({"url": "https://down.example"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Failed to retrieve HTML content"})
    );
    assert_eq!(app.fetcher.calls(), vec!["https://down.example".to_string()]);
    assert_eq!(app.llm.call_count(), 0);
}

#[tokio::test]
async fn summarize_success_sends_head_and_body() {
    let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::new(" 비 소식 요약. "));

    let response = app
        .router
        .oneshot(json_post(
            "/summarize-html",
            &serde_json::json!({"url": "https://news.example/today"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"summary": "비 소식 요약."})
    );

    let prompts = app.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].temperature, 0.7);
    assert_eq!(
        prompts[0].user,
        UserContent::Text("Head: Daily Brief\nBody: Rain expected Bring an umbrella.".into())
    );
}

#[tokio::test]
async fn summarize_empty_document_sends_empty_sections() {
    let app = setup_test_app(MockFetcher::new("<html></html>"), MockLlm::echo());

    let response = app
        .router
        .oneshot(json_post(
            "/summarize-html",
            &serde_json::json!({"url": "https://blank.example"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        app.llm.prompts()[0].user,
        UserContent::Text("Head: \nBody: ".into())
    );
}

#[tokio::test]
async fn summarize_provider_error_returns_500_with_details() {
    let app = setup_test_app(
        MockFetcher::new(SAMPLE_PAGE),
        MockLlm::with_error(AppError::llm("rate limited")),
    );

    let response = app
        .router
        .oneshot(json_post(
            "/summarize-html",
            &serde_json::json!({"url": "https://news.example/today"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Failed to summarize HTML", "details": "rate limited"})
    );
    assert_eq!(app.fetcher.call_count(), 1);
}

#[tokio::test]
async fn summarize_is_idempotent_with_deterministic_collaborators() {
    let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());
    let request = serde_json::json!({"url": "https://news.example/today"});

    let first = app
        .router
        .clone()
        .oneshot(json_post("/summarize-html", &request))
        .await
        .unwrap();
    let second = app
        .router
        .oneshot(json_post("/summarize-html", &request))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await, body_json(second).await);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app(MockFetcher::new(SAMPLE_PAGE), MockLlm::echo());

    let response = app
        .router
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/summarize-html"]["post"].is_object());
}
