use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sightline_core::traits::{Fetcher, LlmClient, TextExtractor};

use crate::dto::{AltTextRequest, AltTextResponse, SummaryRequest, SummaryResponse};
use crate::error::{ApiError, Operation};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
///
/// Cross-origin requests are allowed from anywhere.
pub fn router<F, C, L>(state: Arc<AppState<F, C, L>>) -> Router
where
    F: Fetcher + 'static,
    C: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    Router::new()
        .route("/", get(home))
        .route("/generate-alt-text", post(generate_alt_text::<F, C, L>))
        .route("/summarize-html", post(summarize_html::<F, C, L>))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Unwrap a JSON body, treating an unreadable one like an empty object.
///
/// The endpoints only check for their one required field, so a malformed
/// body ends up as the same "field is required" response.
fn body_or_default<T: Default>(payload: Result<axum::Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(axum::Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Ignoring unreadable request body: {rejection}");
            T::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain"),
    ),
    tag = "system"
)]
pub async fn home() -> &'static str {
    "Server is running!"
}

// ---------------------------------------------------------------------------
// Alt text
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/generate-alt-text",
    request_body = AltTextRequest,
    responses(
        (status = 200, description = "Generated alt text", body = AltTextResponse),
        (status = 400, description = "imageUrl missing or empty", body = crate::dto::ErrorResponse),
        (status = 500, description = "LLM provider failure", body = crate::dto::ErrorResponse),
    ),
    tag = "accessibility"
)]
pub async fn generate_alt_text<F, C, L>(
    State(state): State<Arc<AppState<F, C, L>>>,
    payload: Result<axum::Json<AltTextRequest>, JsonRejection>,
) -> Result<axum::Json<AltTextResponse>, ApiError>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    let body: AltTextRequest = body_or_default(payload);
    let image_url = body.image_url.unwrap_or_default();

    let alt_text = state
        .alt_text
        .generate(&image_url)
        .await
        .map_err(|e| ApiError::new(Operation::AltText, e))?;

    Ok(axum::Json(AltTextResponse { alt_text }))
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/summarize-html",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Page summary", body = SummaryResponse),
        (status = 400, description = "url missing or empty", body = crate::dto::ErrorResponse),
        (status = 500, description = "Rendering, provider, or unexpected failure", body = crate::dto::ErrorResponse),
    ),
    tag = "accessibility"
)]
pub async fn summarize_html<F, C, L>(
    State(state): State<Arc<AppState<F, C, L>>>,
    payload: Result<axum::Json<SummaryRequest>, JsonRejection>,
) -> Result<axum::Json<SummaryResponse>, ApiError>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    let body: SummaryRequest = body_or_default(payload);
    let url = body.url.unwrap_or_default();

    let summary = state
        .summary
        .summarize(&url)
        .await
        .map_err(|e| ApiError::new(Operation::Summary, e))?;

    Ok(axum::Json(SummaryResponse { summary }))
}
