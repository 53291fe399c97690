use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sightline API",
        version = "0.1.0",
        description = "Alt text for images and short summaries of web pages, for visually impaired users."
    ),
    paths(
        crate::routes::home,
        crate::routes::generate_alt_text,
        crate::routes::summarize_html,
    ),
    components(schemas(
        crate::dto::AltTextRequest,
        crate::dto::AltTextResponse,
        crate::dto::SummaryRequest,
        crate::dto::SummaryResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "accessibility", description = "Alt text generation and page summarization"),
        (name = "system", description = "Liveness"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_both_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/generate-alt-text"));
        assert!(doc.paths.paths.contains_key("/summarize-html"));
        assert!(doc.paths.paths.contains_key("/"));
    }
}
