use crate::error::AppError;
use crate::models::ChatPrompt;
use crate::traits::{Fetcher, LlmClient, TextExtractor};

pub const URL_REQUIRED: &str = "URL is required";

/// Orchestrates the summary pipeline: render → extract text → summarize.
///
/// Generic over all external dependencies via traits, so tests can swap in
/// mocks without a browser or an LLM provider.
pub struct SummaryService<F, C, L>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    fetcher: F,
    extractor: C,
    llm: L,
}

impl<F, C, L> SummaryService<F, C, L>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    pub fn new(fetcher: F, extractor: C, llm: L) -> Self {
        Self {
            fetcher,
            extractor,
            llm,
        }
    }

    /// Summarize the page at `url`.
    ///
    /// 1. Render the page (any failure is a [`AppError::Fetch`], the LLM is not called)
    /// 2. Extract head and body text
    /// 3. Ask the model for a short summary
    pub async fn summarize(&self, url: &str) -> Result<String, AppError> {
        if url.is_empty() {
            return Err(AppError::Validation(URL_REQUIRED.to_string()));
        }

        // 1. Fetch
        tracing::info!("Rendering {}", url);
        let html = self
            .fetcher
            .fetch(url)
            .await
            .map_err(AppError::into_fetch_error)?;
        tracing::info!("Rendered {} bytes of HTML", html.len());

        // 2. Extract
        let text = self.extractor.extract(&html)?;
        tracing::info!(
            head_bytes = text.head.len(),
            body_bytes = text.body.len(),
            "Extracted page text"
        );

        // 3. Summarize
        let prompt = ChatPrompt::summary(&text);
        let summary = self.llm.complete(&prompt).await?;

        Ok(summary.trim().to_string())
    }
}
