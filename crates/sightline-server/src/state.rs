use sightline_client::{ChromiumFetcher, OpenAiClient, ScraperTextExtractor};
use sightline_core::traits::{Fetcher, LlmClient, TextExtractor};
use sightline_core::{AltTextService, SummaryService};

/// Shared application state, available to all route handlers via `State<Arc<AppState<..>>>`.
pub struct AppState<F, C, L>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    pub alt_text: AltTextService<L>,
    pub summary: SummaryService<F, C, L>,
}

impl<F, C, L> AppState<F, C, L>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    pub fn new(fetcher: F, extractor: C, llm: L) -> Self {
        Self {
            alt_text: AltTextService::new(llm.clone()),
            summary: SummaryService::new(fetcher, extractor, llm),
        }
    }
}

/// State wired to headless Chromium and an OpenAI-compatible provider.
pub type ProductionState = AppState<ChromiumFetcher, ScraperTextExtractor, OpenAiClient>;
