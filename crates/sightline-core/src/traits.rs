use std::future::Future;

use crate::error::AppError;
use crate::models::{ChatPrompt, PageText};

/// Renders a URL and returns its final DOM as HTML.
///
/// Implementations must report every failure as [`AppError::Fetch`], so
/// callers only ever see "content" or "no content".
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Reduces raw HTML to the plain text of its head and body sections.
pub trait TextExtractor: Send + Sync + Clone {
    fn extract(&self, html: &str) -> Result<PageText, AppError>;
}

/// Sends a single chat-completion request to a hosted model.
pub trait LlmClient: Send + Sync + Clone {
    /// Returns the first generated choice, trimmed.
    ///
    /// Any provider-side failure is reported as [`AppError::LlmProvider`].
    fn complete(
        &self,
        prompt: &ChatPrompt,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}
