//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit and integration
//! tests. All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls. Clones share the same recordings.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{ChatPrompt, PageText, UserContent};
use crate::traits::{Fetcher, LlmClient, TextExtractor};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a fixed HTML string.
#[derive(Clone)]
pub struct MockFetcher {
    html: String,
    /// Returned (once) instead of the HTML when set.
    error: Arc<Mutex<Option<AppError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            html: String::new(),
            error: Arc::new(Mutex::new(Some(error))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs passed to `fetch`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.html.clone())
    }
}

// ---------------------------------------------------------------------------
// MockTextExtractor
// ---------------------------------------------------------------------------

/// Mock extractor returning configurable page text.
#[derive(Clone)]
pub struct MockTextExtractor {
    /// `None` means "put the raw HTML in the body".
    text: Option<PageText>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockTextExtractor {
    pub fn new(text: PageText) -> Self {
        Self {
            text: Some(text),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the input HTML unchanged as the body text.
    pub fn passthrough() -> Self {
        Self {
            text: None,
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            text: None,
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl TextExtractor for MockTextExtractor {
    fn extract(&self, html: &str) -> Result<PageText, AppError> {
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self
            .text
            .clone()
            .unwrap_or_else(|| PageText::new("", html)))
    }
}

// ---------------------------------------------------------------------------
// MockLlm
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Reply {
    Fixed(String),
    Echo,
}

/// Mock LLM client that records every prompt it receives.
#[derive(Clone)]
pub struct MockLlm {
    reply: Reply,
    error: Arc<Mutex<Option<AppError>>>,
    prompts: Arc<Mutex<Vec<ChatPrompt>>>,
}

impl MockLlm {
    /// Always answers with `response`, untouched.
    pub fn new(response: &str) -> Self {
        Self::build(Reply::Fixed(response.to_string()), None)
    }

    /// Answers with the user text, or the image URL for image prompts.
    pub fn echo() -> Self {
        Self::build(Reply::Echo, None)
    }

    /// Fails the first call with `error`, then echoes.
    pub fn with_error(error: AppError) -> Self {
        Self::build(Reply::Echo, Some(error))
    }

    fn build(reply: Reply, error: Option<AppError>) -> Self {
        Self {
            reply,
            error: Arc::new(Mutex::new(error)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(match &self.reply {
            Reply::Fixed(text) => text.clone(),
            Reply::Echo => match &prompt.user {
                UserContent::Text(text) => text.clone(),
                UserContent::TextAndImage { image_url, .. } => image_url.clone(),
            },
        })
    }
}
