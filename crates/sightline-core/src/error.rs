use thiserror::Error;

/// Application-wide error types for Sightline.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field is missing or empty.
    ///
    /// The message is returned to the client as-is.
    #[error("{0}")]
    Validation(String),

    /// The page could not be rendered, or rendering produced no content.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The LLM provider call failed (auth, rate limit, transport, bad payload).
    #[error("LLM provider error: {message}")]
    LlmProvider {
        message: String,
        status_code: Option<u16>,
    },

    /// HTML text extraction failed.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Shorthand for a provider failure without an HTTP status.
    pub fn llm(message: impl Into<String>) -> Self {
        AppError::LlmProvider {
            message: message.into(),
            status_code: None,
        }
    }

    /// Normalises any error into the "no content" fetch sentinel.
    pub fn into_fetch_error(self) -> Self {
        match self {
            AppError::Fetch(_) => self,
            other => AppError::Fetch(other.to_string()),
        }
    }
}
