use std::path::PathBuf;
use std::time::Duration;

use sightline_core::AppError;
use url::Url;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_BROWSER_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` is allowed at startup; every call then fails with a provider error.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }
}

impl LlmConfig {
    /// Read configuration from environment variables.
    ///
    /// - `OPENAI_API_KEY` (optional)
    /// - `SIGHTLINE_MODEL` (optional, defaults to `gpt-4o-mini`)
    /// - `SIGHTLINE_BASE_URL` (optional, defaults to the OpenAI API)
    /// - `SIGHTLINE_LLM_TIMEOUT_SECS` (optional, defaults to 120)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty());
        let model = lookup("SIGHTLINE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup("SIGHTLINE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url("SIGHTLINE_BASE_URL", &base_url)?;

        let timeout = parse_secs(&lookup, "SIGHTLINE_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT)?;

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout,
        })
    }
}

/// Check that an LLM base URL parses and uses http or https.
///
/// `source` names where the value came from (env var or CLI flag) for the error message.
pub fn validate_base_url(source: &str, base_url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| AppError::Config(format!("Invalid {source} '{base_url}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "{source} must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(())
}

/// Configuration for the headless browser used by the page fetcher.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Explicit Chrome/Chromium binary; discovered automatically when `None`.
    pub chrome_bin: Option<PathBuf>,
    /// Upper bound on launch-to-HTML for a single page.
    pub timeout: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_bin: None,
            timeout: DEFAULT_BROWSER_TIMEOUT,
        }
    }
}

impl BrowserSettings {
    /// Read configuration from environment variables.
    ///
    /// - `CHROME_BIN` (optional)
    /// - `SIGHTLINE_BROWSER_TIMEOUT_SECS` (optional, defaults to 30)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let chrome_bin = lookup("CHROME_BIN")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let timeout = parse_secs(&lookup, "SIGHTLINE_BROWSER_TIMEOUT_SECS", DEFAULT_BROWSER_TIMEOUT)?;

        Ok(Self {
            chrome_bin,
            timeout,
        })
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => {
            let parsed: u64 = raw.parse().map_err(|_| {
                AppError::Config(format!(
                    "Invalid {key} '{raw}': must be a positive integer"
                ))
            })?;
            if parsed == 0 {
                return Err(AppError::Config(format!("{key} must be at least 1")));
            }
            Ok(Duration::from_secs(parsed))
        }
    }
}
