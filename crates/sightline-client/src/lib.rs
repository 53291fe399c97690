pub mod browser_fetcher;
pub mod config;
pub mod llm;
pub mod text;

pub use browser_fetcher::{BrowserLauncher, BrowserSession, ChromiumFetcher, ChromiumLauncher};
pub use config::{BrowserSettings, LlmConfig};
pub use llm::OpenAiClient;
pub use text::ScraperTextExtractor;
