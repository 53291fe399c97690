pub mod alt_text;
pub mod error;
pub mod models;
pub mod prompt;
pub mod summarize;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
pub mod traits;

pub use alt_text::AltTextService;
pub use error::AppError;
pub use models::{ChatPrompt, PageText, UserContent};
pub use summarize::SummaryService;
pub use traits::{Fetcher, LlmClient, TextExtractor};
