use crate::error::AppError;
use crate::models::ChatPrompt;
use crate::traits::LlmClient;

pub const IMAGE_URL_REQUIRED: &str = "Image URL is required";

/// Produces accessibility alt text for an image URL.
pub struct AltTextService<L>
where
    L: LlmClient,
{
    llm: L,
}

impl<L> AltTextService<L>
where
    L: LlmClient,
{
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// Ask the model to describe the image at `image_url`.
    ///
    /// An empty URL fails validation before the model is contacted.
    pub async fn generate(&self, image_url: &str) -> Result<String, AppError> {
        if image_url.is_empty() {
            return Err(AppError::Validation(IMAGE_URL_REQUIRED.to_string()));
        }

        tracing::info!(image_url, "Generating alt text");
        let prompt = ChatPrompt::alt_text(image_url);
        let alt_text = self.llm.complete(&prompt).await?;
        tracing::info!("Generated {} chars of alt text", alt_text.chars().count());

        Ok(alt_text.trim().to_string())
    }
}
