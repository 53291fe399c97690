use reqwest::Client;
use serde::{Deserialize, Serialize};
use sightline_core::error::AppError;
use sightline_core::models::{ChatPrompt, UserContent};
use sightline_core::traits::LlmClient;

use crate::config::LlmConfig;

/// OpenAI-compatible chat-completion client.
///
/// Works with any OpenAI-compatible API that accepts image parts, including:
/// - OpenAI directly (`https://api.openai.com/v1`)
/// - Gemini via compatibility layer (`https://generativelanguage.googleapis.com/v1beta/openai`)
///
/// One request per call, never streamed, never retried.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout.as_secs(),
        })
    }
}

// ---- OpenAI API types ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, prompt: &'a ChatPrompt) -> Self {
        let user = match &prompt.user {
            UserContent::Text(text) => MessageContent::Text(text),
            UserContent::TextAndImage { text, image_url } => MessageContent::Parts(vec![
                ContentPart::Text { text },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: image_url },
                },
            ]),
        };

        Self {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(&prompt.system),
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: prompt.temperature,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Turn a non-2xx provider response into a provider error.
fn provider_error(status_code: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {status_code}: {body}"));

    AppError::LlmProvider {
        message,
        status_code: Some(status_code),
    }
}

impl LlmClient for OpenAiClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::llm("No API key configured (set OPENAI_API_KEY)"))?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest::new(&self.model, prompt);

        tracing::debug!(model = %self.model, temperature = prompt.temperature, "Calling LLM");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::llm(format!("Request timed out after {} seconds", self.timeout_secs))
                } else if e.is_connect() {
                    AppError::llm(format!("Connection failed: {e}"))
                } else {
                    AppError::llm(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = provider_error(status.as_u16(), &body);
            tracing::warn!("LLM provider returned HTTP {}: {err}", status.as_u16());
            return Err(err);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::llm(format!("Failed to parse LLM response: {e}")))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| AppError::llm("Empty response from LLM"))
    }
}
