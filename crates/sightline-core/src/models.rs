/// Plain text pulled out of a rendered page.
///
/// Either section is an empty string when the document lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PageText {
    pub head: String,
    pub body: String,
}

impl PageText {
    pub fn new(head: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
        }
    }

    /// The user message sent to the model when summarizing.
    pub fn user_message(&self) -> String {
        format!("Head: {}\nBody: {}", self.head, self.body)
    }
}

/// User-side content of a chat request.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserContent {
    /// Plain text message.
    Text(String),
    /// Instruction text followed by an image reference.
    TextAndImage { text: String, image_url: String },
}

/// A complete, provider-agnostic chat-completion request.
///
/// The model identifier is not part of the prompt; it belongs to the
/// client's configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChatPrompt {
    pub system: String,
    pub user: UserContent,
    pub temperature: f32,
}
