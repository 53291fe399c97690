//! Fixed instructions and sampling settings for the two relay operations.

use crate::models::{ChatPrompt, PageText, UserContent};

/// Alt text must be reproducible for the same image.
pub const ALT_TEXT_TEMPERATURE: f32 = 0.0;

/// Summaries may vary in wording between calls.
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

pub const ALT_TEXT_SYSTEM_PROMPT: &str = "You write alt text for images so that visually impaired users can understand them through a screen reader. Be detailed about what matters but never verbose. Always answer in Korean. When the image contains tables or lists of specifications such as sizes or measurements, do not read the values in the order they appear; rewrite them as natural explanatory sentences that are easy to follow by ear.";

pub const ALT_TEXT_USER_PROMPT: &str = "\
시각장애인 사용자를 위해 아래 이미지를 분석하고, 핵심 정보만 골라 듣기 쉬운 대체 텍스트로 설명해 주세요.
이미지 안에 글자가 있다면 중요한 내용은 모두 포함하되, 음성으로 들었을 때 바로 이해할 수 있는 문장으로 바꿔 주세요.
예를 들어 사이즈표가 S, M, L 과 어깨너비 30, 40, 50 처럼 나열되어 있다면 값을 그대로 읽지 말고 \"S 사이즈는 어깨너비 30\", \"M 사이즈는 어깨너비 40\" 처럼 사이즈별로 풀어서 설명해 주세요.
글자가 없는 사진이라면 장면을 최대한 구체적으로 묘사하되 답변이 지나치게 길어지지 않게 해 주세요.
반드시 한국어로 답해 주세요.";

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "Summarize the following web page content into 2-3 concise sentences. 반드시 한국어로 답해 주세요.";

impl ChatPrompt {
    /// Prompt asking the model to describe the image at `image_url`.
    pub fn alt_text(image_url: &str) -> Self {
        Self {
            system: ALT_TEXT_SYSTEM_PROMPT.to_string(),
            user: UserContent::TextAndImage {
                text: ALT_TEXT_USER_PROMPT.to_string(),
                image_url: image_url.to_string(),
            },
            temperature: ALT_TEXT_TEMPERATURE,
        }
    }

    /// Prompt asking the model to summarize extracted page text.
    pub fn summary(text: &PageText) -> Self {
        Self {
            system: SUMMARY_SYSTEM_PROMPT.to_string(),
            user: UserContent::Text(text.user_message()),
            temperature: SUMMARY_TEMPERATURE,
        }
    }
}
