//! Wire types for the GigaChat OAuth and chat-completion endpoints.

use serde::{Deserialize, Serialize};

/// Response of the OAuth client-credentials exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    /// Absolute expiry in epoch milliseconds, when the service provides it.
    pub expires_at: Option<i64>,
    /// Relative lifetime in seconds, used when `expires_at` is absent.
    pub expires_in: Option<i64>,
}

/// Chat-completion request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
}

/// `response_format` object forcing strict-JSON output.
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object",
        }
    }
}

/// One message of the completion conversation.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Chat-completion response envelope. Only the first choice's message
/// content is consumed.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}
