//! Minimal OpenAI-style chat-completion client.
//!
//! Sends one user message and returns the first choice's content. No
//! retries, no streaming, no timeout beyond reqwest's defaults.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::CoachConfig;
use crate::error::CoachError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: &CoachConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Sends `prompt` as a single user message to `model` and returns the reply text.
    pub async fn complete(&self, prompt: &str, model: &str) -> Result<String, CoachError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("Sending chat completion request ({} prompt chars, model {})", prompt.len(), model);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CoachError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoachError::Request(e.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CoachError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| CoachError::Parse(e.to_string()))?;

        let choice = parsed.choices.into_iter().next().ok_or(CoachError::NoChoices)?;

        tracing::debug!("Received chat completion: {} chars", choice.message.content.len());

        Ok(choice.message.content)
    }
}
