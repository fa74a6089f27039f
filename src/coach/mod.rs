//! Coaching commentary from a remote chat-completion API.
//!
//! Both the automatic commentary on upload and free-text questions go through
//! [`Coach::request`]. Remote failures never escape this module: they come
//! back as [`Commentary::Failed`] with a call-site specific prefix.

pub mod client;
pub mod prompt;

use serde::{Deserialize, Serialize};

use crate::config::CoachConfig;
use crate::error::CoachError;
use crate::types::log::FitnessLog;

use self::client::ChatClient;

/// How many trailing records are sent along with a question.
pub const RECENT_RECORDS: usize = 5;

pub const COMMENTARY_ERROR_PREFIX: &str = "❌ AI error";
pub const ANSWER_ERROR_PREFIX: &str = "AI error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Commentary {
    Succeeded { text: String },
    Failed { message: String },
}

impl Commentary {
    fn from_result(result: Result<String, CoachError>, error_prefix: &str) -> Self {
        match result {
            Ok(text) => Commentary::Succeeded { text },
            Err(e) => {
                tracing::warn!("Chat completion failed: {}", e);
                Commentary::Failed {
                    message: format!("{}: {}", error_prefix, e),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Commentary::Succeeded { .. })
    }
}

#[derive(Clone)]
pub struct Coach {
    client: ChatClient,
    model: String,
}

impl Coach {
    pub fn new(config: &CoachConfig) -> Self {
        Self {
            client: ChatClient::new(config),
            model: config.model.clone(),
        }
    }

    /// Trainer-style analysis of the latest record.
    pub async fn commentary(&self, log: &FitnessLog) -> Commentary {
        let prompt = prompt::commentary_prompt(log.latest());
        Commentary::from_result(self.request(&prompt).await, COMMENTARY_ERROR_PREFIX)
    }

    /// Answers `question` with the most recent records attached as context.
    pub async fn answer(&self, question: &str, log: &FitnessLog) -> Commentary {
        let prompt = prompt::question_prompt(question, log.recent(RECENT_RECORDS));
        Commentary::from_result(self.request(&prompt).await, ANSWER_ERROR_PREFIX)
    }

    pub async fn request(&self, prompt: &str) -> Result<String, CoachError> {
        self.client.complete(prompt, &self.model).await
    }
}
