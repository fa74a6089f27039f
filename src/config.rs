use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1:free";
pub const DEFAULT_WIDGET_URL: &str = "https://cdn.botpress.cloud/webchat/v3.0/shareable.html";
pub const DEFAULT_WIDGET_CONFIG_URL: &str =
    "https://files.bpcontent.cloud/2025/07/02/02/20250702020605-VDMFG1YB.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub cache_ttl: Duration,
    pub coach: CoachConfig,
    pub chat_widget: ChatWidgetConfig,
}

/// Credential and endpoint for the chat-completion API.
#[derive(Clone)]
pub struct CoachConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl std::fmt::Debug for CoachConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

impl CoachConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatWidgetConfig {
    pub base_url: String,
    pub config_url: String,
}

impl Default for ChatWidgetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WIDGET_URL.to_string(),
            config_url: DEFAULT_WIDGET_CONFIG_URL.to_string(),
        }
    }
}

impl ChatWidgetConfig {
    pub fn session_url(&self, user_id: &str) -> String {
        format!(
            "{}?configUrl={}&userId={}",
            self.base_url, self.config_url, user_id
        )
    }
}

impl Config {
    /// Defaults for everything but the coach credential.
    pub fn new(coach: CoachConfig) -> Self {
        Self {
            port: 3000,
            max_file_size: 25 * 1024 * 1024,
            cache_ttl: Duration::from_secs(3600),
            coach,
            chat_widget: ChatWidgetConfig::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb: usize = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let cache_ttl_seconds = std::env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingVar("OPENROUTER_API_KEY"))?;

        let coach = CoachConfig {
            api_key,
            api_url: std::env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: std::env::var("COACH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        };

        let chat_widget = ChatWidgetConfig {
            base_url: std::env::var("CHAT_WIDGET_URL")
                .unwrap_or_else(|_| DEFAULT_WIDGET_URL.to_string()),
            config_url: std::env::var("CHAT_WIDGET_CONFIG_URL")
                .unwrap_or_else(|_| DEFAULT_WIDGET_CONFIG_URL.to_string()),
        };

        Ok(Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            cache_ttl: Duration::from_secs(cache_ttl_seconds),
            coach,
            chat_widget,
        })
    }
}
