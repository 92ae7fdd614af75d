use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::{Message, UsageMetadata};
use crate::sampling::SamplingArgs;

/// Result of a single chat-completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant text content.
    pub content: String,
    /// Token usage, when the API reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
}

/// Trait for chat-completion clients.
///
/// Implementations handle API communication, request formatting, and
/// response parsing for a specific provider. The model identifier is a
/// per-call argument: the eval runner owns model selection.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        messages: &[Message],
        sampling: &SamplingArgs,
    ) -> Result<ChatResponse>;
}

/// Ambient credential configuration for constructing a client.
///
/// Built once at startup from the process environment; a missing API key
/// is not an error here — the API rejects the first call instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

impl ClientConfig {
    /// Read `OPENAI_API_KEY` and `OPENAI_BASE_URL` from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
