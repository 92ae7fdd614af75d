//! OpenAI Chat Completions API integration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use verdict_core::error::{ModelError, Result, VerdictError};
use verdict_core::message::{Message, UsageMetadata};
use verdict_core::sampling::SamplingArgs;
use verdict_core::{ChatClient, ChatResponse, ClientConfig};

// ---------------------------------------------------------------------------
// Chat Completions API wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// OpenAIClient
// ---------------------------------------------------------------------------

/// Chat-completion client for OpenAI-compatible APIs.
pub struct OpenAIClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Construct from ambient environment credentials.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Build the request body as a JSON object.
    ///
    /// Passthrough sampling keys are inserted before the typed
    /// `max_tokens` / `temperature` fields, so an explicitly set typed
    /// field always wins over a same-named passthrough key.
    pub fn build_request(model: &str, messages: &[Message], sampling: &SamplingArgs) -> Value {
        let api_messages: Vec<ApiMessage> = messages
            .iter()
            .map(|msg| ApiMessage {
                role: msg.role(),
                content: msg.content().to_string(),
            })
            .collect();

        let mut body = Map::new();
        body.insert("model".into(), json!(model));
        body.insert(
            "messages".into(),
            serde_json::to_value(api_messages).unwrap_or(Value::Array(Vec::new())),
        );
        for (key, value) in &sampling.extra {
            body.insert(key.clone(), value.clone());
        }
        if let Some(max_tokens) = sampling.max_tokens {
            body.insert("max_tokens".into(), json!(max_tokens));
        }
        if let Some(temperature) = sampling.temperature {
            body.insert("temperature".into(), json!(temperature));
        }
        Value::Object(body)
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn generate(
        &self,
        model: &str,
        messages: &[Message],
        sampling: &SamplingArgs,
    ) -> Result<ChatResponse> {
        let request_body = Self::build_request(model, messages, sampling);
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.as_deref().unwrap_or("")),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| VerdictError::Model(ModelError::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read response body".into());
            let error_msg = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(VerdictError::Model(match status.as_u16() {
                401 => ModelError::Auth(error_msg),
                429 => ModelError::RateLimited {
                    retry_after_secs: None,
                },
                _ => ModelError::ApiRequest(format!("HTTP {status}: {error_msg}")),
            }));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| VerdictError::Model(ModelError::InvalidResponse(e.to_string())))?;

        let content = api_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = api_response.usage.map(|u| UsageMetadata {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<Message> {
        vec![Message::system("be brief"), Message::user("guess a word")]
    }

    #[test]
    fn request_has_model_and_messages() {
        let body = OpenAIClient::build_request("gpt-4o-mini", &messages(), &SamplingArgs::default());
        assert_eq!(body["model"], json!("gpt-4o-mini"));
        assert_eq!(body["messages"][0]["role"], json!("system"));
        assert_eq!(body["messages"][1]["content"], json!("guess a word"));
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn request_carries_typed_sampling_fields() {
        let sampling = SamplingArgs {
            max_tokens: Some(128),
            temperature: Some(0.3),
            extra: Map::new(),
        };
        let body = OpenAIClient::build_request("gpt-4o-mini", &messages(), &sampling);
        assert_eq!(body["max_tokens"], json!(128));
        assert_eq!(body["temperature"], json!(0.3));
    }

    #[test]
    fn request_carries_passthrough_keys() {
        let sampling = SamplingArgs::from_json(r#"{"top_p": 0.9, "seed": 7}"#).unwrap();
        let body = OpenAIClient::build_request("gpt-4o-mini", &messages(), &sampling);
        assert_eq!(body["top_p"], json!(0.9));
        assert_eq!(body["seed"], json!(7));
    }

    #[test]
    fn typed_fields_beat_same_named_passthrough_keys() {
        let mut extra = Map::new();
        extra.insert("temperature".into(), json!(0.1));
        let sampling = SamplingArgs {
            max_tokens: None,
            temperature: Some(0.9),
            extra,
        };
        let body = OpenAIClient::build_request("gpt-4o-mini", &messages(), &sampling);
        assert_eq!(body["temperature"], json!(0.9));
    }

    #[test]
    fn client_without_key_still_constructs() {
        let client = OpenAIClient::new(ClientConfig::default());
        // Credentials are only checked by the API at call time.
        assert!(client.config.api_key.is_none());
    }
}
