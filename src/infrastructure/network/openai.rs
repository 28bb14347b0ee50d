// OpenAI-compatible chat completion adapter (OpenAI, DeepSeek, Qwen)
use crate::domain::error::ProviderError;
use crate::domain::model::{ChatMessage, LlmReply};
use crate::domain::traits::LlmProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

pub const TEMPERATURE: f32 = 0.3;

#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Serialize, Debug)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    id: Option<String>,
    model: Option<String>,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    role: Option<String>,
    content: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// Chat-completion style provider.
///
/// Messages are sent as-is, system role included, and the provider is asked
/// for a JSON object reply.
pub struct OpenAiProvider {
    name: &'static str,
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(
        name: &'static str,
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name,
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }

    async fn chat_impl(&self, messages: &[ChatMessage]) -> Result<LlmReply, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.build_request(messages))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(if status.as_u16() == 401 || status.as_u16() == 403 {
                ProviderError::Authentication(body)
            } else {
                ProviderError::Upstream {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .first()
            .ok_or_else(|| ProviderError::InvalidPayload("no choices in response".to_string()))?;
        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| ProviderError::InvalidPayload("empty message content".to_string()))?;

        let usage = completion.usage.unwrap_or_default();
        let raw = json!({
            "id": completion.id,
            "model": completion.model,
            "choices": [{
                "message": { "role": choice.message.role, "content": content },
                "finish_reason": choice.finish_reason,
            }],
            "usage": {
                "prompt_tokens": usage.prompt_tokens,
                "completion_tokens": usage.completion_tokens,
                "total_tokens": usage.total_tokens,
            },
        });

        Ok(LlmReply {
            content,
            raw: Some(raw),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmReply, ProviderError> {
        self.chat_impl(messages).await.inspect_err(|e| {
            error!(provider = self.name, "OpenAI API error: {}", e);
        })
    }
}
