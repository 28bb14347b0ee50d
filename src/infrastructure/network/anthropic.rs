// Anthropic messages API adapter
use crate::domain::error::ProviderError;
use crate::domain::model::{ChatMessage, LlmReply, Role};
use crate::domain::traits::LlmProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f32 = 0.3;

#[derive(Serialize, Debug)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<&'a ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    id: Option<String>,
    model: Option<String>,
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// Separated-system style provider.
///
/// The messages API rejects `system` entries inside `messages`; they are moved
/// to the top-level `system` field.
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeProvider {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }

    pub fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> MessagesRequest<'a> {
        let (system, rest): (Vec<&ChatMessage>, Vec<&ChatMessage>) =
            messages.iter().partition(|m| m.role == Role::System);

        let system = (!system.is_empty()).then(|| {
            system
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n")
        });

        MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: rest,
            temperature: TEMPERATURE,
            system,
        }
    }

    async fn chat_impl(&self, messages: &[ChatMessage]) -> Result<LlmReply, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

        let message: MessagesResponse = response.json().await?;
        let content = message
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone())
            .ok_or_else(|| ProviderError::InvalidPayload("no text block in response".to_string()))?;

        let usage = message.usage.unwrap_or_default();
        let raw = json!({
            "id": message.id,
            "model": message.model,
            "content": [{ "type": "text", "text": content }],
            "usage": {
                "input_tokens": usage.input_tokens,
                "output_tokens": usage.output_tokens,
            },
        });

        Ok(LlmReply {
            content,
            raw: Some(raw),
        })
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    fn name(&self) -> &'static str {
        "claude"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmReply, ProviderError> {
        self.chat_impl(messages).await.inspect_err(|e| {
            error!(provider = "claude", "Claude API error: {}", e);
        })
    }
}
