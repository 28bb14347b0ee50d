use crate::domain::error::ProviderError;
use crate::domain::model::{ChatMessage, LlmReply};
use async_trait::async_trait;

/// Trait for LLM chat providers
///
/// This trait provides an abstraction over the different provider APIs.
/// Implementations make exactly one outbound request per call and never retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identity used in logs
    fn name(&self) -> &'static str;

    /// Send an ordered list of messages and return the model's reply
    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmReply, ProviderError>;
}
