//! 测试用的 LLM provider 替身

#![allow(dead_code)]

use async_trait::async_trait;
use llm_translator::domain::error::ProviderError;
use llm_translator::domain::model::{ChatMessage, LlmReply};
use llm_translator::domain::traits::LlmProvider;
use std::sync::Mutex;

pub enum Behavior {
    Reply(String),
    Timeout,
    Unauthorized,
}

/// Provider double that records every message list it receives.
pub struct StubProvider {
    behavior: Behavior,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubProvider {
    pub fn replying(content: &str) -> Self {
        Self::new(Behavior::Reply(content.to_string()))
    }

    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmReply, ProviderError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.behavior {
            Behavior::Reply(content) => Ok(LlmReply::new(content.clone())),
            Behavior::Timeout => Err(ProviderError::Timeout),
            Behavior::Unauthorized => Err(ProviderError::Authentication(
                "invalid x-api-key sk-secret".to_string(),
            )),
        }
    }
}
