use crate::application::parser::parse_reply;
use crate::application::prompt::build_messages;
use crate::domain::error::TranslateError;
use crate::domain::model::TranslationResult;
use crate::domain::traits::LlmProvider;
use std::sync::Arc;
use tracing::{debug, error, info};

const PREVIEW_CHARS: usize = 200;

/// Translation pipeline: prompt, one provider call, parse.
pub struct Translator {
    provider: Arc<dyn LlmProvider>,
}

impl Translator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn translate(&self, chinese_text: &str) -> Result<TranslationResult, TranslateError> {
        let messages = build_messages(chinese_text);
        info!(
            "Sending translation request for text length: {}",
            chinese_text.chars().count()
        );

        let reply = self.provider.chat(&messages).await.map_err(|e| {
            error!(provider = self.provider.name(), "Translation failed: {}", e);
            TranslateError::Service(e)
        })?;

        let preview: String = reply.content.chars().take(PREVIEW_CHARS).collect();
        debug!("LLM response received: {}...", preview);
        if let Some(raw) = &reply.raw {
            debug!(raw = %raw, "LLM raw response");
        }

        let result = parse_reply(&reply.content)?;
        info!(
            "Translation successful. Keywords count: {}",
            result.keywords.len()
        );

        Ok(result)
    }
}
