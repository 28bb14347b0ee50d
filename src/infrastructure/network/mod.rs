pub mod anthropic;
pub mod http;
pub mod openai;

use crate::domain::error::AppError;
use crate::domain::model::ProviderKind;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::config::LlmConfig;
use anthropic::ClaudeProvider;
use openai::OpenAiProvider;
use std::sync::Arc;
use tracing::info;

/// Build the provider adapter named by the configuration.
///
/// Called once at startup. An unknown provider name is a configuration
/// error; there is no fallback provider.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, AppError> {
    let kind = config.provider_kind()?;
    if config.api_key.trim().is_empty() {
        return Err(AppError::Config("LLM_API_KEY is required".to_string()));
    }

    let base_url = config
        .base_url_override()
        .unwrap_or_else(|| kind.default_base_url())
        .to_string();
    let client = http::create_client(config.timeout)?;

    info!("Initializing LLM provider: {}", kind);
    info!("Model: {}", config.model);
    info!("Base URL: {}", base_url);

    let provider: Arc<dyn LlmProvider> = match kind {
        ProviderKind::Claude => Arc::new(ClaudeProvider::new(
            client,
            config.api_key.trim(),
            &config.model,
            base_url,
        )),
        ProviderKind::OpenAi | ProviderKind::DeepSeek | ProviderKind::Qwen => {
            Arc::new(OpenAiProvider::new(
                kind.as_str(),
                client,
                config.api_key.trim(),
                &config.model,
                base_url,
            ))
        }
    };

    Ok(provider)
}
