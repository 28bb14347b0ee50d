use crate::application::translate::Translator;
use crate::domain::error::AppError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::create_provider;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Validate the configuration and build the provider once.
    pub fn new(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let provider = create_provider(&config.llm)?;

        Ok(Self::with_translator(Translator::new(provider), config))
    }

    pub fn with_translator(translator: Translator, config: Config) -> Self {
        Self {
            translator: Arc::new(translator),
            config: Arc::new(config),
        }
    }
}
