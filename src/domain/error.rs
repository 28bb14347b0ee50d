use thiserror::Error;

/// Process-level errors raised while starting up or running CLI commands.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of a single call to an LLM provider.
///
/// These never reach an HTTP caller; the translator wraps them into
/// [`TranslateError::Service`].
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid provider payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::InvalidPayload(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Domain error returned by the translation pipeline.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Invalid JSON response from LLM: {0}")]
    MalformedResponse(String),

    #[error("Invalid response structure: {0}")]
    InvalidStructure(String),

    #[error("Translation service error")]
    Service(#[source] ProviderError),
}

impl TranslateError {
    /// Stable machine-readable code exposed in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::MalformedResponse(_) | TranslateError::InvalidStructure(_) => {
                "TRANSLATION_FAILED"
            }
            TranslateError::Service(_) => "SERVICE_ERROR",
        }
    }

    /// User-safe message; never contains provider output or transport detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            TranslateError::MalformedResponse(_) | TranslateError::InvalidStructure(_) => {
                "Failed to translate text. Please try again."
            }
            TranslateError::Service(_) => "Translation service is temporarily unavailable",
        }
    }
}
