use crate::domain::error::AppError;
use crate::domain::model::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_text_length: default_max_text_length(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            model: default_model(),
            timeout: default_timeout(),
            base_url: String::new(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

// Defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_max_text_length() -> usize {
    4000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_provider() -> String {
    "openai".to_string()
}
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}

impl LlmConfig {
    pub fn provider_kind(&self) -> Result<ProviderKind, AppError> {
        self.provider.parse().map_err(AppError::Config)
    }

    /// Configured override, or `None` when the provider default applies
    pub fn base_url_override(&self) -> Option<&str> {
        let url = self.base_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

impl Config {
    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Some(v) = lookup("LLM_API_KEY") {
            self.llm.api_key = v;
        }
        if let Some(v) = lookup("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = lookup("LLM_TIMEOUT") {
            self.llm.timeout = parse_number("LLM_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = lookup("MAX_TEXT_LENGTH") {
            self.server.max_text_length = parse_number("MAX_TEXT_LENGTH", &v)?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = parse_origins(&v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("LOG_PATH") {
            self.logging.path = Some(v);
        }
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_number("PORT", &v)?;
        }
        Ok(())
    }

    /// Trim values that are commonly pasted with stray whitespace or quotes.
    pub fn normalize(&mut self) {
        self.llm.api_key = self.llm.api_key.trim().to_string();
        self.llm.base_url = self
            .llm
            .base_url
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        self.logging.level = self.logging.level.trim().to_uppercase();
    }

    /// All configuration problems, empty when the config is usable.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.llm.api_key.trim().is_empty() {
            issues.push(
                "LLM_API_KEY is required! Please set it in your .env file. \
                 Example: LLM_API_KEY=sk-your-api-key-here"
                    .to_string(),
            );
        }
        if let Err(e) = self.llm.provider.parse::<ProviderKind>() {
            issues.push(e);
        }
        if let Some(url) = self.llm.base_url_override() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                issues.push(format!("Invalid base URL format: {}", url));
            }
        }
        if self.llm.timeout == 0 {
            issues.push("LLM_TIMEOUT must be greater than 0".to_string());
        }
        if self.server.max_text_length == 0 {
            issues.push("MAX_TEXT_LENGTH must be greater than 0".to_string());
        }

        issues
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(AppError::Config(issues.join("; ")))
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", name, value)))
}

/// Accepts `a,b,c` or a JSON array such as `["a","b"]`.
pub fn parse_origins(value: &str) -> Result<Vec<String>, AppError> {
    let value = value.trim();
    if value.starts_with('[') {
        return serde_json::from_str(value)
            .map_err(|e| AppError::Config(format!("Invalid CORS_ORIGINS: {}", e)));
    }
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("llm-translator").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, AppError> {
    Ok(toml::from_str::<Config>(content)?)
}

/// Load configuration: defaults, then the TOML file, then `.env` and the
/// process environment. The result is normalized but not validated.
pub fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => match get_config_path() {
            Some(path) if path.exists() => parse_config(&fs::read_to_string(&path)?)?,
            _ => Config::default(),
        },
    };

    // .env is optional
    let _ = dotenvy::dotenv();
    config.apply_env(|name| std::env::var(name).ok())?;
    config.normalize();

    Ok(config)
}

pub fn generate_config_sample() -> Result<(), AppError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(AppError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

/// Mask an API key for display: first 10 and last 4 characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 14 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
