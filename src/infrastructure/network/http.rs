// HTTP client utilities
use crate::domain::error::AppError;
use reqwest::Client;
use std::time::Duration;

/// Create the outbound HTTP client shared by one provider adapter.
///
/// `timeout_secs` bounds each whole request, connect through body.
pub fn create_client(timeout_secs: u64) -> Result<Client, AppError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("llm-translator/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
