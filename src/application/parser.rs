use crate::domain::error::TranslateError;
use crate::domain::model::TranslationResult;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

pub const MIN_KEYWORDS: usize = 3;
pub const MAX_KEYWORDS: usize = 5;

#[derive(Deserialize, Debug)]
struct ReplyPayload {
    translation: Option<String>,
    keywords: Option<Vec<String>>,
}

/// Parse and validate the model's reply content.
///
/// Syntax errors are `MalformedResponse`; well-formed JSON with the wrong
/// shape or missing fields is `InvalidStructure`. Extra keywords beyond
/// five are dropped.
pub fn parse_reply(content: &str) -> Result<TranslationResult, TranslateError> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        error!("Failed to parse LLM response as JSON: {}", e);
        debug!("Raw response: {}", content);
        TranslateError::MalformedResponse(e.to_string())
    })?;

    if !value.is_object() {
        return Err(invalid("Response is not a JSON object"));
    }
    let payload: ReplyPayload =
        serde_json::from_value(value).map_err(|e| invalid(&e.to_string()))?;

    let translation = payload
        .translation
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| invalid("Missing translation in response"))?
        .to_string();

    let mut keywords = payload.keywords.unwrap_or_default();
    if keywords.len() < MIN_KEYWORDS {
        return Err(invalid(&format!(
            "Invalid keywords: must have {}-{} items, got {}",
            MIN_KEYWORDS,
            MAX_KEYWORDS,
            keywords.len()
        )));
    }
    keywords.truncate(MAX_KEYWORDS);

    Ok(TranslationResult {
        translation,
        keywords,
    })
}

fn invalid(reason: &str) -> TranslateError {
    error!("Invalid response structure: {}", reason);
    TranslateError::InvalidStructure(reason.to_string())
}
