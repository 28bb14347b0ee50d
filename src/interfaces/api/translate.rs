use crate::domain::error::TranslateError;
use crate::domain::model::TranslationResult;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error returned by the HTTP layer, rendered as `{"error": {code, message}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(e: TranslateError) -> Self {
        let status = match e {
            TranslateError::MalformedResponse(_) | TranslateError::InvalidStructure(_) => {
                StatusCode::BAD_GATEWAY
            }
            TranslateError::Service(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            code: e.code(),
            message: e.public_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Trim the input and enforce the non-empty and length rules.
///
/// Length is counted in characters, not bytes.
pub fn validate_text(text: &str, max_len: usize) -> Result<&str, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request(
            "EMPTY_TEXT",
            "Text cannot be empty or whitespace only",
        ));
    }

    let len = text.chars().count();
    if len > max_len {
        warn!("Text too long: {} chars", len);
        return Err(ApiError::bad_request(
            "TEXT_TOO_LONG",
            format!("Text exceeds maximum length of {} characters", max_len),
        ));
    }

    Ok(text)
}

/// POST /api/translate
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let span = info_span!("translate", request_id = %Uuid::new_v4());
    handle_translate(state, payload).instrument(span).await
}

async fn handle_translate(
    state: AppState,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected request body: {}", e);
        ApiError::bad_request("INVALID_REQUEST", "Request body must be JSON with a \"text\" field")
    })?;
    info!(
        "Translation request received. Text length: {}",
        request.text.chars().count()
    );

    let text = validate_text(&request.text, state.config.server.max_text_length)?;

    let started = Instant::now();
    let result = state.translator.translate(text).await.map_err(|e| {
        error!("Translation error: {:?}", e);
        ApiError::from(e)
    })?;
    info!(
        "Translation completed in {:.2}s",
        started.elapsed().as_secs_f64()
    );

    Ok(Json(result))
}
