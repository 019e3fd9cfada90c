//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::persona::{LlmError, PipelineError};
use crate::pipeline::quality::ReadingLevelMode;
use crate::pipeline::safety::InputRejection;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Input rejected: {0}")]
    Rejected(#[from] InputRejection),
    #[error("Upstream authentication failed")]
    UpstreamUnauthorized,
    #[error("Upstream rate limit reached")]
    UpstreamRateLimited,
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: u64 },
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Persona prompt missing for mode {0}")]
    PersonaMissing(ReadingLevelMode),
    #[error("Translation failed: {0}")]
    TranslationFailed(String),
    #[error("Not found")]
    NotFound,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Rejected(rejection) => (
                StatusCode::BAD_REQUEST,
                rejection.code(),
                rejection.message().to_string(),
            ),
            ApiError::UpstreamUnauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Claude APIキーが無効です".to_string(),
            ),
            ApiError::UpstreamRateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "UPSTREAM_RATE_LIMITED",
                "APIの利用制限に達しました。しばらく待ってから再試行してください".to_string(),
            ),
            ApiError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "リクエストが多すぎます。少し待ってから再試行してください。".to_string(),
            ),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "アップロードされたデータが大きすぎます".to_string(),
            ),
            ApiError::PersonaMissing(mode) => {
                tracing::error!(mode = %mode, "Persona prompt missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSONA_PROMPT_MISSING",
                    "ペルソナプロンプトファイルが見つかりません".to_string(),
                )
            }
            ApiError::TranslationFailed(detail) => {
                tracing::error!(detail, "Translation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TRANSLATION_FAILED",
                    "翻訳処理に失敗しました".to_string(),
                )
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Requested endpoint not found".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "サーバーエラーが発生しました。しばらく待ってから再試行してください。"
                        .to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited { retry_after } = &self {
            if let Ok(val) = axum::http::HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert("Retry-After", val);
            }
        }
        response
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unauthorized => ApiError::UpstreamUnauthorized,
            LlmError::RateLimited => ApiError::UpstreamRateLimited,
            LlmError::Other(detail) => ApiError::TranslationFailed(detail),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Llm(e) => e.into(),
            PipelineError::MissingPersona(mode) => ApiError::PersonaMissing(mode),
        }
    }
}
