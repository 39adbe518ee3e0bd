use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::scraping::ScrapeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// `status` is the scraping service's HTTP status when it answered with a non-OK one.
    #[error("Failed to scrape jobs page: {message}")]
    UpstreamScrape { status: Option<u16>, message: String },

    #[error("Error parsing response: {0}")]
    MalformedModelOutput(String),

    #[error("Upstream request timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Error making request: {0}")]
    Transport(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Unexpected error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamScrape { status, .. } => match status {
                Some(code) => StatusCode::from_u16(*code)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                None => StatusCode::BAD_REQUEST,
            },
            AppError::MalformedModelOutput(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Transport(_) | AppError::Llm(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UpstreamScrape { .. } => "UPSTREAM_SCRAPE_ERROR",
            AppError::MalformedModelOutput(_) => "MALFORMED_MODEL_OUTPUT",
            AppError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::Status { status, message } => AppError::UpstreamScrape {
                status: Some(status),
                message,
            },
            ScrapeError::Unsuccessful(message) => AppError::UpstreamScrape {
                status: None,
                message,
            },
            ScrapeError::MissingData(field) => AppError::UpstreamScrape {
                status: None,
                message: format!("response did not contain `{field}`"),
            },
            ScrapeError::Timeout => AppError::UpstreamTimeout("scraping service".to_string()),
            ScrapeError::Http(e) => AppError::Transport(e.to_string()),
            ScrapeError::Decode(e) => AppError::UpstreamScrape {
                status: None,
                message: format!("unreadable response body: {e}"),
            },
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => AppError::UpstreamTimeout("language model".to_string()),
            LlmError::Http(e) => AppError::Transport(e.to_string()),
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{}: {message}", self.code());
        } else {
            tracing::warn!("{}: {message}", self.code());
        }

        let body = Json(json!({
            "detail": message,
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
