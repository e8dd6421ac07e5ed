use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown for any failed upstream load; callers retry by re-issuing the request
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load content. Please try again.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Upstream { status: u16 },

    #[error("Unexpected upstream response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures of the upstream APIs (transport, status or body shape)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::HttpClient(_) | AppError::Upstream { .. } | AppError::MalformedResponse(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::HttpClient(_)
            | AppError::Upstream { .. }
            | AppError::MalformedResponse(_) => {
                tracing::warn!(error = %self, "Upstream load failed");
                (StatusCode::BAD_GATEWAY, LOAD_FAILED_MESSAGE.to_string())
            }
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
