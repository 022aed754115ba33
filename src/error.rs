use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Responses for the failure paths are plain text with fixed wording;
/// clients match on the exact bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No text content provided.")]
    EmptyInput,

    #[error("Error calling Workers AI: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::EmptyInput => StatusCode::BAD_REQUEST,
            AppError::Inference(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
