use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use greeting_core::{ApiErrorBody, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Greeting not found")]
    NotFound,

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Internal failure already logged, reported to the client as `0`
    #[error("{0}")]
    Internal(&'static str),
}

impl AppError {
    /// Client errors are the caller's fault and map to 4xx
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::NotFound | AppError::Multipart(_)
        )
    }

    /// Logs an internal failure and hides its details behind `context`.
    /// Client errors pass through unchanged.
    pub fn during(self, context: &'static str) -> Self {
        if self.is_client_error() {
            return self;
        }
        log::error!("{context}: {self}");
        AppError::Internal(context)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, ApiErrorBody::from(e)),
            AppError::NotFound => (StatusCode::NOT_FOUND, ApiErrorBody::message(self.to_string())),
            AppError::Multipart(e) => (e.status(), ApiErrorBody::message(e.body_text())),
            AppError::Internal(context) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::message(*context),
            ),
            _ => {
                log::error!("Unhandled internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::message("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
