use greeting_core::ApiErrorBody;
use std::fmt;

/// Errors seen by the client screens
#[derive(Debug)]
pub enum AppError {
    /// Request never got an answer
    Network(reqwest::Error),
    /// The greeting does not exist
    NotFound,
    /// Server refused the input (4xx)
    Rejected(ApiErrorBody),
    /// Server failed (5xx)
    Server(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "Network error: {}", e),
            AppError::NotFound => write!(f, "Greeting not found"),
            AppError::Rejected(body) => write!(f, "Rejected: {}", body.error),
            AppError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            AppError::NotFound => "Greeting not found".to_string(),
            AppError::Rejected(body) => body.error.clone(),
            AppError::Server(msg) => msg.clone(),
        }
    }
}
