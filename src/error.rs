//! Error types for the library console

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {status}")]
    Api {
        status: u16,
        /// Text supplied by the backend, if any
        message: Option<String>,
    },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Text supplied by the backend for a failed request.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message shown to the operator: the backend's own text when it sent one,
    /// local validation text as is, otherwise `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api { message: Some(msg), .. } => msg.clone(),
            AppError::Validation(msg)
            | AppError::InvalidReference(msg)
            | AppError::Unauthorized(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for console operations
pub type AppResult<T> = Result<T, AppError>;
