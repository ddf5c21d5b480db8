//! Error taxonomy for backend calls

use thiserror::Error;

/// Errors produced while talking to a backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Network failure, timeout, or the request could not be built
    #[error("Request failed: {0}")]
    Transport(String),
    /// Non-2xx HTTP status, with the envelope message when the body carried one
    #[error("{}", http_message(*status, message.as_deref()))]
    Http { status: u16, message: Option<String> },
    /// Well-formed envelope whose code is not a success code
    #[error("{message} (code {code})")]
    Envelope { code: String, message: String },
    /// Payload did not have the expected shape
    #[error("Unexpected response: {0}")]
    Malformed(String),
    /// The requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// An operation needed a signed-in user
    #[error("Not signed in")]
    NotAuthenticated,
}

fn http_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => format!("HTTP error! status: {}", status),
    }
}

impl ApiError {
    /// Short text suitable for an inline error line
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::NotFound(_) => "The requested content could not be found.".to_string(),
            ApiError::NotAuthenticated => "Please sign in first.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Malformed(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Transport(format!("Invalid URL: {}", e))
    }
}
