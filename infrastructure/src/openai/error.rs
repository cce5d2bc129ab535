//! Error types for the OpenAI adapter

use score_application::GatewayError;
use thiserror::Error;

/// Result type alias for OpenAI operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to the OpenAI API
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Http(e) if e.is_connect() || e.is_request() || e.is_body() => {
                GatewayError::Connection(e.to_string())
            }
            OpenAiError::Http(e) if e.is_decode() => GatewayError::MalformedResponse(e.to_string()),
            OpenAiError::Http(e) => GatewayError::Other(e.to_string()),
            OpenAiError::Api { status: 429, message } => GatewayError::RateLimited(message),
            OpenAiError::Api { status, message } => GatewayError::RequestFailed { status, message },
            OpenAiError::UnexpectedResponse(msg) => GatewayError::MalformedResponse(msg),
            OpenAiError::Serialization(e) => GatewayError::MalformedResponse(e.to_string()),
            OpenAiError::MissingApiKey(var) => {
                GatewayError::Other(format!("missing API key ({})", var))
            }
        }
    }
}
