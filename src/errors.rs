use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    // Backend-reported exception or JSON-RPC error member.
    #[error("Backend fault ({code}): {message}")]
    Fault { code: i64, message: String },

    #[error("Authentication rejected for user {0}")]
    Authentication(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
