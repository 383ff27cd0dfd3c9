//! Error types for the sentiment analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Content unavailable: {0}")]
    ContentUnavailable(String),

    #[error("The model returned an empty response for sentiment analysis")]
    EmptyResponse,

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
