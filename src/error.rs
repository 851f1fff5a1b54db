//! Error types for the quiz generator.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a generated answer could not be turned into a question set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResponseError {
    #[error("response contained no text")]
    EmptyText,
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of questions")]
    NotAnArray,
    #[error("response contained no questions")]
    NoQuestions,
    #[error("question {index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// Errors emitted while generating a question set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("{name} is {size} bytes, above the {limit} byte limit")]
    PayloadTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },
    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generation request timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Network(reqwest::Error),
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] ResponseError),
}

/// Errors emitted while loading settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Error type for running the quiz application.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
