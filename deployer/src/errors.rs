//! Error types for botforge

use thiserror::Error;

/// Main error type for the deployer
#[derive(Error, Debug)]
pub enum DeployerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Template lookup error: {0}")]
    RemoteLookup(String),

    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for DeployerError {
    fn from(err: anyhow::Error) -> Self {
        DeployerError::Internal(err.to_string())
    }
}
