//! Error types for the xnode prober

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for prober operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read env file {}: {reason}", path.display())]
    EnvFile { path: PathBuf, reason: String },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Endpoint table not found: {}", .0.display())]
    TableNotFound(PathBuf),

    #[error("Invalid endpoint table: {0}")]
    InvalidTable(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::InvalidTable(err.to_string())
    }
}

/// Errors raised while assembling probe requests
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unsupported HTTP method '{0}' (expected GET, POST or PUT)")]
    UnsupportedMethod(String),

    #[error("Invalid endpoint name '{0}'")]
    InvalidEndpointName(String),

    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),
}

/// Transport-level failures; HTTP error statuses are never reported here
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Failed to connect: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
