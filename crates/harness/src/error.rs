//! Error types for the test harness

use thiserror::Error;

/// Result type alias using the harness Error
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Mock responder failed to start: {0}")]
    ResponderStartup(String),

    #[error("Invalid lifecycle transition: {from} -> {to}")]
    Lifecycle { from: String, to: String },

    #[error("No active server provider")]
    NoActiveProvider,

    #[error("Provider not initialized")]
    NotInitialized,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),

    #[error("JSON-path '{path}' failed: {reason}")]
    JsonPath { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
