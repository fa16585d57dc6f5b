//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] pairmm_core::CoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] pairmm_telemetry::TelemetryError),

    #[error("Event parse error: {0}")]
    Event(#[from] serde_json::Error),

    #[error("Command write error: {0}")]
    CommandWrite(#[source] serde_json::Error),

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
