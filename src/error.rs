//! Error types for toolprobe
//!
//! Centralized error handling using thiserror.

use std::any::Any;

use thiserror::Error;

/// All error types that can occur while auditing a tool service
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The collaborator could not be reached or returned garbage
    #[error("Transport error: {0}")]
    Transport(String),

    /// The collaborator answered with something that violates the contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A single invocation exceeded its time budget
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// A check could not run to completion
    #[error("Check error: {0}")]
    Check(String),

    /// Report rendering or writing failed
    #[error("Report error: {0}")]
    Report(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for toolprobe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
