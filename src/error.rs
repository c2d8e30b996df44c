//! Error types for membank
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in membank
#[derive(Debug, Error)]
pub enum MembankError {
    /// Tool name not present in the registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments failed validation
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Response capture failed
    #[error("Capture error: {0}")]
    Capture(String),

    /// Automation script exited with a nonzero status
    #[error("Script failed (exit code {code}): {stderr}")]
    ScriptFailed { code: i32, stderr: String },

    /// Automation script did not finish in time
    #[error("Script timed out after {timeout_ms}ms")]
    ScriptTimeout { timeout_ms: u64 },

    /// Tool handler did not finish in time
    #[error("Tool {name} timed out after {timeout_ms}ms")]
    ToolTimeout { name: String, timeout_ms: u64 },

    /// Unusable server options
    #[error("Configuration error: {0}")]
    Config(String),

    /// Protocol framing or message error
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Backing store error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for membank operations
pub type Result<T> = std::result::Result<T, MembankError>;
