//! Error types for the file-elf client.

use std::time::Duration;
use thiserror::Error;

/// Invocation boundary errors - the call never produced a usable payload.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Network or bridge transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend received the call and refused it.
    #[error("Operation '{operation}' rejected: {message}")]
    Rejected { operation: String, message: String },

    /// The binding has no route for this operation.
    #[error("Operation '{operation}' is not supported by this binding")]
    Unsupported { operation: String },

    /// The backend did not answer in time.
    #[error("Invocation timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Command channel closed (host task gone).
    #[error("Channel error: {0}")]
    Channel(String),

    /// Response body could not be decoded as JSON.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl InvokeError {
    /// Shorthand for a rejection of `operation`.
    pub fn rejected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Search dispatch errors. Never shown to the user verbatim.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Payload was not an array of recognizable results.
    #[error("Malformed search response: {detail}")]
    MalformedResponse { detail: String },

    /// The backend call itself failed.
    #[error(transparent)]
    Invocation(#[from] InvokeError),
}

/// Favorite toggle errors.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// Backend answered with a falsy value.
    #[error("Backend refused to {operation} '{path}'")]
    Rejected { operation: &'static str, path: String },

    /// The backend call itself failed.
    #[error(transparent)]
    Invocation(#[from] InvokeError),
}

/// Clipboard write failure.
#[derive(Debug, Error)]
#[error("Clipboard error: {0}")]
pub struct ClipboardError(pub String);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is unusable.
    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}
