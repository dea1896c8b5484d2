//! Core types for the file-elf search client.
//!
//! This crate contains shared data structures used across all file-elf crates:
//! - Query state and search results
//! - Result payload decoding (including the legacy bare-path shape)
//! - Notification payload and message texts
//! - Configuration types
//! - Error types

mod config;
mod error;
mod notification;
mod query;
mod result;

pub use config::{
    config_dir, config_path, BackendConfig, ClientConfig, EditorConfig, LogConfig,
    NotificationConfig, ServiceConfig,
};
pub use error::{ClipboardError, ConfigError, InvokeError, SearchError, ToggleError};
pub use notification::{messages, NotificationMessage, DEFAULT_DISMISS_MS};
pub use query::Query;
pub use result::{decode_results, is_truthy, SearchResult};
