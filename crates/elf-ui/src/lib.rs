//! Search view model and terminal front end for file-elf.
//!
//! This crate provides:
//! - Search mode resolution and the reactive auto-search rule
//! - SearchDispatcher with generation tokens for stale-response discard
//! - Backend-confirmed favorite toggles per result row
//! - Single-slot notification queue with auto-dismiss
//! - Row actions and the clipboard primitive
//! - SearchView event handling and text rendering

pub mod actions;
pub mod dispatcher;
pub mod model;
pub mod notification;
pub mod platform;
pub mod views;

// Re-export commonly used types
pub use actions::{RowAction, RowActions};
pub use dispatcher::{run_search, SearchDispatcher};
pub use model::{
    resolve, should_auto_fire, toggle_favorite, FavoriteState, ResultList, ResultRow, SearchMode,
};
pub use notification::NotificationQueue;
pub use platform::{Clipboard, SystemClipboard};
pub use views::{InputEvent, SearchView};
