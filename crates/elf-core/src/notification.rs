//! Notification payload and the user-facing message texts.

/// Auto-dismiss delay used when no configuration overrides it.
pub const DEFAULT_DISMISS_MS: u64 = 5000;

/// The single transient message shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Message text. Kept after dismissal so the view can fade it out.
    pub text: String,

    /// Whether the message is currently shown.
    pub visible: bool,
}

impl NotificationMessage {
    /// A visible message with the given text.
    pub fn shown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }
}

/// Fixed message texts.
pub mod messages {
    pub const SEARCH_SUCCEEDED: &str = "Search completed successfully.";
    pub const SEARCH_FAILED: &str = "Error occurred while searching.";

    pub fn file_opened(path: &str) -> String {
        format!("File opened: {}", path)
    }

    pub fn dir_opened(path: &str) -> String {
        format!("Directory opened: {}", path)
    }

    pub fn editor_opened(path: &str) -> String {
        format!("Opened in editor: {}", path)
    }

    pub fn path_copied(path: &str) -> String {
        format!("Path copied to clipboard: {}", path)
    }

    pub fn copy_failed(path: &str) -> String {
        format!("Failed to copy path: {}", path)
    }

    pub fn starred(path: &str) -> String {
        format!("Added to favorites: {}", path)
    }

    pub fn unstarred(path: &str) -> String {
        format!("Removed from favorites: {}", path)
    }

    pub fn star_failed(path: &str) -> String {
        format!("Failed to update favorite: {}", path)
    }

    pub fn config_opened(name: &str) -> String {
        format!("Opening configuration: {}", name)
    }
}
