//! Row-level actions.
//!
//! Opens are fire-and-forget: the notification goes out as soon as the
//! command is sent, and a failure is only logged. None of these touch the
//! query or trigger a search.

use std::sync::Arc;

use elf_client::{Command, Invoker};
use elf_core::messages;

use crate::model::ResultRow;
use crate::notification::NotificationQueue;
use crate::platform::Clipboard;

/// What a row can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    OpenFile,
    OpenDir,
    OpenEditor,
    CopyPath,
    ToggleFavorite,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::OpenFile => "open",
            RowAction::OpenDir => "dir",
            RowAction::OpenEditor => "edit",
            RowAction::CopyPath => "copy",
            RowAction::ToggleFavorite => "star",
        }
    }
}

/// Routes row actions to the invoker, the clipboard and notifications.
#[derive(Clone)]
pub struct RowActions {
    invoker: Arc<dyn Invoker>,
    clipboard: Arc<dyn Clipboard>,
    notifications: NotificationQueue,
}

impl RowActions {
    pub fn new(
        invoker: Arc<dyn Invoker>,
        clipboard: Arc<dyn Clipboard>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            invoker,
            clipboard,
            notifications,
        }
    }

    /// Perform `action` on `row`.
    ///
    /// Returns whether the row's displayed state changed.
    pub async fn perform(&self, row: &ResultRow, action: RowAction) -> bool {
        let path = row.path().to_string();
        match action {
            RowAction::OpenFile => {
                self.notifications.notify(messages::file_opened(&path));
                self.fire(Command::OpenFile { name: path }).await;
            }
            RowAction::OpenDir => {
                self.notifications.notify(messages::dir_opened(&path));
                self.fire(Command::OpenDir { name: path }).await;
            }
            RowAction::OpenEditor => {
                self.notifications.notify(messages::editor_opened(&path));
                self.fire(Command::OpenVscode { path }).await;
            }
            RowAction::CopyPath => self.copy_path(&path),
            RowAction::ToggleFavorite => {
                return row
                    .favorite()
                    .toggle(self.invoker.as_ref(), &self.notifications)
                    .await;
            }
        }
        false
    }

    /// Open the backend configuration file.
    pub async fn open_config(&self, name: &str) {
        self.notifications.notify(messages::config_opened(name));
        self.fire(Command::OpenFile {
            name: name.to_string(),
        })
        .await;
    }

    fn copy_path(&self, path: &str) {
        match self.clipboard.set_text(path) {
            Ok(()) => self.notifications.notify(messages::path_copied(path)),
            Err(e) => {
                tracing::warn!(%path, "Copy failed: {}", e);
                self.notifications.notify(messages::copy_failed(path));
            }
        }
    }

    async fn fire(&self, command: Command) {
        let operation = command.name();
        if let Err(e) = self.invoker.invoke(command).await {
            tracing::warn!(operation, "Desktop action failed: {}", e);
        }
    }
}
