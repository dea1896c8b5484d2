//! Backend-confirmed favorite flag for one result row.

use std::sync::atomic::{AtomicBool, Ordering};

use elf_client::{Command, Invoker};
use elf_core::{is_truthy, messages, ToggleError};

use crate::notification::NotificationQueue;

/// Ask the backend to flip the favorite state of `path`.
///
/// Sends `unstar_path` when `currently_favorited`, `star_path` otherwise.
/// Succeeds only on a truthy acknowledgement.
pub async fn toggle_favorite(
    invoker: &dyn Invoker,
    path: &str,
    currently_favorited: bool,
) -> Result<(), ToggleError> {
    let (command, operation) = if currently_favorited {
        (
            Command::UnstarPath {
                path: path.to_string(),
            },
            "unstar",
        )
    } else {
        (
            Command::StarPath {
                path: path.to_string(),
            },
            "star",
        )
    };

    let ack = invoker.invoke(command).await?;
    if is_truthy(&ack) {
        Ok(())
    } else {
        Err(ToggleError::Rejected {
            operation,
            path: path.to_string(),
        })
    }
}

/// Local copy of a row's favorite flag. The backend stays authoritative:
/// the flag only flips after a confirmed toggle.
#[derive(Debug)]
pub struct FavoriteState {
    path: String,
    favorited: AtomicBool,
    /// Serializes toggles so each one reads the flag the previous one left.
    pending: tokio::sync::Mutex<()>,
}

impl FavoriteState {
    pub fn new(path: impl Into<String>, favorited: bool) -> Self {
        Self {
            path: path.into(),
            favorited: AtomicBool::new(favorited),
            pending: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited.load(Ordering::SeqCst)
    }

    /// Toggle through the backend and report the outcome.
    ///
    /// Returns whether the flag was flipped. Failures are logged, reported
    /// with a notification, and leave the flag unchanged.
    pub async fn toggle(&self, invoker: &dyn Invoker, notifications: &NotificationQueue) -> bool {
        let _guard = self.pending.lock().await;
        let current = self.is_favorited();

        match toggle_favorite(invoker, &self.path, current).await {
            Ok(()) => {
                self.favorited.store(!current, Ordering::SeqCst);
                tracing::info!(path = %self.path, favorited = !current, "Favorite updated");
                notifications.notify(if current {
                    messages::unstarred(&self.path)
                } else {
                    messages::starred(&self.path)
                });
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path, "Favorite toggle failed: {}", e);
                notifications.notify(messages::star_failed(&self.path));
                false
            }
        }
    }
}
