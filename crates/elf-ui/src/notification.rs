//! Single-slot notification queue with timed auto-dismiss.
//!
//! Only the most recent message is kept. Every `notify` replaces the text,
//! shows it, and restarts the dismissal timer; the previous timer is aborted
//! so it can never hide a newer message.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use elf_core::{NotificationConfig, NotificationMessage, DEFAULT_DISMISS_MS};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Observable holder for the current notification.
///
/// Cheap to clone; clones share the same slot.
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<NotificationMessage>,
    timer: Mutex<Option<JoinHandle<()>>>,
    /// Bumped on every notify/dismiss; a timer only hides its own message.
    generation: AtomicU64,
    dismiss_after: Duration,
}

impl NotificationQueue {
    pub fn new(dismiss_after: Duration) -> Self {
        let (state, _) = watch::channel(NotificationMessage::default());
        Self {
            inner: Arc::new(Inner {
                state,
                timer: Mutex::new(None),
                generation: AtomicU64::new(0),
                dismiss_after,
            }),
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.dismiss_after())
    }

    /// Show `text` and (re)start the dismissal timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(%text, "Notification");

        let mut timer = self.inner.timer.lock();
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_replace(NotificationMessage::shown(text));

        let inner = self.inner.clone();
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.dismiss_after).await;
            inner.hide_if_current(generation);
        }));
    }

    /// Hide the message now and cancel the pending timer.
    pub fn dismiss(&self) {
        let mut timer = self.inner.timer.lock();
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.hide_if_current(generation);
    }

    /// Snapshot of the current message.
    pub fn current(&self) -> NotificationMessage {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to message changes.
    pub fn subscribe(&self) -> watch::Receiver<NotificationMessage> {
        self.inner.state.subscribe()
    }

    pub fn dismiss_after(&self) -> Duration {
        self.inner.dismiss_after
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DISMISS_MS))
    }
}

impl Inner {
    fn hide_if_current(&self, generation: u64) {
        self.state.send_if_modified(|message| {
            if self.generation.load(Ordering::SeqCst) != generation || !message.visible {
                return false;
            }
            message.visible = false;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_delay() {
        let queue = NotificationQueue::default();
        queue.notify("Search completed successfully.");
        assert_eq!(
            queue.current(),
            NotificationMessage::shown("Search completed successfully.")
        );

        sleep(Duration::from_millis(4999)).await;
        assert!(queue.current().visible);

        sleep(Duration::from_millis(2)).await;
        let message = queue.current();
        assert!(!message.visible);
        assert_eq!(message.text, "Search completed successfully.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_restarts_timer() {
        let queue = NotificationQueue::default();
        queue.notify("first");
        sleep(Duration::from_millis(3000)).await;

        queue.notify("second");
        sleep(Duration::from_millis(3000)).await;
        // The first timer would have fired at 5000ms.
        assert_eq!(queue.current(), NotificationMessage::shown("second"));

        sleep(Duration::from_millis(2001)).await;
        assert!(!queue.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_timer() {
        let queue = NotificationQueue::new(Duration::from_millis(100));
        queue.notify("first");
        queue.dismiss();
        assert!(!queue.current().visible);

        sleep(Duration::from_millis(50)).await;
        queue.notify("second");
        sleep(Duration::from_millis(60)).await;
        // Would be hidden here if the first timer were still alive.
        assert!(queue.current().visible);

        sleep(Duration::from_millis(41)).await;
        assert!(!queue.current().visible);
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let queue = NotificationQueue::default();
        let mut rx = queue.subscribe();

        queue.notify("hello");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().text, "hello");

        queue.dismiss();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().visible);
    }

    #[tokio::test]
    async fn test_dismiss_without_message_is_noop() {
        let queue = NotificationQueue::default();
        let rx = queue.subscribe();
        queue.dismiss();
        assert!(!rx.has_changed().unwrap());
    }
}
