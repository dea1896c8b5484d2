//! The top-level search view.
//!
//! Owns the query and turns input events into dispatches and row actions.
//! Work that crosses the invocation boundary is spawned; the handle is
//! returned so callers (and tests) can wait for it.

use std::sync::Arc;

use elf_client::Invoker;
use elf_core::Query;
use tokio::task::JoinHandle;

use crate::actions::{RowAction, RowActions};
use crate::dispatcher::SearchDispatcher;
use crate::model::should_auto_fire;
use crate::notification::NotificationQueue;
use crate::platform::Clipboard;

/// Everything the user can do to the search view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The query field text changed.
    EntryChanged(String),
    ToggleFuzzy,
    ToggleRegex,
    ToggleSmart,
    /// Enter pressed in the query field.
    EnterPressed,
    /// The search button was activated.
    SearchClicked,
    /// A row action, by zero-based row index.
    Row { index: usize, action: RowAction },
    OpenConfig,
    DismissNotification,
}

pub struct SearchView {
    query: Query,
    dispatcher: SearchDispatcher,
    actions: RowActions,
    notifications: NotificationQueue,
    config_file: String,
}

impl SearchView {
    pub fn new(
        invoker: Arc<dyn Invoker>,
        clipboard: Arc<dyn Clipboard>,
        notifications: NotificationQueue,
        config_file: impl Into<String>,
    ) -> Self {
        Self {
            query: Query::default(),
            dispatcher: SearchDispatcher::new(invoker.clone(), notifications.clone()),
            actions: RowActions::new(invoker, clipboard, notifications.clone()),
            notifications,
            config_file: config_file.into(),
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn dispatcher(&self) -> &SearchDispatcher {
        &self.dispatcher
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Apply one input event. Must be called from within a tokio runtime.
    pub fn handle(&mut self, event: InputEvent) -> Option<JoinHandle<()>> {
        match event {
            InputEvent::EntryChanged(text) => {
                let next = Query {
                    entry_text: text,
                    ..self.query.clone()
                };
                self.set_query(next)
            }
            InputEvent::ToggleFuzzy => {
                let next = self.query.clone().with_fuzzy(!self.query.fuzzy);
                self.set_query(next)
            }
            InputEvent::ToggleRegex => {
                let next = self.query.clone().with_regex(!self.query.regex);
                self.set_query(next)
            }
            InputEvent::ToggleSmart => {
                let next = self.query.clone().with_smart(!self.query.smart);
                self.set_query(next)
            }
            InputEvent::EnterPressed | InputEvent::SearchClicked => Some(self.search()),
            InputEvent::Row { index, action } => self.row_action(index, action),
            InputEvent::OpenConfig => {
                let actions = self.actions.clone();
                let name = self.config_file.clone();
                Some(tokio::spawn(async move { actions.open_config(&name).await }))
            }
            InputEvent::DismissNotification => {
                self.notifications.dismiss();
                None
            }
        }
    }

    fn set_query(&mut self, next: Query) -> Option<JoinHandle<()>> {
        let fire = should_auto_fire(&self.query, &next);
        self.query = next;
        fire.then(|| self.search())
    }

    fn search(&self) -> JoinHandle<()> {
        let pending = self.dispatcher.spawn_dispatch(self.query.clone());
        tokio::spawn(async move {
            if let Err(e) = pending.await {
                tracing::error!("Search task failed: {}", e);
            }
        })
    }

    fn row_action(&self, index: usize, action: RowAction) -> Option<JoinHandle<()>> {
        let Some(row) = self.dispatcher.row(index) else {
            tracing::warn!(index, action = action.label(), "No such result row");
            return None;
        };
        let actions = self.actions.clone();
        let dispatcher = self.dispatcher.clone();
        Some(tokio::spawn(async move {
            if actions.perform(&row, action).await {
                dispatcher.refresh_rows();
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryClipboard;
    use elf_client::mock::FakeInvoker;
    use elf_client::Command;
    use serde_json::json;

    fn view_with(fake: &FakeInvoker) -> SearchView {
        SearchView::new(
            Arc::new(fake.clone()),
            Arc::new(MemoryClipboard::default()),
            NotificationQueue::default(),
            "base.toml",
        )
    }

    #[tokio::test]
    async fn test_typing_does_not_search() {
        let fake = FakeInvoker::new();
        let mut view = view_with(&fake);

        assert!(view.handle(InputEvent::EntryChanged("rep".to_string())).is_none());
        assert!(view.handle(InputEvent::EntryChanged("report".to_string())).is_none());
        assert!(fake.calls().is_empty());
        assert_eq!(view.query().entry_text, "report");
    }

    #[tokio::test]
    async fn test_explicit_search_fires_in_every_mode() {
        let fake = FakeInvoker::new();
        let mut view = view_with(&fake);
        view.handle(InputEvent::EntryChanged("x".to_string()));
        view.handle(InputEvent::ToggleSmart);

        view.handle(InputEvent::EnterPressed).unwrap().await.unwrap();
        view.handle(InputEvent::SearchClicked).unwrap().await.unwrap();
        assert_eq!(fake.operations(), vec!["hot_search", "hot_search"]);
    }

    #[tokio::test]
    async fn test_flag_toggle_auto_fires() {
        let fake = FakeInvoker::new().with_response("regex_search", json!(["report.pdf"]));
        let mut view = view_with(&fake);
        view.handle(InputEvent::EntryChanged("report".to_string()));

        view.handle(InputEvent::ToggleRegex).unwrap().await.unwrap();
        assert_eq!(
            fake.calls(),
            vec![Command::RegexSearch {
                entry: "report".to_string()
            }]
        );
        assert_eq!(view.dispatcher().results().paths(), vec!["report.pdf"]);
        assert_eq!(
            view.notifications().current().text,
            "Search completed successfully."
        );
    }

    #[tokio::test]
    async fn test_smart_mode_never_auto_fires() {
        let fake = FakeInvoker::new();
        let mut view = view_with(&fake);
        view.handle(InputEvent::EntryChanged("x".to_string()));

        assert!(view.handle(InputEvent::ToggleSmart).is_none());
        assert!(view.handle(InputEvent::ToggleFuzzy).is_none());
        assert!(view.handle(InputEvent::ToggleRegex).is_none());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_row_action_on_missing_row() {
        let fake = FakeInvoker::new();
        let mut view = view_with(&fake);
        let handle = view.handle(InputEvent::Row {
            index: 0,
            action: RowAction::OpenFile,
        });
        assert!(handle.is_none());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_row_actions_do_not_search() {
        let fake = FakeInvoker::new().with_response("search", json!([["x/y.txt", false]]));
        let mut view = view_with(&fake);
        view.handle(InputEvent::EntryChanged("y".to_string()));
        view.handle(InputEvent::SearchClicked).unwrap().await.unwrap();

        view.handle(InputEvent::Row {
            index: 0,
            action: RowAction::ToggleFavorite,
        })
        .unwrap()
        .await
        .unwrap();

        let row = view.dispatcher().row(0).unwrap();
        assert!(row.is_favorited());
        assert_eq!(fake.operations(), vec!["search", "star_path"]);
        assert_eq!(view.query().entry_text, "y");
    }

    #[tokio::test]
    async fn test_confirmed_favorite_wakes_result_subscribers() {
        let fake = FakeInvoker::new().with_response("search", json!([["x/y.txt", false]]));
        let mut view = view_with(&fake);
        view.handle(InputEvent::EntryChanged("y".to_string()));
        view.handle(InputEvent::SearchClicked).unwrap().await.unwrap();

        let mut rx = view.dispatcher().subscribe();
        assert!(!rx.has_changed().unwrap());

        let toggle = InputEvent::Row {
            index: 0,
            action: RowAction::ToggleFavorite,
        };
        view.handle(toggle).unwrap().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().get(0).unwrap().is_favorited());
    }

    #[tokio::test]
    async fn test_rejected_favorite_does_not_wake_subscribers() {
        let fake = FakeInvoker::new()
            .with_response("search", json!([["x/y.txt", false]]))
            .with_response("star_path", json!(false));
        let mut view = view_with(&fake);
        view.handle(InputEvent::EntryChanged("y".to_string()));
        view.handle(InputEvent::SearchClicked).unwrap().await.unwrap();

        let rx = view.dispatcher().subscribe();
        view.handle(InputEvent::Row {
            index: 0,
            action: RowAction::ToggleFavorite,
        })
        .unwrap()
        .await
        .unwrap();
        assert!(!rx.has_changed().unwrap());
        assert!(!view.dispatcher().row(0).unwrap().is_favorited());
    }

    #[tokio::test]
    async fn test_config_and_dismiss() {
        let fake = FakeInvoker::new();
        let mut view = view_with(&fake);

        view.handle(InputEvent::OpenConfig).unwrap().await.unwrap();
        assert_eq!(
            view.notifications().current().text,
            "Opening configuration: base.toml"
        );

        view.handle(InputEvent::DismissNotification);
        assert!(!view.notifications().current().visible);
    }
}
