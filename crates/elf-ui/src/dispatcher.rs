//! Search dispatch with generation tokens.
//!
//! Every dispatch clears the displayed results, bumps the generation and
//! sends exactly one backend operation. A response is applied only if its
//! generation is still the latest; older responses are dropped silently.

use std::sync::Arc;

use elf_client::Invoker;
use elf_core::{decode_results, messages, Query, SearchError, SearchResult};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::model::{resolve, ResultList, ResultRow};
use crate::notification::NotificationQueue;

/// Resolve `query` to its operation, invoke it, and decode the payload.
pub async fn run_search(
    invoker: &dyn Invoker,
    query: &Query,
) -> Result<Vec<SearchResult>, SearchError> {
    let command = resolve(query);
    tracing::debug!(operation = command.name(), entry = %query.entry_text, "Dispatching search");
    let payload = invoker.invoke(command).await?;
    decode_results(&payload)
}

/// Owns the displayed result collection.
#[derive(Clone)]
pub struct SearchDispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    invoker: Arc<dyn Invoker>,
    notifications: NotificationQueue,
    results: watch::Sender<ResultList>,
}

impl SearchDispatcher {
    pub fn new(invoker: Arc<dyn Invoker>, notifications: NotificationQueue) -> Self {
        let (results, _) = watch::channel(ResultList::default());
        Self {
            inner: Arc::new(Inner {
                invoker,
                notifications,
                results,
            }),
        }
    }

    /// Snapshot of the displayed results.
    pub fn results(&self) -> ResultList {
        self.inner.results.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultList> {
        self.inner.results.subscribe()
    }

    /// Whether the latest dispatch is still waiting for its response.
    pub fn is_loading(&self) -> bool {
        self.inner.results.borrow().loading
    }

    pub fn row(&self, index: usize) -> Option<Arc<ResultRow>> {
        self.inner.results.borrow().get(index).cloned()
    }

    /// Tell subscribers a row changed in place (e.g. a confirmed favorite).
    pub fn refresh_rows(&self) {
        self.inner.results.send_modify(|_| {});
    }

    /// Dispatch and wait for the outcome.
    ///
    /// Returns whether the response was applied (false if a newer dispatch
    /// started in the meantime).
    pub async fn dispatch(&self, query: Query) -> bool {
        let generation = self.begin();
        self.finish(generation, &query).await
    }

    /// Start a dispatch now and complete it in the background.
    ///
    /// The results are cleared before this returns, so dispatch order is
    /// call order even though responses may arrive in any order.
    pub fn spawn_dispatch(&self, query: Query) -> JoinHandle<bool> {
        let generation = self.begin();
        let this = self.clone();
        tokio::spawn(async move { this.finish(generation, &query).await })
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.inner.results.send_modify(|list| {
            list.generation += 1;
            list.rows.clear();
            list.loading = true;
            generation = list.generation;
        });
        generation
    }

    async fn finish(&self, generation: u64, query: &Query) -> bool {
        let outcome = run_search(self.inner.invoker.as_ref(), query).await;
        self.complete(generation, outcome)
    }

    fn complete(&self, generation: u64, outcome: Result<Vec<SearchResult>, SearchError>) -> bool {
        let mut failure = None;
        let applied = self.inner.results.send_if_modified(|list| {
            if list.generation != generation {
                return false;
            }
            match outcome {
                Ok(results) => *list = ResultList::from_results(generation, results),
                Err(e) => {
                    list.loading = false;
                    failure = Some(e);
                }
            }
            true
        });

        if !applied {
            tracing::debug!(generation, "Discarding stale search response");
            return false;
        }

        match failure {
            None => {
                tracing::info!(generation, count = self.inner.results.borrow().len(), "Search completed");
                self.inner.notifications.notify(messages::SEARCH_SUCCEEDED);
            }
            Some(e) => {
                tracing::warn!(generation, "Search failed: {}", e);
                self.inner.notifications.notify(messages::SEARCH_FAILED);
            }
        }
        true
    }
}
