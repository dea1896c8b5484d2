//! Scriptable in-memory invoker for tests.
//!
//! Enabled with the `mock` feature so downstream crates can drive their
//! dispatch logic without a backend.

use std::collections::HashMap;
use std::sync::Arc;

use elf_core::InvokeError;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::command::Command;
use crate::invoker::Invoker;

type Handler = Arc<dyn Fn(&Command) -> Result<Value, InvokeError> + Send + Sync>;
type Reply = Result<Value, InvokeError>;

/// Fake invoker that records every command and answers from a script.
///
/// Defaults: searches return `[]`, star/unstar return `true`, open commands
/// return `null`.
#[derive(Clone, Default)]
pub struct FakeInvoker {
    calls: Arc<Mutex<Vec<Command>>>,
    handlers: Arc<Mutex<HashMap<&'static str, Handler>>>,
    held: Arc<Mutex<HashMap<String, oneshot::Receiver<Reply>>>>,
}

/// Manual completion handle for a held search.
pub struct Gate {
    tx: oneshot::Sender<Reply>,
}

impl Gate {
    /// Complete the held invocation with `reply`.
    pub fn release(self, reply: Reply) {
        let _ = self.tx.send(reply);
    }
}

impl FakeInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `operation` with a fixed payload.
    pub fn with_response(self, operation: &'static str, payload: Value) -> Self {
        self.with_handler(operation, move |_| Ok(payload.clone()))
    }

    /// Answer `operation` with a computed reply.
    pub fn with_handler<F>(self, operation: &'static str, handler: F) -> Self
    where
        F: Fn(&Command) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        self.handlers.lock().insert(operation, Arc::new(handler));
        self
    }

    /// Hold the next search whose entry is `entry` until the gate is released.
    pub fn hold(&self, entry: impl Into<String>) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.held.lock().insert(entry.into(), rx);
        Gate { tx }
    }

    /// Every command received so far, in order.
    pub fn calls(&self) -> Vec<Command> {
        self.calls.lock().clone()
    }

    /// Operation names received so far, in order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(Command::name).collect()
    }

    fn default_reply(command: &Command) -> Reply {
        match command {
            Command::Search { .. } | Command::RegexSearch { .. } | Command::HotSearch { .. } => {
                Ok(json!([]))
            }
            Command::StarPath { .. } | Command::UnstarPath { .. } => Ok(json!(true)),
            Command::OpenFile { .. } | Command::OpenDir { .. } | Command::OpenVscode { .. } => {
                Ok(Value::Null)
            }
        }
    }
}

fn search_entry(command: &Command) -> Option<&str> {
    match command {
        Command::Search { entry, .. }
        | Command::RegexSearch { entry }
        | Command::HotSearch { entry, .. } => Some(entry),
        _ => None,
    }
}

impl Invoker for FakeInvoker {
    fn invoke(&self, command: Command) -> BoxFuture<'static, Result<Value, InvokeError>> {
        self.calls.lock().push(command.clone());

        if let Some(rx) = search_entry(&command).and_then(|entry| self.held.lock().remove(entry)) {
            return Box::pin(async move {
                match rx.await {
                    Ok(reply) => reply,
                    Err(e) => Err(InvokeError::Channel(e.to_string())),
                }
            });
        }

        let handler = self.handlers.lock().get(command.name()).cloned();
        let reply = match handler {
            Some(handler) => handler(&command),
            None => Self::default_reply(&command),
        };
        Box::pin(async move { reply })
    }
}
