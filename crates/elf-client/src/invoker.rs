//! The invocation boundary.
//!
//! `Invoker` is the only way the client talks to its backends. It is injected
//! into the dispatcher and the result rows, so both run against a substitute
//! implementation in tests.

use std::sync::Arc;

use elf_core::InvokeError;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::command::Command;

/// Asynchronous command channel to a backend.
///
/// Returns futures rather than being an async trait so callers can spawn them
/// however they want. The payload is raw JSON; shape validation belongs to
/// the caller.
#[cfg_attr(test, mockall::automock)]
pub trait Invoker: Send + Sync {
    /// Send one command and wait for its payload.
    fn invoke(&self, command: Command) -> BoxFuture<'static, Result<Value, InvokeError>>;
}

/// Routes backend operations and desktop integrations to different bindings.
///
/// Search and favorite commands go to `backend` (HTTP or an in-process
/// host); `open_*` commands go to `desktop`.
pub struct RoutedInvoker {
    backend: Arc<dyn Invoker>,
    desktop: Arc<dyn Invoker>,
}

impl RoutedInvoker {
    pub fn new(backend: Arc<dyn Invoker>, desktop: Arc<dyn Invoker>) -> Self {
        Self { backend, desktop }
    }
}

impl Invoker for RoutedInvoker {
    fn invoke(&self, command: Command) -> BoxFuture<'static, Result<Value, InvokeError>> {
        if command.is_backend_operation() {
            self.backend.invoke(command)
        } else {
            self.desktop.invoke(command)
        }
    }
}
