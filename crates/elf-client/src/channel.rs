//! In-process command channel binding.
//!
//! A host task owns the command handler and receives requests over a tokio
//! channel; each request carries a oneshot sender for its reply. This is the
//! same shape as a native command bridge: the caller only sees an operation
//! going out and a JSON payload coming back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use elf_core::InvokeError;
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::command::Command;
use crate::invoker::Invoker;

/// Handler living on the far side of the channel.
#[async_trait]
pub trait CommandHost: Send + Sync {
    /// Execute one command.
    async fn handle(&self, command: Command) -> Result<Value, InvokeError>;
}

/// Request types for the host task.
pub enum HostRequest {
    /// Run a command and reply on `resp`.
    Invoke {
        command: Command,
        resp: oneshot::Sender<Result<Value, InvokeError>>,
    },
    Shutdown,
}

/// Invoker that forwards commands to a spawned host task.
///
/// Requests are handled concurrently; a slow command does not hold up the
/// ones behind it.
pub struct ChannelInvoker {
    tx: mpsc::UnboundedSender<HostRequest>,
    timeout: Option<Duration>,
}

impl ChannelInvoker {
    /// Spawn the host task. Must be called from within a tokio runtime.
    pub fn spawn<H>(host: H) -> Self
    where
        H: CommandHost + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let host = Arc::new(host);

        tokio::spawn(async move {
            tracing::debug!("Command host started");

            while let Some(request) = rx.recv().await {
                match request {
                    HostRequest::Invoke { command, resp } => {
                        let host = host.clone();
                        tokio::spawn(async move {
                            let result = host.handle(command).await;
                            let _ = resp.send(result);
                        });
                    }
                    HostRequest::Shutdown => {
                        tracing::debug!("Command host shutting down");
                        break;
                    }
                }
            }
        });

        Self { tx, timeout: None }
    }

    /// Fail invocations that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop the host task. Pending replies are dropped.
    pub fn shutdown(&self) {
        let _ = self.tx.send(HostRequest::Shutdown);
    }
}

impl Drop for ChannelInvoker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Invoker for ChannelInvoker {
    fn invoke(&self, command: Command) -> BoxFuture<'static, Result<Value, InvokeError>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        let sent = self.tx.send(HostRequest::Invoke {
            command,
            resp: resp_tx,
        });
        let timeout = self.timeout;

        Box::pin(async move {
            sent.map_err(|e| InvokeError::Channel(e.to_string()))?;

            let reply = async {
                match resp_rx.await {
                    Ok(result) => result,
                    Err(e) => Err(InvokeError::Channel(e.to_string())),
                }
            };

            match timeout {
                Some(duration) => tokio::time::timeout(duration, reply)
                    .await
                    .map_err(|_| InvokeError::Timeout { duration })?,
                None => reply.await,
            }
        })
    }
}
