//! HTTP binding of the invocation boundary.
//!
//! The local search service exposes the five search/favorite operations as
//! `GET {endpoint}/{operation}?...`. Desktop integrations are not served over
//! HTTP and are reported as unsupported.

use std::time::Duration;

use elf_core::{InvokeError, ServiceConfig};
use futures::future::BoxFuture;
use serde_json::Value;

use crate::command::Command;
use crate::invoker::Invoker;

/// Invoker backed by the local search service.
#[derive(Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    hot_search_timeout: Duration,
}

impl HttpInvoker {
    /// Create an invoker for `endpoint`, e.g. `http://127.0.0.1:6789/file_elf`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(5),
            hot_search_timeout: Duration::from_secs(60),
        }
    }

    /// Create from service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.endpoint.clone())
            .with_timeout(config.timeout())
            .with_hot_search_timeout(config.hot_search_timeout())
    }

    /// Create with a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout for `hot_search` only.
    pub fn with_hot_search_timeout(mut self, timeout: Duration) -> Self {
        self.hot_search_timeout = timeout;
        self
    }

    /// The timeout applied to `command`.
    pub fn timeout_for(&self, command: &Command) -> Duration {
        match command {
            Command::HotSearch { .. } => self.hot_search_timeout,
            _ => self.timeout,
        }
    }

    /// The normalized endpoint (no trailing slash).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URL for an operation.
    pub fn url_for(&self, operation: &str) -> String {
        format!("{}/{}", self.endpoint, operation)
    }
}

impl Invoker for HttpInvoker {
    fn invoke(&self, command: Command) -> BoxFuture<'static, Result<Value, InvokeError>> {
        let operation = command.name();
        let Some(params) = command.http_params() else {
            return Box::pin(async move {
                Err(InvokeError::Unsupported {
                    operation: operation.to_string(),
                })
            });
        };

        let request = self
            .client
            .get(self.url_for(operation))
            .query(&params)
            .timeout(self.timeout_for(&command));
        let timeout = self.timeout_for(&command);

        Box::pin(async move {
            tracing::debug!(operation, ?params, "HTTP invoke");

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    InvokeError::Timeout { duration: timeout }
                } else {
                    InvokeError::Transport(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(InvokeError::rejected(
                    operation,
                    format!("HTTP {}", status),
                ));
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| InvokeError::Decode(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one request with a fixed response and hand back the
    /// request head that was received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut head = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                head.extend_from_slice(&buf[..n]);
                if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).to_string()
        });

        (format!("http://{}/file_elf", addr), handle)
    }

    #[test]
    fn test_url_building() {
        let invoker = HttpInvoker::new("http://127.0.0.1:6789/file_elf/");
        assert_eq!(invoker.endpoint(), "http://127.0.0.1:6789/file_elf");
        assert_eq!(
            invoker.url_for("regex_search"),
            "http://127.0.0.1:6789/file_elf/regex_search"
        );
    }

    #[test]
    fn test_hot_search_gets_its_own_timeout() {
        let invoker = HttpInvoker::from_config(&ServiceConfig::default());
        let hot = Command::HotSearch {
            entry: "x".to_string(),
            is_fuzzy: false,
            is_regex: false,
        };
        let plain = Command::Search {
            entry: "x".to_string(),
            is_fuzzy: false,
        };
        assert_eq!(invoker.timeout_for(&hot), Duration::from_secs(60));
        assert_eq!(invoker.timeout_for(&plain), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_slow_hot_search_within_its_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            tokio::time::sleep(Duration::from_millis(300)).await;
            let body = r#"["hot/a.txt"]"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        let invoker = HttpInvoker::new(format!("http://{}/file_elf", addr))
            .with_timeout(Duration::from_millis(100))
            .with_hot_search_timeout(Duration::from_secs(10));
        let payload = invoker
            .invoke(Command::HotSearch {
                entry: "a".to_string(),
                is_fuzzy: false,
                is_regex: false,
            })
            .await
            .unwrap();
        assert_eq!(payload, json!(["hot/a.txt"]));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_open_commands_unsupported() {
        let invoker = HttpInvoker::new("http://127.0.0.1:1/file_elf");
        let err = invoker
            .invoke(Command::OpenFile {
                name: "base.toml".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Unsupported { operation } if operation == "open_file"));
    }

    #[tokio::test]
    async fn test_search_request_and_payload() {
        let (endpoint, server) = serve_once("200 OK", r#"[["a/b.txt",true],["c/d.txt",false]]"#).await;
        let invoker = HttpInvoker::new(endpoint);

        let payload = invoker
            .invoke(Command::Search {
                entry: "b.txt".to_string(),
                is_fuzzy: true,
            })
            .await
            .unwrap();
        assert_eq!(payload, json!([["a/b.txt", true], ["c/d.txt", false]]));

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /file_elf/search?entry=b.txt&is_fuzzy=true "));
    }

    #[tokio::test]
    async fn test_regex_search_uses_path_param() {
        let (endpoint, server) = serve_once("200 OK", r#"["report.pdf"]"#).await;
        let invoker = HttpInvoker::new(endpoint);

        invoker
            .invoke(Command::RegexSearch {
                entry: "report".to_string(),
            })
            .await
            .unwrap();

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /file_elf/regex_search?path=report "));
    }

    #[tokio::test]
    async fn test_server_error_is_rejection() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "{}").await;
        let invoker = HttpInvoker::new(endpoint);

        let err = invoker
            .invoke(Command::StarPath {
                path: "x/y.txt".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Rejected { .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (endpoint, server) = serve_once("200 OK", "not json").await;
        let invoker = HttpInvoker::new(endpoint);

        let err = invoker
            .invoke(Command::Search {
                entry: "x".to_string(),
                is_fuzzy: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let invoker = HttpInvoker::new(format!("http://{}/file_elf", addr));
        let err = invoker
            .invoke(Command::Search {
                entry: "x".to_string(),
                is_fuzzy: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Transport(_)));
    }
}
