//! Desktop integrations served over the command channel.
//!
//! `open_file`, `open_dir` and `open_vscode` are handled locally: the system
//! handler opens files and folders, and the configured editor command is
//! launched for "open in editor".

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use elf_core::{EditorConfig, InvokeError};
use serde_json::Value;

use crate::channel::CommandHost;
use crate::command::Command;

/// Command host for the OS integrations.
#[derive(Debug, Clone)]
pub struct DesktopHost {
    editor_command: String,
}

impl DesktopHost {
    pub fn new(editor_command: impl Into<String>) -> Self {
        Self {
            editor_command: editor_command.into(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.command.clone())
    }

    fn open_file(&self, name: &str) -> Result<(), InvokeError> {
        let path = existing_path("open_file", name)?;
        open_with_system("open_file", &path)
    }

    fn open_dir(&self, name: &str) -> Result<(), InvokeError> {
        let path = existing_path("open_dir", name)?;
        open_with_system("open_dir", &dir_to_open(&path))
    }

    fn open_in_editor(&self, path: &str) -> Result<(), InvokeError> {
        let path = existing_path("open_vscode", path)?;
        let launch_failed = |e: std::io::Error| {
            InvokeError::rejected(
                "open_vscode",
                format!("failed to launch '{}': {}", self.editor_command, e),
            )
        };

        // Editor launchers hand off to a running instance and exit; wait so
        // the child is reaped.
        let status = std::process::Command::new(&self.editor_command)
            .arg(&path)
            .spawn()
            .and_then(|mut child| child.wait())
            .map_err(launch_failed)?;

        if !status.success() {
            tracing::warn!(editor = %self.editor_command, %status, "Editor exited with failure");
            return Err(InvokeError::rejected(
                "open_vscode",
                format!("'{}' exited with {}", self.editor_command, status),
            ));
        }
        tracing::info!(editor = %self.editor_command, path = %path.display(), "Editor launched");
        Ok(())
    }
}

impl Default for DesktopHost {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

#[async_trait]
impl CommandHost for DesktopHost {
    async fn handle(&self, command: Command) -> Result<Value, InvokeError> {
        let host = self.clone();
        let operation = command.name();

        tokio::task::spawn_blocking(move || match command {
            Command::OpenFile { name } => host.open_file(&name),
            Command::OpenDir { name } => host.open_dir(&name),
            Command::OpenVscode { path } => host.open_in_editor(&path),
            other => Err(InvokeError::Unsupported {
                operation: other.name().to_string(),
            }),
        })
        .await
        .map_err(|e| InvokeError::rejected(operation, e.to_string()))??;

        Ok(Value::Null)
    }
}

/// The directory to show for `path`: itself if it is a directory, otherwise
/// its parent (or the current directory for a bare file name).
pub fn dir_to_open(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn existing_path(operation: &'static str, name: &str) -> Result<PathBuf, InvokeError> {
    let path = PathBuf::from(name);
    if path.exists() {
        Ok(path)
    } else {
        tracing::warn!(operation, path = %name, "Path does not exist");
        Err(InvokeError::rejected(
            operation,
            format!("path does not exist: {}", name),
        ))
    }
}

fn open_with_system(operation: &'static str, path: &Path) -> Result<(), InvokeError> {
    open::that(path).map_err(|e| {
        tracing::warn!(operation, path = %path.display(), "Failed to open: {}", e);
        InvokeError::rejected(operation, e.to_string())
    })?;
    tracing::info!(operation, path = %path.display(), "Opened");
    Ok(())
}
