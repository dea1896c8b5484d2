//! Commands that cross the invocation boundary.

use serde::{Deserialize, Serialize};

/// One call across the invocation boundary.
///
/// Variant names match the backend's operation names (`search`,
/// `regex_search`, ...). Argument names follow the command bridge
/// convention; the HTTP binding maps them to its own query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Literal or fuzzy lookup in the index.
    Search {
        entry: String,
        #[serde(rename = "isFuzzy")]
        is_fuzzy: bool,
    },

    /// Regex match over indexed paths; the backend pads the pattern with
    /// wildcards at both ends.
    RegexSearch { entry: String },

    /// Smart search, allowed to walk hot directories outside the index.
    HotSearch {
        entry: String,
        #[serde(rename = "isFuzzy")]
        is_fuzzy: bool,
        #[serde(rename = "isRegex")]
        is_regex: bool,
    },

    /// Mark a path as favorite.
    StarPath { path: String },

    /// Remove a path from favorites.
    UnstarPath { path: String },

    /// Open a file with the system handler. Also used for the config file.
    OpenFile { name: String },

    /// Open a directory, or the directory containing a file.
    OpenDir { name: String },

    /// Open a path in the external editor.
    OpenVscode { path: String },
}

impl Command {
    /// Backend operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search { .. } => "search",
            Command::RegexSearch { .. } => "regex_search",
            Command::HotSearch { .. } => "hot_search",
            Command::StarPath { .. } => "star_path",
            Command::UnstarPath { .. } => "unstar_path",
            Command::OpenFile { .. } => "open_file",
            Command::OpenDir { .. } => "open_dir",
            Command::OpenVscode { .. } => "open_vscode",
        }
    }

    /// Whether this is one of the search/favorite operations served by the
    /// search backend (as opposed to a desktop integration).
    pub fn is_backend_operation(&self) -> bool {
        matches!(
            self,
            Command::Search { .. }
                | Command::RegexSearch { .. }
                | Command::HotSearch { .. }
                | Command::StarPath { .. }
                | Command::UnstarPath { .. }
        )
    }

    /// Query parameters used by the HTTP binding, or `None` if the HTTP
    /// service does not expose this operation.
    pub fn http_params(&self) -> Option<Vec<(&'static str, String)>> {
        let params = match self {
            Command::Search { entry, is_fuzzy } => vec![
                ("entry", entry.clone()),
                ("is_fuzzy", is_fuzzy.to_string()),
            ],
            Command::RegexSearch { entry } => vec![("path", entry.clone())],
            Command::HotSearch {
                entry,
                is_fuzzy,
                is_regex,
            } => vec![
                ("entry", entry.clone()),
                ("is_fuzzy", is_fuzzy.to_string()),
                ("is_regex", is_regex.to_string()),
            ],
            Command::StarPath { path } | Command::UnstarPath { path } => {
                vec![("path_data", path.clone())]
            }
            Command::OpenFile { .. } | Command::OpenDir { .. } | Command::OpenVscode { .. } => {
                return None
            }
        };
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names() {
        let cmd = Command::RegexSearch {
            entry: "report".to_string(),
        };
        assert_eq!(cmd.name(), "regex_search");
        assert!(cmd.is_backend_operation());

        let cmd = Command::OpenVscode {
            path: "/tmp".to_string(),
        };
        assert_eq!(cmd.name(), "open_vscode");
        assert!(!cmd.is_backend_operation());
    }

    #[test]
    fn test_bridge_argument_names() {
        let cmd = Command::HotSearch {
            entry: "a".to_string(),
            is_fuzzy: true,
            is_regex: false,
        };
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({"op": "hot_search", "entry": "a", "isFuzzy": true, "isRegex": false})
        );
    }

    #[test]
    fn test_http_params() {
        let cmd = Command::RegexSearch {
            entry: "report".to_string(),
        };
        assert_eq!(cmd.http_params().unwrap(), vec![("path", "report".to_string())]);

        let cmd = Command::Search {
            entry: "x".to_string(),
            is_fuzzy: false,
        };
        assert_eq!(
            cmd.http_params().unwrap(),
            vec![("entry", "x".to_string()), ("is_fuzzy", "false".to_string())]
        );

        let cmd = Command::UnstarPath {
            path: "x/y.txt".to_string(),
        };
        assert_eq!(
            cmd.http_params().unwrap(),
            vec![("path_data", "x/y.txt".to_string())]
        );

        let cmd = Command::OpenDir {
            name: "/tmp".to_string(),
        };
        assert!(cmd.http_params().is_none());
    }
}
