//! Search result types and payload decoding.
//!
//! The backend has shipped two result shapes over time: bare path strings and
//! `(path, favorited)` pairs. The client only works with the pair form;
//! bare strings are adapted here, at the boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;

/// A single match returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Absolute or index-relative path of the match.
    pub path: String,

    /// Backend favorite flag at the moment the result was returned.
    #[serde(default)]
    pub favorited: bool,
}

impl SearchResult {
    /// Create a new result.
    pub fn new(path: impl Into<String>, favorited: bool) -> Self {
        Self {
            path: path.into(),
            favorited,
        }
    }

    /// Decode one element of a result array.
    ///
    /// Accepts `["path", bool]`, `{"path": "...", "favorited": bool}` and the
    /// legacy bare `"path"` (not favorited).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(path) => Some(Self::new(path.clone(), false)),
            Value::Array(pair) => match pair.as_slice() {
                [Value::String(path), Value::Bool(favorited)] => {
                    Some(Self::new(path.clone(), *favorited))
                }
                _ => None,
            },
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

/// Decode a whole search payload.
///
/// The payload must be an array and every element must decode; otherwise the
/// entire payload is rejected so no partial result set is ever displayed.
/// Order and duplicates are preserved as received.
pub fn decode_results(payload: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let Value::Array(items) = payload else {
        return Err(SearchError::MalformedResponse {
            detail: format!("expected array, got {}", kind_of(payload)),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            SearchResult::from_value(item).ok_or_else(|| SearchError::MalformedResponse {
                detail: format!("unrecognized result at index {}: {}", index, item),
            })
        })
        .collect()
}

/// JavaScript-style truthiness, used for star/unstar acknowledgements.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
