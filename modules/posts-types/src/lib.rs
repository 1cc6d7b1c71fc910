//! Shared types for the posts service and its HTTP clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// =====================================================
// Domain Types
// =====================================================

/// A stored post record.
///
/// Records are kept as the JSON object the client sent, with `id` assigned by
/// the store. Fields other than `id`, `title` and `content` are carried along
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(Map<String, Value>);

impl Post {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Numeric id of the record, if it carries one.
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn set_id(&mut self, id: u64) {
        self.0.insert("id".to_string(), Value::from(id));
    }

    pub fn title(&self) -> Option<&Value> {
        self.0.get("title")
    }

    pub fn content(&self) -> Option<&Value> {
        self.0.get("content")
    }

    /// Overwrites `title` and `content` with whatever the patch provides.
    pub fn apply(&mut self, patch: &PostPatch) {
        if let Some(title) = &patch.title {
            self.0.insert("title".to_string(), title.clone());
        }
        if let Some(content) = &patch.content {
            self.0.insert("content".to_string(), content.clone());
        }
    }
}

/// Partial update of a post. Only `title` and `content` are ever applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl PostPatch {
    /// Picks `title` and `content` out of a decoded body. An explicit `null`
    /// counts as present and is written through.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            title: fields.get("title").cloned(),
            content: fields.get("content").cloned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// How the search handles records that do not match the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Scan in collection order and fail with not-found on the first record
    /// that does not match, dropping any matches collected so far.
    #[default]
    Parity,
    /// Collect every matching record; not-found only when nothing matches.
    Filter,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Parity => write!(f, "parity"),
            SearchMode::Filter => write!(f, "filter"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parity" => Ok(SearchMode::Parity),
            "filter" => Ok(SearchMode::Filter),
            other => Err(format!("Unknown search mode: {}", other)),
        }
    }
}

// =====================================================
// Request Types
// =====================================================

/// Query string of `GET /posts/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub content: Option<String>,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub id: u64,
    pub message: String,
}

impl DeleteConfirmation {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            message: format!("Post with id {} has been deleted successfully.", id),
        }
    }
}

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Ids of stored records that failed validation (`null` when a record has no id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_ids: Option<Vec<Option<u64>>>,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            invalid_ids: None,
        }
    }
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub total_posts: usize,
    pub search_mode: SearchMode,
}
