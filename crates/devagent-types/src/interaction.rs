//! Interaction log record types.
//!
//! An [`InteractionRecord`] is one agent invocation: the text handed to the
//! backend, the text it produced, and the feature that produced it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Which agent feature produced a record.
///
/// The set is closed; the serialized names are shared with exported blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "TEST_GENERATOR")]
    TestGeneration,
    #[serde(rename = "DEBUGGER")]
    Debugging,
    #[serde(rename = "CODE_REVIEW")]
    Review,
    #[serde(rename = "LOG_ANALYZER")]
    LogAnalysis,
    #[serde(rename = "REFACTOR_BOT")]
    Refactor,
    #[serde(rename = "CHAT_ASSISTANT")]
    Chat,
}

impl Category {
    /// Every category, in dashboard order.
    pub const ALL: [Category; 6] = [
        Category::TestGeneration,
        Category::Debugging,
        Category::Review,
        Category::Refactor,
        Category::LogAnalysis,
        Category::Chat,
    ];

    /// Short human label used by dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Category::TestGeneration => "Tests",
            Category::Debugging => "Debugs",
            Category::Review => "Reviews",
            Category::LogAnalysis => "Logs",
            Category::Refactor => "Refactor",
            Category::Chat => "Chat",
        }
    }

    /// Command-line slug, accepted back by [`FromStr`].
    pub fn slug(self) -> &'static str {
        match self {
            Category::TestGeneration => "tests",
            Category::Debugging => "debugging",
            Category::Review => "review",
            Category::LogAnalysis => "logs",
            Category::Refactor => "refactor",
            Category::Chat => "chat",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tests" | "test" | "test-generation" | "test_generator" => Ok(Category::TestGeneration),
            "debugging" | "debug" | "debugger" => Ok(Category::Debugging),
            "review" | "code-review" | "code_review" => Ok(Category::Review),
            "logs" | "log-analysis" | "log_analyzer" => Ok(Category::LogAnalysis),
            "refactor" | "refactor_bot" => Ok(Category::Refactor),
            "chat" | "chat_assistant" => Ok(Category::Chat),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// One logged agent invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    /// Unique within a log. Opaque; imported logs may carry non-UUID ids.
    pub id: String,
    /// Feature that produced the record.
    #[serde(alias = "type")]
    pub category: Category,
    /// Prompt or source handed to the backend.
    pub input: String,
    /// Backend response.
    pub output: String,
    /// Milliseconds since the Unix epoch. Not strictly increasing.
    #[serde(alias = "timestamp")]
    pub created_at: i64,
    /// Auxiliary key/value pairs, never interpreted by the log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl InteractionRecord {
    /// Create a record with a fresh id, stamped with the given time.
    pub fn new(
        category: Category,
        input: impl Into<String>,
        output: impl Into<String>,
        metadata: Option<Map<String, Value>>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            input: input.into(),
            output: output.into(),
            created_at,
            metadata,
        }
    }

    /// Create a record stamped with the current wall-clock time.
    pub fn now(
        category: Category,
        input: impl Into<String>,
        output: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        Self::new(category, input, output, metadata, Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::Debugging).unwrap(),
            "\"DEBUGGER\""
        );
        let parsed: Category = serde_json::from_str("\"CHAT_ASSISTANT\"").unwrap();
        assert_eq!(parsed, Category::Chat);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("debugging".parse::<Category>().unwrap(), Category::Debugging);
        assert_eq!("CHAT".parse::<Category>().unwrap(), Category::Chat);
        assert_eq!(" logs ".parse::<Category>().unwrap(), Category::LogAnalysis);
        assert!("dashboard".parse::<Category>().is_err());

        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = InteractionRecord::new(Category::Review, "fn a() {}", "looks fine", None, 42);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["category"], "CODE_REVIEW");
        assert_eq!(value["createdAt"], 42);
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_record_accepts_legacy_field_names() {
        let legacy = json!({
            "id": "k3j4h5",
            "type": "DEBUGGER",
            "input": "panic at main.rs:3",
            "output": "index out of bounds",
            "timestamp": 1_700_000_000_000i64,
            "metadata": { "language": "rust" }
        });

        let record: InteractionRecord = serde_json::from_value(legacy).unwrap();
        assert_eq!(record.id, "k3j4h5");
        assert_eq!(record.category, Category::Debugging);
        assert_eq!(record.created_at, 1_700_000_000_000);
        assert_eq!(record.metadata.unwrap()["language"], "rust");
    }

    #[test]
    fn test_new_records_get_distinct_ids() {
        let a = InteractionRecord::now(Category::Chat, "a", "b", None);
        let b = InteractionRecord::now(Category::Chat, "a", "b", None);
        assert_ne!(a.id, b.id);
    }
}
