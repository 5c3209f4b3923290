//! Saved session domain model.
//!
//! # Responsibility
//! - Define the immutable snapshot produced by a successful save.
//! - Own the persisted field naming (`entries`, `wordCount`).
//!
//! # Invariants
//! - Fields never change after the record enters the session store.
//! - `id` is the only lookup/deletion key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Stable identifier of a saved session.
///
/// Value is a millisecond timestamp, bumped when needed so ids are strictly
/// increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self)
    }
}

/// Immutable snapshot of one finished editing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub title: String,
    /// Calendar date captured at save time (`YYYY-MM-DD`).
    pub date: String,
    /// Prompt key to response text.
    #[serde(rename = "entries")]
    pub responses: BTreeMap<String, String>,
    pub reflection: String,
    #[serde(rename = "wordCount")]
    pub word_count: usize,
}

/// Counts whitespace-separated tokens across all responses and the reflection.
pub fn count_words<'a>(responses: impl IntoIterator<Item = &'a String>, reflection: &str) -> usize {
    responses
        .into_iter()
        .map(|text| text.split_whitespace().count())
        .sum::<usize>()
        + reflection.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::{count_words, SessionId, SessionRecord};
    use std::collections::BTreeMap;

    #[test]
    fn count_words_ignores_blank_texts_and_repeated_whitespace() {
        let responses = vec![
            "hello world".to_string(),
            "   ".to_string(),
            "one\n\ttwo  three".to_string(),
        ];
        assert_eq!(count_words(&responses, ""), 5);
        assert_eq!(count_words(&responses, " final words "), 7);
    }

    #[test]
    fn record_serializes_with_persisted_field_names() {
        let mut responses = BTreeMap::new();
        responses.insert("G".to_string(), "hello".to_string());
        let record = SessionRecord {
            id: SessionId::new(1_700_000_000_000),
            title: "My Day".to_string(),
            date: "2026-01-01".to_string(),
            responses,
            reflection: String::new(),
            word_count: 1,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 1_700_000_000_000_i64);
        assert_eq!(value["entries"]["G"], "hello");
        assert_eq!(value["wordCount"], 1);
        assert!(value.get("responses").is_none());
    }

    #[test]
    fn session_id_parses_trimmed_integer_text() {
        let id: SessionId = " 42 ".parse().unwrap();
        assert_eq!(id, SessionId::new(42));
        assert!("abc".parse::<SessionId>().is_err());
    }
}
