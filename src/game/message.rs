//! Message log
//!
//! A bounded stream of structured events for the UI collaborator to render.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Info,
    Success,
    Combat,
    Warning,
    Error,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
    /// Turn on which the message was queued
    pub turn: u64,
}

/// Newest-first message log with a fixed capacity
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<GameMessage>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Add a message, dropping the oldest once full
    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory, turn: u64) {
        self.entries.push_front(GameMessage {
            text: text.into(),
            category,
            turn,
        });
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Messages, newest first
    pub fn iter(&self) -> impl Iterator<Item = &GameMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any retained message has exactly this text
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|m| m.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = MessageLog::new(10);
        log.push("first", MessageCategory::Info, 0);
        log.push("second", MessageCategory::Combat, 1);
        let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
        assert_eq!(log.iter().next().map(|m| m.turn), Some(1));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = MessageLog::new(3);
        for i in 0..5 {
            log.push(format!("m{}", i), MessageCategory::Info, i);
        }
        assert_eq!(log.len(), 3);
        assert!(!log.contains("m0"));
        assert!(!log.contains("m1"));
        assert!(log.contains("m4"));
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&MessageCategory::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
