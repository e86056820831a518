// In-memory log of answered queries, keyed by conversation id
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

pub const DEFAULT_CONVERSATION_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversationEntry {
    pub id: String,
    pub query: String,
    pub response: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

struct Inner {
    entries: HashMap<String, ConversationEntry>,
    order: VecDeque<String>,
}

/// Bounded history; the oldest entry is evicted once capacity is reached.
/// Only consulted to enrich feedback, never for matching.
pub struct ConversationLog {
    inner: RwLock<Inner>,
    capacity: usize,
}

impl ConversationLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Store a query/response pair and return its new conversation id
    pub fn record(&self, query: &str, response: serde_json::Value) -> String {
        let id = Uuid::new_v4().to_string();
        let entry = ConversationEntry {
            id: id.clone(),
            query: query.to_string(),
            response,
            timestamp: Utc::now(),
        };

        let mut inner = self.inner.write();
        while inner.order.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
        inner.order.push_back(id.clone());
        inner.entries.insert(id.clone(), entry);
        id
    }

    pub fn get(&self, id: &str) -> Option<ConversationEntry> {
        self.inner.read().entries.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSATION_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_and_get() {
        let log = ConversationLog::default();
        let id = log.record("exm fee", json!({ "answer": "Rs. 500" }));

        let entry = log.get(&id).unwrap();
        assert_eq!(entry.query, "exm fee");
        assert_eq!(entry.response["answer"], "Rs. 500");
        assert!(log.get("unknown").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let log = ConversationLog::default();
        let a = log.record("q", json!({}));
        let b = log.record("q", json!({}));
        assert_ne!(a, b);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let log = ConversationLog::new(2);
        let first = log.record("one", json!(1));
        let second = log.record("two", json!(2));
        let third = log.record("three", json!(3));

        assert_eq!(log.len(), 2);
        assert!(log.get(&first).is_none());
        assert!(log.get(&second).is_some());
        assert!(log.get(&third).is_some());
    }
}
