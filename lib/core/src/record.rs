use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// A single question/answer entry of the knowledge base.
///
/// Records are created once while the corpus is loaded and never mutated.
/// `category` is not part of the stored object; it is assigned from the
/// group the record was found under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct KnowledgeRecord {
    #[serde(default)]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub answer: String,
    #[serde(skip)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub links: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub additional_info: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub important_notes: Vec<String>,
}

impl KnowledgeRecord {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_additional_info(mut self, info: Vec<String>) -> Self {
        self.additional_info = info;
        self
    }

    #[must_use]
    pub fn with_important_notes(mut self, notes: Vec<String>) -> Self {
        self.important_notes = notes;
        self
    }

    /// Whether this record takes part in matching
    #[inline]
    #[must_use]
    pub fn has_question(&self) -> bool {
        !self.question.trim().is_empty()
    }
}

/// Text field that tolerates `null` and scalars
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other @ (Value::Number(_) | Value::Bool(_)) => other.to_string(),
        other => {
            warn!("Ignoring non-text answer: {}", other);
            String::new()
        }
    })
}

/// List field that tolerates `null`, a bare string and non-string items.
/// Anything unusable becomes an empty list instead of rejecting the record.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                scalar @ (Value::Number(_) | Value::Bool(_)) => Some(scalar.to_string()),
                other => {
                    warn!("Dropping non-text list item: {}", other);
                    None
                }
            })
            .collect(),
        other => {
            warn!("Ignoring list field holding {}", other);
            Vec::new()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_optional_fields_missing() {
        let record: KnowledgeRecord = serde_json::from_value(serde_json::json!({
            "question": "What is the examination fee?",
            "answer": "Rs. 500 per course"
        }))
        .unwrap();

        assert_eq!(record.question, "What is the examination fee?");
        assert!(record.links.is_empty());
        assert!(record.steps.is_empty());
        assert!(record.category.is_empty());
    }

    #[test]
    fn test_missing_question_is_not_matchable() {
        let record: KnowledgeRecord =
            serde_json::from_value(serde_json::json!({ "answer": "orphan" })).unwrap();
        assert!(!record.has_question());
        assert!(!KnowledgeRecord::new("   ", "blank").has_question());
    }

    #[test]
    fn test_malformed_optional_fields_keep_record() {
        let record: KnowledgeRecord = serde_json::from_value(serde_json::json!({
            "question": "What is the examination fee?",
            "answer": null,
            "links": null,
            "steps": "Pay online",
            "additional_info": 7,
            "important_notes": ["Late fee applies", 500, {"x": 1}]
        }))
        .unwrap();

        assert!(record.has_question());
        assert!(record.answer.is_empty());
        assert!(record.links.is_empty());
        assert_eq!(record.steps, vec!["Pay online"]);
        assert!(record.additional_info.is_empty());
        assert_eq!(record.important_notes, vec!["Late fee applies", "500"]);
    }
}
