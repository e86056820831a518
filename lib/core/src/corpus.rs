//! Corpus store: the static knowledge base grouped by category.
//!
//! Besides the per-category sequences the corpus keeps a flattened index of
//! every record that has a question. Positions in that index are the join
//! key between the vector space, record storage and category lookup, and
//! never change once the corpus is built.

use crate::{Error, KnowledgeRecord, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// A named group of records
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub records: Vec<KnowledgeRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordRef {
    category: usize,
    record: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    categories: Vec<Category>,
    index: Vec<RecordRef>,
}

impl Corpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(category, records)` groups, preserving order.
    /// Groups sharing a name are merged in encounter order.
    pub fn from_categories<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<KnowledgeRecord>)>,
        S: Into<String>,
    {
        let mut categories: Vec<Category> = Vec::new();
        for (name, records) in groups {
            let name = name.into();
            let records: Vec<KnowledgeRecord> = records
                .into_iter()
                .map(|mut record| {
                    record.category = name.clone();
                    record
                })
                .collect();
            match categories.iter_mut().find(|c| c.name == name) {
                Some(existing) => existing.records.extend(records),
                None => categories.push(Category { name, records }),
            }
        }

        let index = categories
            .iter()
            .enumerate()
            .flat_map(|(ci, category)| {
                category
                    .records
                    .iter()
                    .enumerate()
                    .filter(|(_, record)| record.has_question())
                    .map(move |(ri, _)| RecordRef {
                        category: ci,
                        record: ri,
                    })
            })
            .collect();

        Self { categories, index }
    }

    /// Parse a corpus document: a JSON object mapping category name to an
    /// array of record objects. Non-array categories and malformed records
    /// are skipped rather than failing the load.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidCorpus(format!(
                    "expected an object of categories, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut groups = Vec::with_capacity(object.len());
        for (name, items) in object {
            let items = match items {
                Value::Array(items) => items,
                other => {
                    debug!("Skipping category {:?}: value is {}", name, json_kind(&other));
                    continue;
                }
            };

            let mut records = Vec::with_capacity(items.len());
            for (position, item) in items.into_iter().enumerate() {
                if !item.is_object() {
                    warn!("Skipping {}[{}]: record is not an object", name, position);
                    continue;
                }
                match serde_json::from_value::<KnowledgeRecord>(item) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!("Skipping {}[{}]: {}", name, position, e),
                }
            }
            groups.push((name, records));
        }

        Ok(Self::from_categories(groups))
    }

    /// Number of matchable records (the flattened index length)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total records stored, including those without a question
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.categories.iter().map(|c| c.records.len()).sum()
    }

    /// Record at a flattened index position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&KnowledgeRecord> {
        let r = self.index.get(index)?;
        self.categories.get(r.category)?.records.get(r.record)
    }

    /// Category name of the record at a flattened index position
    #[must_use]
    pub fn category_of(&self, index: usize) -> Option<&str> {
        let r = self.index.get(index)?;
        self.categories.get(r.category).map(|c| c.name.as_str())
    }

    /// Questions in flattened index order
    pub fn questions(&self) -> impl Iterator<Item = &str> + '_ {
        self.index
            .iter()
            .map(move |r| self.categories[r.category].records[r.record].question.as_str())
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
