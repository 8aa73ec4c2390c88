//! Translation resource model: nested tables of German display text.
//!
//! A resource mirrors one namespace's JSON document. Keys map either to leaf
//! text or to a nested table, arbitrarily deep, and nothing else: numbers,
//! booleans, nulls and arrays are rejected at parse time so a malformed
//! document is caught before it reaches a page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One namespace's content: keys mapping to leaf text or nested tables.
///
/// Backed by a `BTreeMap` so serialized output and iteration order are
/// stable, which keeps test fixtures and diffs of published documents
/// readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationResource(BTreeMap<String, TranslationValue>);

/// A single entry in a translation resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    /// Leaf text shown to the user
    Text(String),
    /// A nested table of further keys
    Nested(TranslationResource),
}

impl TranslationResource {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// True when the resource has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level entries (nested tables count as one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&TranslationValue> {
        self.0.get(key)
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: TranslationValue,
    ) -> Option<TranslationValue> {
        self.0.insert(key.into(), value)
    }

    /// Iterate over the top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TranslationValue)> {
        self.0.iter()
    }

    /// Look up leaf text by dotted path, e.g. `"contact.address.city"`.
    ///
    /// Returns `None` when any segment is missing, when an intermediate
    /// segment is leaf text, or when the final segment is a table.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            match current.get(segment)? {
                TranslationValue::Text(text) => {
                    return if segments.peek().is_none() {
                        Some(text.as_str())
                    } else {
                        None
                    };
                }
                TranslationValue::Nested(nested) => {
                    if segments.peek().is_none() {
                        return None;
                    }
                    current = nested;
                }
            }
        }
        None
    }

    /// Flatten every leaf into `(dotted path, text)` pairs, in key order.
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut leaves = Vec::new();
        self.collect_leaves("", &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, leaves: &mut Vec<(String, &'a str)>) {
        for (key, value) in &self.0 {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                TranslationValue::Text(text) => leaves.push((path, text.as_str())),
                TranslationValue::Nested(nested) => nested.collect_leaves(&path, leaves),
            }
        }
    }
}
