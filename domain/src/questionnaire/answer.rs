//! Answer store
//!
//! Answers are stored as strings keyed by question key, in question order.
//! Composite answers (multi-select sets, contact info) are serialized as JSON
//! text inside the stored string, so the whole set round-trips as one flat
//! structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel stored when an optional question was explicitly skipped.
///
/// Readers that want the caregiver's words should go through
/// [`AnswerSet::text`], which treats this value as "not provided".
pub const SKIPPED: &str = "__skipped__";

/// A submitted answer value, before validation and storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    /// Free-form or single-choice text
    Text(String),
    /// Multi-select choices, marker already expanded away
    Selections(Vec<String>),
    /// Contact sub-field values keyed by sub-field key
    Contact(BTreeMap<String, String>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }
}

/// One stored answer: `{ key, value }` with the value always a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub key: String,
    pub value: String,
}

/// Ordered mapping from question key to stored answer value
///
/// Re-submitting a key overwrites the prior value in place, preserving the
/// original position so the set serializes in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, overwriting any prior value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.answers.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.value = value,
            None => self.answers.push(Answer { key, value }),
        }
    }

    /// Store the skip sentinel for an explicitly skipped question
    pub fn insert_skipped(&mut self, key: impl Into<String>) {
        self.insert(key, SKIPPED);
    }

    /// Store a multi-select answer as a JSON array
    pub fn insert_selections(&mut self, key: impl Into<String>, selections: &[String]) {
        let json = serde_json::to_string(selections).unwrap_or_else(|_| "[]".to_string());
        self.insert(key, json);
    }

    /// Store a contact answer as a JSON object
    pub fn insert_contact(&mut self, key: impl Into<String>, fields: &BTreeMap<String, String>) {
        let json = serde_json::to_string(fields).unwrap_or_else(|_| "{}".to_string());
        self.insert(key, json);
    }

    /// Raw stored value, including the skip sentinel when present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Stored text, with absent and skipped both reading as `None`
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| *v != SKIPPED)
    }

    pub fn is_skipped(&self, key: &str) -> bool {
        self.get(key) == Some(SKIPPED)
    }

    /// Decode a multi-select answer back into its choices
    pub fn selections(&self, key: &str) -> Option<Vec<String>> {
        let raw = self.text(key)?;
        serde_json::from_str(raw).ok()
    }

    /// Decode a contact answer back into its sub-field map
    pub fn contact(&self, key: &str) -> Option<BTreeMap<String, String>> {
        let raw = self.text(key)?;
        serde_json::from_str(raw).ok()
    }

    /// One sub-field of a contact answer
    pub fn contact_field(&self, key: &str, field: &str) -> Option<String> {
        self.contact(key).and_then(|m| m.get(field).cloned())
    }

    pub fn remove(&mut self, key: &str) {
        self.answers.retain(|a| a.key != key);
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }
}
