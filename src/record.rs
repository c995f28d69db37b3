//! Inspection Record - Flat Field Input
//!
//! A record is whatever the capturing app sends: a flat map of field names to
//! strings and booleans. Unknown keys are ignored by the mapper; missing keys
//! read as absent text or an unticked flag.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field value as it arrives from the capturing application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

/// One inspection instance. Immutable for the duration of a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectionRecord {
    fields: HashMap<String, FieldValue>,
}

impl InspectionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), FieldValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, field: impl Into<String>, value: bool) {
        self.fields.insert(field.into(), FieldValue::Flag(value));
    }

    /// The field's text, or `None` when the field is absent or boolean.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Truthiness of the field: a boolean as-is, text when non-empty,
    /// absent as `false`.
    pub fn flag(&self, field: &str) -> bool {
        match self.fields.get(field) {
            Some(FieldValue::Flag(b)) => *b,
            Some(FieldValue::Text(s)) => !s.is_empty(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for InspectionRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
