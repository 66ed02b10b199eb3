//! Profile Data Model
//!
//! A profile is a progressively populated mapping from field name to value.
//! Values are a small tagged union so the sanitizer can reason about the
//! shape of what it is about to persist, while still serializing as a plain
//! JSON object for the external store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::schema;

/// A single profile value.
///
/// Serialized untagged so that `{"age": 31, "spiritual_org": ["ISKCON"]}`
/// round-trips without wrapper objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Borrow the value as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the value as a list, if it is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Integer view. Whole floats and numeric text are accepted.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// True for null, whitespace-only text and empty lists.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Render the value the way it would be read back to a user.
    ///
    /// Returns `None` for null; lists are joined with `", "`.
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Text(s) => Some(s.clone()),
            Self::List(items) => Some(items.join(", ")),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// A profile snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    fields: BTreeMap<String, FieldValue>,
}

impl Profile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from `(name, value)` pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Text value of a field, if the field holds text
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Trimmed, non-empty display string for any scalar or list field
    pub fn display(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(FieldValue::to_display_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Field names currently present, in sorted order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compute the partial update that turns `before` into `self`.
    pub fn diff(&self, before: &Profile) -> ProfilePatch {
        let mut patch = ProfilePatch::default();
        for (name, value) in &self.fields {
            if before.fields.get(name) != Some(value) {
                patch.set.insert(name.clone(), value.clone());
            }
        }
        for name in before.fields.keys() {
            if !self.fields.contains_key(name) {
                patch.removed.push(name.clone());
            }
        }
        patch
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &ProfilePatch) {
        for name in &patch.removed {
            self.fields.remove(name);
        }
        for (name, value) in &patch.set {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}

/// A partial profile update handed to the profile store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// Fields written or overwritten
    #[serde(default)]
    pub set: BTreeMap<String, FieldValue>,
    /// Fields deleted outright
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.removed.is_empty()
    }

    /// Number of touched fields
    pub fn len(&self) -> usize {
        self.set.len() + self.removed.len()
    }

    /// Every written key must be a schema field, and no key may be both
    /// written and removed. Removals may name deprecated fields.
    pub fn validate(&self) -> CoreResult<()> {
        for name in self.set.keys() {
            schema::require_field(name)?;
            if self.removed.contains(name) {
                return Err(CoreError::invalid_patch(format!(
                    "{} is both set and removed",
                    name
                )));
            }
        }
        Ok(())
    }
}
