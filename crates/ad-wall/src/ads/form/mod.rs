mod config;
mod layout;
mod rules;

pub use config::{FieldDescriptor, FieldKind, FieldPattern, FormConfig, FormConfigError, StepHint};
pub use layout::{Control, FieldLayout, TEXTAREA_ROWS};
pub use rules::RuleKind;

pub(crate) use rules::invalid_message;

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::domain::{AdDraft, AdField};

/// Per-field messages produced by a validation pass; empty means the candidate may be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<AdField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: AdField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AdField, String> {
        self.0.iter()
    }

    /// Keeps the first message recorded for a field.
    pub(crate) fn record(&mut self, field: AdField, message: String) {
        self.0.entry(field).or_insert(message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a AdField, &'a String);
    type IntoIter = btree_map::Iter<'a, AdField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Runs the rule table over every declared field in order.
pub fn validate(config: &FormConfig, candidate: &AdDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in config.fields() {
        let value = candidate.value_of(field.name);
        if let Some((_, message)) = rules::first_violation(field, &value) {
            errors.record(field.name, message);
        }
    }
    errors
}

impl FormConfig {
    pub fn validate(&self, candidate: &AdDraft) -> FieldErrors {
        validate(self, candidate)
    }
}
