use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::Field;

#[derive(Debug, Error)]
pub enum TradeCalcError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TradeCalcError {
    fn from(e: serde_json::Error) -> Self {
        TradeCalcError::SerializationError(e.to_string())
    }
}

impl From<FieldErrors> for TradeCalcError {
    fn from(errors: FieldErrors) -> Self {
        TradeCalcError::Validation(errors)
    }
}

/// Per-field validation failures, keyed by field and ordered by form position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first reason recorded for a field wins.
    pub fn insert(&mut self, field: Field, reason: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| reason.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, r)| (*f, r.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, reason)| format!("{field}: {reason}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
