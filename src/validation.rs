//! Interface boundary for external schema validators.
//!
//! This crate shapes and escapes its output so that schema validation can
//! pass; the validation engines themselves (JSON Schema, XML Schema) live
//! behind this trait in other crates.

use serde::Serialize;

/// A single validation failure reported by an external validator.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Optional structured payload for debugging (e.g. the validator's raw
    /// error object).
    pub data: Option<serde_json::Value>,
}

impl ValidationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A document validator for one schema version and format.
pub trait Validator {
    /// Check a rendered document. `None` means the document is valid.
    fn validate(&self, document: &str) -> Option<ValidationError>;
}
