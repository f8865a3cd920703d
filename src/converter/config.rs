//! Configuration for converter construction and record insertion.

use serde::{Deserialize, Serialize};

use crate::error::{CuriesError, Result};
use crate::reference::DEFAULT_DELIMITER;

/// Configuration for a [`Converter`](super::Converter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// String separating prefix and identifier in a CURIE.
    pub delimiter: String,

    /// Reject records sharing any prefix or URI prefix at construction time.
    /// When false, later records silently shadow earlier ones.
    pub strict: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            strict: true,
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CURIE delimiter.
    pub fn with_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Enable or disable duplicate checking at construction.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(CuriesError::invalid_config(
                "CURIE delimiter must not be empty",
            ));
        }
        Ok(())
    }
}

/// Options for [`Converter::add_record`](super::Converter::add_record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddRecordOptions {
    /// Compare prefixes and URI prefixes case-sensitively when matching the
    /// new record against existing ones.
    pub case_sensitive: bool,

    /// Merge into a uniquely matching existing record instead of failing.
    pub merge: bool,
}

impl Default for AddRecordOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            merge: false,
        }
    }
}

impl AddRecordOptions {
    /// Options that merge into a matching record.
    pub fn merging() -> Self {
        Self {
            merge: true,
            ..Default::default()
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }
}
