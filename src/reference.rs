//! A prefix paired with a local identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CuriesError, Result};

/// Default CURIE delimiter.
pub const DEFAULT_DELIMITER: &str = ":";

/// A prefix (naming a semantic space) and a local unique identifier in that
/// space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceTuple {
    pub prefix: String,
    pub identifier: String,
}

impl ReferenceTuple {
    pub fn new<P: Into<String>, I: Into<String>>(prefix: P, identifier: I) -> Self {
        ReferenceTuple {
            prefix: prefix.into(),
            identifier: identifier.into(),
        }
    }

    /// Split a CURIE on the first occurrence of `delimiter`.
    pub fn from_curie(curie: &str, delimiter: &str) -> Result<Self> {
        if delimiter.is_empty() {
            return Err(CuriesError::invalid_config("CURIE delimiter must not be empty"));
        }
        let (prefix, identifier) = curie
            .split_once(delimiter)
            .ok_or_else(|| CuriesError::no_delimiter(curie))?;
        Ok(ReferenceTuple::new(prefix, identifier))
    }

    /// Format with the default `:` delimiter.
    pub fn curie(&self) -> String {
        self.format(DEFAULT_DELIMITER)
    }

    pub fn format(&self, delimiter: &str) -> String {
        format!("{}{}{}", self.prefix, delimiter, self.identifier)
    }
}

impl fmt::Display for ReferenceTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, DEFAULT_DELIMITER, self.identifier)
    }
}

impl From<(String, String)> for ReferenceTuple {
    fn from((prefix, identifier): (String, String)) -> Self {
        ReferenceTuple { prefix, identifier }
    }
}
