//! Error types for the curies library.
//!
//! All errors are represented by the [`CuriesError`] enum. Lookup operations
//! only produce them through their `*_strict` variants; construction and
//! registry mutation always propagate them.
//!
//! # Examples
//!
//! ```
//! use curies::error::{CuriesError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CuriesError::invalid_config("empty delimiter"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::record::Record;

/// Two records that share a CURIE prefix or URI prefix string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSummary {
    pub record_1: Record,
    pub record_2: Record,
    /// The string used by both records.
    pub shared: String,
}

impl fmt::Display for DuplicateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\n\t{}\n\t{}",
            self.shared, self.record_1, self.record_2
        )
    }
}

fn format_duplicates(duplicates: &[DuplicateSummary]) -> String {
    duplicates
        .iter()
        .map(|duplicate| format!("\n{duplicate}\n"))
        .collect()
}

/// The main error type for curies operations.
#[derive(Error, Debug)]
pub enum CuriesError {
    /// Two or more records share a CURIE prefix (canonical or synonym).
    #[error("Duplicate prefixes:\n{}", format_duplicates(.0))]
    DuplicatePrefixes(Vec<DuplicateSummary>),

    /// Two or more records share a URI prefix (canonical or synonym).
    #[error("Duplicate URI prefixes:\n{}", format_duplicates(.0))]
    DuplicateUriPrefixes(Vec<DuplicateSummary>),

    /// A string did not contain the CURIE delimiter.
    #[error("{curie} does not appear to be a CURIE - missing a delimiter")]
    NoCurieDelimiter { curie: String },

    /// A CURIE could not be expanded.
    #[error("Expansion error: {0}")]
    Expansion(String),

    /// A URI could not be compressed.
    #[error("Compression error: {0}")]
    Compression(String),

    /// A prefix could not be standardized.
    #[error("Prefix standardization error: {0}")]
    PrefixStandardization(String),

    /// A CURIE could not be standardized.
    #[error("CURIE standardization error: {0}")]
    CurieStandardization(String),

    /// A URI could not be standardized.
    #[error("URI standardization error: {0}")]
    UriStandardization(String),

    /// Lookup of a key that is not present.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record violates its own invariants.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A new record matches more than one existing record.
    #[error("new record has duplicates:{0}")]
    AmbiguousMerge(String),

    /// A new record matches an existing record and merging is disabled.
    #[error("new record already exists and merge=false: {0}")]
    RecordExists(String),

    /// Invalid converter configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record's identifier pattern is not a valid regular expression.
    #[error("Invalid pattern for prefix {prefix}: {source}")]
    InvalidPattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    /// The same URI prefix appears as both a key and a value of a remapping.
    #[error(
        "Transitive mapping has not been implemented. The following appear in both the keys and values of the remapping: {}",
        .0.join(", ")
    )]
    TransitiveRemapping(Vec<String>),

    /// Several keys of a remapping refer to the same record.
    #[error("Duplicate keys in remapping: {0}")]
    DuplicateRemappingKeys(String),

    /// Several values of a remapping refer to the same record.
    #[error("Duplicate values in remapping: {0}")]
    DuplicateRemappingValues(String),

    /// Prefixes of one record are used inconsistently across a remapping.
    #[error("Inconsistent usage of prefixes in keys and values: {0}")]
    InconsistentRemapping(String),

    /// The remapping contains a cycle.
    #[error("Cycle detected in remapping")]
    RemappingCycle,

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with CuriesError.
pub type Result<T> = std::result::Result<T, CuriesError>;

impl CuriesError {
    /// Create a new missing-delimiter error.
    pub fn no_delimiter<S: Into<String>>(curie: S) -> Self {
        CuriesError::NoCurieDelimiter {
            curie: curie.into(),
        }
    }

    /// Create a new expansion error.
    pub fn expansion<S: Into<String>>(msg: S) -> Self {
        CuriesError::Expansion(msg.into())
    }

    /// Create a new compression error.
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        CuriesError::Compression(msg.into())
    }

    /// Create a new prefix standardization error.
    pub fn prefix_standardization<S: Into<String>>(msg: S) -> Self {
        CuriesError::PrefixStandardization(msg.into())
    }

    /// Create a new CURIE standardization error.
    pub fn curie_standardization<S: Into<String>>(msg: S) -> Self {
        CuriesError::CurieStandardization(msg.into())
    }

    /// Create a new URI standardization error.
    pub fn uri_standardization<S: Into<String>>(msg: S) -> Self {
        CuriesError::UriStandardization(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CuriesError::NotFound(msg.into())
    }

    /// Create a new invalid record error.
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        CuriesError::InvalidRecord(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        CuriesError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CuriesError::Other(msg.into())
    }

    /// Whether this error was raised because a lookup missed.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            CuriesError::NoCurieDelimiter { .. }
                | CuriesError::Expansion(_)
                | CuriesError::Compression(_)
                | CuriesError::PrefixStandardization(_)
                | CuriesError::CurieStandardization(_)
                | CuriesError::UriStandardization(_)
                | CuriesError::NotFound(_)
        )
    }
}
