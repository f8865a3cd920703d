//! # curies
//!
//! Idiomatic conversion between CURIEs and URIs.
//!
//! ## Features
//!
//! - Longest-prefix URI compression backed by a character trie
//! - Prefix and URI prefix synonyms with standardization
//! - Strict bijectivity checks at construction
//! - Incremental extension with append/merge semantics
//! - Chaining of converters and prefix/URI prefix reconciliation
//! - Discovery of candidate URI prefixes in unlabelled URIs
//! - A lock-guarded handle for multi-threaded hosts

pub mod converter;
pub mod discovery;
pub mod error;
pub mod reconciliation;
pub mod record;
pub mod reference;
pub mod trie;

pub mod prelude {
    pub use crate::converter::{
        AddRecordOptions, Converter, ConverterConfig, IdentifierStandardizer, SharedConverter, chain,
        upgrade_prefix_map,
    };
    pub use crate::discovery::{DiscoveryConfig, discover};
    pub use crate::error::{CuriesError, Result};
    pub use crate::reconciliation::{remap_curie_prefixes, remap_uri_prefixes, rewire};
    pub use crate::record::{Record, RecordBuilder};
    pub use crate::reference::ReferenceTuple;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
