//! The CURIE/URI converter.
//!
//! A [`Converter`] owns an ordered list of [`Record`](crate::record::Record)s
//! and the lookup indexes derived from them:
//!
//! - `registry` - construction, duplicate detection and incremental mutation
//! - `lookup` - compression, expansion and standardization
//! - `builders` - construction from simple, priority and reverse prefix maps, and chaining
//! - `config` - converter and `add_record` options
//! - `identifier` - the identifier standardization hook
//! - `shared` - a lock-guarded handle for multi-threaded hosts
//!
//! # Example
//!
//! ```
//! use curies::converter::Converter;
//!
//! let converter = Converter::from_prefix_map([
//!     ("CHEBI", "http://purl.obolibrary.org/obo/CHEBI_"),
//!     ("GO", "http://purl.obolibrary.org/obo/GO_"),
//!     ("OBO", "http://purl.obolibrary.org/obo/"),
//! ])
//! .unwrap();
//!
//! assert_eq!(
//!     converter.compress("http://purl.obolibrary.org/obo/GO_0032571").as_deref(),
//!     Some("GO:0032571")
//! );
//! assert_eq!(
//!     converter.expand("CHEBI:138488").as_deref(),
//!     Some("http://purl.obolibrary.org/obo/CHEBI_138488")
//! );
//! assert_eq!(converter.compress("http://example.org/missing:0000000"), None);
//! ```

pub mod builders;
pub mod config;
pub mod identifier;
pub mod lookup;
pub mod registry;
pub mod shared;

pub use builders::{chain, upgrade_prefix_map};
pub use config::{AddRecordOptions, ConverterConfig};
pub use identifier::IdentifierStandardizer;
pub use registry::{Converter, MatchReason};
pub use shared::SharedConverter;
