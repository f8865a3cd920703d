//! Records: one semantic space's CURIE prefix and URI prefix registration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CuriesError, Result};

/// A canonical CURIE prefix and URI prefix together with their synonyms.
///
/// The canonical prefix never appears in `prefix_synonyms` and the canonical
/// URI prefix never appears in `uri_prefix_synonyms`. Synonym lists are kept
/// sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    prefix: String,
    uri_prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    prefix_synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    uri_prefix_synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
}

/// Unvalidated wire shape of a [`Record`].
#[derive(Deserialize)]
struct RawRecord {
    prefix: String,
    uri_prefix: String,
    #[serde(default)]
    prefix_synonyms: Vec<String>,
    #[serde(default)]
    uri_prefix_synonyms: Vec<String>,
    #[serde(default)]
    pattern: Option<String>,
}

impl TryFrom<RawRecord> for Record {
    type Error = CuriesError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let mut builder = Record::builder(raw.prefix, raw.uri_prefix)
            .prefix_synonyms(raw.prefix_synonyms)
            .uri_prefix_synonyms(raw.uri_prefix_synonyms);
        if let Some(pattern) = raw.pattern {
            builder = builder.pattern(pattern);
        }
        builder.build()
    }
}

impl Record {
    /// Create a record without synonyms or pattern.
    pub fn new<P: Into<String>, U: Into<String>>(prefix: P, uri_prefix: U) -> Self {
        Record {
            prefix: prefix.into(),
            uri_prefix: uri_prefix.into(),
            prefix_synonyms: Vec::new(),
            uri_prefix_synonyms: Vec::new(),
            pattern: None,
        }
    }

    /// Start building a record with synonyms and/or a pattern.
    pub fn builder<P: Into<String>, U: Into<String>>(prefix: P, uri_prefix: U) -> RecordBuilder {
        RecordBuilder::new(prefix, uri_prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn uri_prefix(&self) -> &str {
        &self.uri_prefix
    }

    pub fn prefix_synonyms(&self) -> &[String] {
        &self.prefix_synonyms
    }

    pub fn uri_prefix_synonyms(&self) -> &[String] {
        &self.uri_prefix_synonyms
    }

    /// Regular expression for valid local identifiers, if declared.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// The canonical prefix followed by its synonyms.
    pub fn all_prefixes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.prefix.as_str()).chain(self.prefix_synonyms.iter().map(String::as_str))
    }

    /// The canonical URI prefix followed by its synonyms.
    pub fn all_uri_prefixes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.uri_prefix.as_str())
            .chain(self.uri_prefix_synonyms.iter().map(String::as_str))
    }

    /// Fold another record's prefixes and URI prefixes into this record's
    /// synonym lists, skipping strings this record already carries.
    pub(crate) fn absorb(&mut self, other: &Record) {
        for prefix in other.all_prefixes() {
            if !self.all_prefixes().any(|existing| existing == prefix) {
                self.prefix_synonyms.push(prefix.to_string());
            }
        }
        self.prefix_synonyms.sort();

        for uri_prefix in other.all_uri_prefixes() {
            if !self.all_uri_prefixes().any(|existing| existing == uri_prefix) {
                self.uri_prefix_synonyms.push(uri_prefix.to_string());
            }
        }
        self.uri_prefix_synonyms.sort();
    }

    /// Make `new_prefix` canonical. The current canonical prefix is kept as a
    /// synonym when `keep_old` is set and dropped otherwise.
    pub(crate) fn replace_prefix(&mut self, new_prefix: &str, keep_old: bool) {
        let old = std::mem::replace(&mut self.prefix, new_prefix.to_string());
        self.prefix_synonyms.retain(|synonym| synonym != new_prefix);
        if keep_old && !self.prefix_synonyms.contains(&old) {
            self.prefix_synonyms.push(old);
        }
        self.prefix_synonyms.sort();
    }

    pub(crate) fn remove_prefix_synonym(&mut self, synonym: &str) {
        self.prefix_synonyms.retain(|existing| existing != synonym);
    }

    /// Make `new_uri_prefix` canonical, demoting the current canonical URI
    /// prefix to a synonym.
    pub(crate) fn replace_uri_prefix(&mut self, new_uri_prefix: &str) {
        let old = std::mem::replace(&mut self.uri_prefix, new_uri_prefix.to_string());
        self.uri_prefix_synonyms
            .retain(|synonym| synonym != new_uri_prefix);
        if !self.uri_prefix_synonyms.contains(&old) {
            self.uri_prefix_synonyms.push(old);
        }
        self.uri_prefix_synonyms.sort();
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record(prefix={}, uri_prefix={}", self.prefix, self.uri_prefix)?;
        if !self.prefix_synonyms.is_empty() {
            write!(f, ", prefix_synonyms=[{}]", self.prefix_synonyms.join(", "))?;
        }
        if !self.uri_prefix_synonyms.is_empty() {
            write!(
                f,
                ", uri_prefix_synonyms=[{}]",
                self.uri_prefix_synonyms.join(", ")
            )?;
        }
        if let Some(pattern) = &self.pattern {
            write!(f, ", pattern={pattern}")?;
        }
        write!(f, ")")
    }
}

/// Builder for [`Record`].
///
/// ```
/// use curies::record::Record;
///
/// let record = Record::builder("CHEBI", "http://purl.obolibrary.org/obo/CHEBI_")
///     .prefix_synonym("chebi")
///     .uri_prefix_synonym("https://www.ebi.ac.uk/chebi/searchId.do?chebiId=")
///     .build()
///     .unwrap();
/// assert_eq!(record.prefix_synonyms(), ["chebi"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    prefix: String,
    uri_prefix: String,
    prefix_synonyms: Vec<String>,
    uri_prefix_synonyms: Vec<String>,
    pattern: Option<String>,
}

impl RecordBuilder {
    pub fn new<P: Into<String>, U: Into<String>>(prefix: P, uri_prefix: U) -> Self {
        RecordBuilder {
            prefix: prefix.into(),
            uri_prefix: uri_prefix.into(),
            prefix_synonyms: Vec::new(),
            uri_prefix_synonyms: Vec::new(),
            pattern: None,
        }
    }

    pub fn prefix_synonym<S: Into<String>>(mut self, synonym: S) -> Self {
        self.prefix_synonyms.push(synonym.into());
        self
    }

    pub fn prefix_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_synonyms
            .extend(synonyms.into_iter().map(Into::into));
        self
    }

    pub fn uri_prefix_synonym<S: Into<String>>(mut self, synonym: S) -> Self {
        self.uri_prefix_synonyms.push(synonym.into());
        self
    }

    pub fn uri_prefix_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uri_prefix_synonyms
            .extend(synonyms.into_iter().map(Into::into));
        self
    }

    pub fn pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Validate and build the record.
    ///
    /// Fails if the canonical prefix or URI prefix also appears among its own
    /// synonyms. Synonym lists are sorted and deduplicated.
    pub fn build(self) -> Result<Record> {
        let RecordBuilder {
            prefix,
            uri_prefix,
            mut prefix_synonyms,
            mut uri_prefix_synonyms,
            pattern,
        } = self;

        if prefix_synonyms.contains(&prefix) {
            return Err(CuriesError::invalid_record(format!(
                "Duplicate of canonical prefix `{prefix}` in prefix synonyms"
            )));
        }
        if uri_prefix_synonyms.contains(&uri_prefix) {
            return Err(CuriesError::invalid_record(format!(
                "Duplicate of canonical URI prefix `{uri_prefix}` in URI prefix synonyms"
            )));
        }

        prefix_synonyms.sort();
        prefix_synonyms.dedup();
        uri_prefix_synonyms.sort();
        uri_prefix_synonyms.dedup();

        Ok(Record {
            prefix,
            uri_prefix,
            prefix_synonyms,
            uri_prefix_synonyms,
            pattern: pattern.filter(|pattern| !pattern.is_empty()),
        })
    }
}
