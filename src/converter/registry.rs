//! Converter construction, validation and incremental mutation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::converter::config::{AddRecordOptions, ConverterConfig};
use crate::converter::identifier::{IdentifierStandardizer, StandardizerSlot};
use crate::error::{CuriesError, DuplicateSummary, Result};
use crate::record::Record;
use crate::trie::StringTrie;

/// Why a new record was matched against an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Prefix,
    UriPrefix,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::Prefix => write!(f, "prefix match"),
            MatchReason::UriPrefix => write!(f, "URI prefix match"),
        }
    }
}

/// Lookup tables derived from the records. Always updated together.
#[derive(Debug, Clone, Default)]
pub(crate) struct Indexes {
    /// Prefix or prefix synonym -> canonical URI prefix.
    pub(crate) prefix_map: AHashMap<String, String>,
    /// URI prefix or URI prefix synonym -> canonical prefix.
    pub(crate) reverse_prefix_map: AHashMap<String, String>,
    /// Prefix or prefix synonym -> canonical prefix.
    pub(crate) synonym_to_prefix: AHashMap<String, String>,
    /// Canonical prefix -> identifier pattern. First writer wins.
    pub(crate) pattern_map: AHashMap<String, String>,
    /// Keyed by every URI prefix and URI prefix synonym.
    pub(crate) trie: StringTrie,
}

impl Indexes {
    fn insert(&mut self, record: &Record) {
        for prefix in record.all_prefixes() {
            self.prefix_map
                .insert(prefix.to_string(), record.uri_prefix().to_string());
            self.synonym_to_prefix
                .insert(prefix.to_string(), record.prefix().to_string());
        }

        for uri_prefix in record.all_uri_prefixes() {
            self.reverse_prefix_map
                .insert(uri_prefix.to_string(), record.prefix().to_string());
            self.trie.set(uri_prefix, record.prefix());
        }

        if let Some(pattern) = record.pattern()
            && !self.pattern_map.contains_key(record.prefix())
        {
            self.pattern_map
                .insert(record.prefix().to_string(), pattern.to_string());
        }
    }
}

/// A registry of records supporting CURIE/URI interconversion.
///
/// Records are kept sorted by canonical prefix. All indexes and the URI
/// prefix trie are kept consistent with the records; the only way to change
/// them is through [`Converter::add_record`] and [`Converter::add_prefix`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    pub(crate) records: Vec<Record>,
    pub(crate) indexes: Indexes,
    pub(crate) config: ConverterConfig,
    pub(crate) identifier_standardizer: StandardizerSlot,
}

impl Converter {
    /// Create a converter with the default configuration (`:` delimiter,
    /// strict duplicate checking).
    ///
    /// # Errors
    ///
    /// [`CuriesError::DuplicateUriPrefixes`] if two records share a URI prefix
    /// or URI prefix synonym, then [`CuriesError::DuplicatePrefixes`] if two
    /// records share a prefix or prefix synonym.
    pub fn new<I: IntoIterator<Item = Record>>(records: I) -> Result<Self> {
        Self::with_config(records, ConverterConfig::default())
    }

    /// Create a converter with an explicit configuration.
    ///
    /// Non-strict construction skips duplicate checking; a string claimed by
    /// several records then resolves to the record sorting last.
    pub fn with_config<I: IntoIterator<Item = Record>>(
        records: I,
        config: ConverterConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut records: Vec<Record> = records.into_iter().collect();
        records.sort_by(|a, b| a.prefix().cmp(b.prefix()));

        if config.strict {
            let duplicates = find_duplicates(&records, |record| record.all_uri_prefixes());
            if !duplicates.is_empty() {
                return Err(CuriesError::DuplicateUriPrefixes(duplicates));
            }
            let duplicates = find_duplicates(&records, |record| record.all_prefixes());
            if !duplicates.is_empty() {
                return Err(CuriesError::DuplicatePrefixes(duplicates));
            }
        }

        let mut indexes = Indexes::default();
        for record in &records {
            indexes.insert(record);
        }

        debug!(
            "built converter with {} records (strict={})",
            records.len(),
            config.strict
        );

        Ok(Converter {
            records,
            indexes,
            config,
            identifier_standardizer: StandardizerSlot::default(),
        })
    }

    /// Attach a hook that standardizes local identifiers after their prefix
    /// has been standardized. Replaces any hook already attached.
    pub fn with_identifier_standardizer<S>(mut self, standardizer: S) -> Self
    where
        S: IdentifierStandardizer + 'static,
    {
        self.identifier_standardizer = StandardizerSlot::new(standardizer);
        self
    }

    pub fn has_identifier_standardizer(&self) -> bool {
        self.identifier_standardizer.is_set()
    }

    /// Add a record, appending it or merging it into an existing one.
    ///
    /// The record's prefixes and URI prefixes are compared against every
    /// existing record. With no match the record is inserted as new. With
    /// exactly one match and `options.merge` set, the new strings are folded
    /// into the existing record's synonyms.
    ///
    /// # Errors
    ///
    /// [`CuriesError::AmbiguousMerge`] if more than one existing record
    /// matches, [`CuriesError::RecordExists`] if one matches and merging is
    /// disabled.
    pub fn add_record(&mut self, record: Record, options: AddRecordOptions) -> Result<()> {
        let matched = self.match_record(&record, options.case_sensitive);

        if matched.len() > 1 {
            return Err(CuriesError::AmbiguousMerge(self.describe_matches(&matched)));
        }

        if let Some(&index) = matched.keys().next() {
            if !options.merge {
                return Err(CuriesError::RecordExists(self.describe_matches(&matched)));
            }
            let existing = &mut self.records[index];
            existing.absorb(&record);
            self.indexes.insert(&self.records[index]);
            debug!("merged {} into {}", record.prefix(), self.records[index].prefix());
            return Ok(());
        }

        self.indexes.insert(&record);
        let position = self
            .records
            .partition_point(|existing| existing.prefix() <= record.prefix());
        self.records.insert(position, record);
        Ok(())
    }

    /// Build a record from its parts and add it with [`Converter::add_record`].
    pub fn add_prefix<P, U, I, J, S, T>(
        &mut self,
        prefix: P,
        uri_prefix: U,
        prefix_synonyms: I,
        uri_prefix_synonyms: J,
        options: AddRecordOptions,
    ) -> Result<()>
    where
        P: Into<String>,
        U: Into<String>,
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let record = Record::builder(prefix, uri_prefix)
            .prefix_synonyms(prefix_synonyms)
            .uri_prefix_synonyms(uri_prefix_synonyms)
            .build()?;
        self.add_record(record, options)
    }

    /// Indexes of existing records sharing a prefix or URI prefix (canonical
    /// or synonym) with `external`, with the reasons for each match.
    fn match_record(
        &self,
        external: &Record,
        case_sensitive: bool,
    ) -> BTreeMap<usize, Vec<MatchReason>> {
        let mut matched: BTreeMap<usize, Vec<MatchReason>> = BTreeMap::new();
        for (index, record) in self.records.iter().enumerate() {
            for prefix in external.all_prefixes() {
                if record
                    .all_prefixes()
                    .any(|existing| text_eq(prefix, existing, case_sensitive))
                {
                    matched.entry(index).or_default().push(MatchReason::Prefix);
                }
            }
            for uri_prefix in external.all_uri_prefixes() {
                if record
                    .all_uri_prefixes()
                    .any(|existing| text_eq(uri_prefix, existing, case_sensitive))
                {
                    matched.entry(index).or_default().push(MatchReason::UriPrefix);
                }
            }
        }
        matched
    }

    fn describe_matches(&self, matched: &BTreeMap<usize, Vec<MatchReason>>) -> String {
        matched
            .iter()
            .map(|(&index, reasons)| {
                let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                format!("\n  {} -> [{}]", self.records[index], reasons.join(", "))
            })
            .collect()
    }

    /// Records, sorted by canonical prefix.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn delimiter(&self) -> &str {
        &self.config.delimiter
    }

    /// Prefix or prefix synonym -> canonical URI prefix.
    pub fn prefix_map(&self) -> &AHashMap<String, String> {
        &self.indexes.prefix_map
    }

    /// URI prefix or URI prefix synonym -> canonical prefix.
    pub fn reverse_prefix_map(&self) -> &AHashMap<String, String> {
        &self.indexes.reverse_prefix_map
    }

    /// Prefix or prefix synonym -> canonical prefix.
    pub fn synonym_to_prefix(&self) -> &AHashMap<String, String> {
        &self.indexes.synonym_to_prefix
    }

    /// Canonical prefix -> identifier pattern, for records declaring one.
    pub fn pattern_map(&self) -> &AHashMap<String, String> {
        &self.indexes.pattern_map
    }

    /// Canonical prefix -> canonical URI prefix.
    pub fn bimap(&self) -> BTreeMap<&str, &str> {
        self.records
            .iter()
            .map(|record| (record.prefix(), record.uri_prefix()))
            .collect()
    }

    /// Canonical URI prefix -> canonical prefix.
    pub fn reverse_bimap(&self) -> BTreeMap<&str, &str> {
        self.records
            .iter()
            .map(|record| (record.uri_prefix(), record.prefix()))
            .collect()
    }

    /// Canonical prefixes, plus prefix synonyms if requested.
    pub fn get_prefixes(&self, include_synonyms: bool) -> BTreeSet<&str> {
        self.records
            .iter()
            .flat_map(|record| {
                let take = if include_synonyms { usize::MAX } else { 1 };
                record.all_prefixes().take(take)
            })
            .collect()
    }

    /// Canonical URI prefixes, plus URI prefix synonyms if requested.
    pub fn get_uri_prefixes(&self, include_synonyms: bool) -> BTreeSet<&str> {
        self.records
            .iter()
            .flat_map(|record| {
                let take = if include_synonyms { usize::MAX } else { 1 };
                record.all_uri_prefixes().take(take)
            })
            .collect()
    }

    /// Record whose canonical prefix or one of whose prefix synonyms is
    /// `prefix`.
    pub fn get_record(&self, prefix: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.all_prefixes().any(|candidate| candidate == prefix))
    }

    pub fn get_record_strict(&self, prefix: &str) -> Result<&Record> {
        self.get_record(prefix)
            .ok_or_else(|| CuriesError::not_found(format!("could not find prefix: {prefix}")))
    }

    /// Identifier pattern declared for a canonical prefix.
    pub fn get_pattern(&self, prefix: &str) -> Option<&str> {
        self.indexes.pattern_map.get(prefix).map(String::as_str)
    }

    /// A new converter holding only the records whose canonical prefix or a
    /// prefix synonym is among `prefixes`. Keeps the configuration and the
    /// identifier standardizer.
    pub fn get_subconverter<I, S>(&self, prefixes: I) -> Result<Converter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: AHashSet<String> = prefixes
            .into_iter()
            .map(|prefix| prefix.as_ref().to_string())
            .collect();
        let records = self
            .records
            .iter()
            .filter(|record| record.all_prefixes().any(|prefix| wanted.contains(prefix)))
            .cloned();
        let mut subconverter = Converter::with_config(records, self.config.clone())?;
        subconverter.identifier_standardizer = self.identifier_standardizer.clone();
        Ok(subconverter)
    }
}

/// Exact comparison, or comparison of full Unicode case folds.
fn text_eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        caseless::default_caseless_match_str(a, b)
    }
}

/// Every pair of records sharing a string produced by `strings`, ordered by
/// record position.
fn find_duplicates<'a, F, I>(records: &'a [Record], strings: F) -> Vec<DuplicateSummary>
where
    F: Fn(&'a Record) -> I,
    I: Iterator<Item = &'a str>,
{
    let mut owners: AHashMap<&'a str, Vec<usize>> = AHashMap::new();
    for (index, record) in records.iter().enumerate() {
        for value in strings(record) {
            let entry = owners.entry(value).or_default();
            if entry.last() != Some(&index) {
                entry.push(index);
            }
        }
    }

    let mut collisions: Vec<(usize, usize, &str)> = Vec::new();
    for (value, indices) in &owners {
        for (position, &first) in indices.iter().enumerate() {
            for &second in &indices[position + 1..] {
                collisions.push((first, second, *value));
            }
        }
    }
    collisions.sort_unstable();

    collisions
        .into_iter()
        .map(|(first, second, value)| DuplicateSummary {
            record_1: records[first].clone(),
            record_2: records[second].clone(),
            shared: value.to_string(),
        })
        .collect()
}
