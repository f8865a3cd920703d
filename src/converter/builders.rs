//! Building converters from plain prefix maps, and chaining converters.

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::{debug, warn};

use crate::converter::config::{AddRecordOptions, ConverterConfig};
use crate::converter::registry::Converter;
use crate::error::{CuriesError, Result};
use crate::record::Record;

/// One record per `(prefix, uri_prefix)` pair, without synonyms.
pub fn records_from_prefix_map<I, K, V>(prefix_map: I) -> Vec<Record>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    prefix_map
        .into_iter()
        .map(|(prefix, uri_prefix)| Record::new(prefix, uri_prefix))
        .collect()
}

/// One record per prefix. The first URI prefix in each list is canonical and
/// the rest become URI prefix synonyms.
pub fn records_from_priority_prefix_map<I, K, U, V>(priority_prefix_map: I) -> Result<Vec<Record>>
where
    I: IntoIterator<Item = (K, U)>,
    K: Into<String>,
    U: IntoIterator<Item = V>,
    V: Into<String>,
{
    priority_prefix_map
        .into_iter()
        .map(|(prefix, uri_prefixes)| {
            let prefix: String = prefix.into();
            let mut uri_prefixes = uri_prefixes.into_iter().map(Into::<String>::into);
            let Some(uri_prefix) = uri_prefixes.next() else {
                return Err(CuriesError::invalid_record(format!(
                    "no URI prefixes given for {prefix}"
                )));
            };
            Record::builder(prefix, uri_prefix)
                .uri_prefix_synonyms(uri_prefixes)
                .build()
        })
        .collect()
}

/// Group `(uri_prefix, prefix)` pairs by prefix, in order of first
/// appearance. The shortest URI prefix becomes canonical; ties keep input
/// order.
pub fn records_from_reverse_prefix_map<I, K, V>(reverse_prefix_map: I) -> Result<Vec<Record>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut positions: AHashMap<String, usize> = AHashMap::new();
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (uri_prefix, prefix) in reverse_prefix_map {
        let prefix: String = prefix.into();
        let position = *positions.entry(prefix.clone()).or_insert_with(|| {
            groups.push((prefix, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(uri_prefix.into());
    }

    groups
        .into_iter()
        .map(|(prefix, mut uri_prefixes)| {
            uri_prefixes.sort_by_key(String::len);
            let mut uri_prefixes = uri_prefixes.into_iter();
            let uri_prefix = uri_prefixes.next().unwrap_or_default();
            Record::builder(prefix, uri_prefix)
                .uri_prefix_synonyms(uri_prefixes)
                .build()
        })
        .collect()
}

/// Collapse CURIE prefixes that share a URI prefix into a single record.
///
/// The lexically smallest prefix becomes canonical and the others its
/// synonyms. Records come back ordered by URI prefix.
pub fn upgrade_prefix_map<I, K, V>(prefix_map: I) -> Result<Vec<Record>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut by_uri_prefix: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (prefix, uri_prefix) in prefix_map {
        by_uri_prefix
            .entry(uri_prefix.into())
            .or_default()
            .push(prefix.into());
    }

    by_uri_prefix
        .into_iter()
        .filter_map(|(uri_prefix, mut prefixes)| {
            prefixes.sort();
            prefixes.dedup();
            let mut prefixes = prefixes.into_iter();
            let prefix = prefixes.next()?;
            Some(
                Record::builder(prefix, uri_prefix)
                    .prefix_synonyms(prefixes)
                    .build(),
            )
        })
        .collect()
}

impl Converter {
    /// Build a strict converter from `(prefix, uri_prefix)` pairs.
    pub fn from_prefix_map<I, K, V>(prefix_map: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Converter::new(records_from_prefix_map(prefix_map))
    }

    /// Build a strict converter from prefixes mapped to URI prefix lists in
    /// priority order.
    pub fn from_priority_prefix_map<I, K, U, V>(priority_prefix_map: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, U)>,
        K: Into<String>,
        U: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Converter::new(records_from_priority_prefix_map(priority_prefix_map)?)
    }

    /// Build a strict converter from `(uri_prefix, prefix)` pairs.
    pub fn from_reverse_prefix_map<I, K, V>(reverse_prefix_map: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Converter::new(records_from_reverse_prefix_map(reverse_prefix_map)?)
    }
}

/// Combine converters into one. Earlier converters take priority.
///
/// Every record of every converter is merged in turn into an initially empty
/// converter, so a record sharing a prefix or URI prefix with an earlier one
/// contributes only its new strings as synonyms. The result uses the first
/// converter's configuration.
///
/// # Errors
///
/// Fails on an empty slice, or with [`CuriesError::AmbiguousMerge`] when a
/// record overlaps several records already chained.
pub fn chain(converters: &[Converter], case_sensitive: bool) -> Result<Converter> {
    let Some(first) = converters.first() else {
        warn!("chain called without converters");
        return Err(CuriesError::other("can not chain an empty list of converters"));
    };

    let config: ConverterConfig = first.config().clone();
    let mut chained = Converter::with_config(Vec::new(), config)?;
    let options = AddRecordOptions::merging().with_case_sensitive(case_sensitive);
    for converter in converters {
        for record in converter.records() {
            chained.add_record(record.clone(), options)?;
        }
    }

    debug!(
        "chained {} converters into {} records",
        converters.len(),
        chained.len()
    );
    Ok(chained)
}
