//! Reconciliation of a converter against externally chosen prefixes.
//!
//! Each operation works on a copy of the converter's records and returns a
//! new strict [`Converter`] with the same delimiter. Remappings that would
//! make two records share a string are skipped and logged.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::converter::Converter;
use crate::error::{CuriesError, Result};
use crate::record::Record;

/// Rename canonical CURIE prefixes.
///
/// Keys may be canonical prefixes or synonyms. The old canonical prefix
/// becomes a synonym, unless it is itself the target of another remapping in
/// which case it is dropped from the record. Chains such as `a -> b, b -> c`
/// are applied target-first.
///
/// # Errors
///
/// [`CuriesError::DuplicateRemappingKeys`], [`CuriesError::DuplicateRemappingValues`]
/// or [`CuriesError::InconsistentRemapping`] when the remapping refers to
/// one record through several strings, and [`CuriesError::RemappingCycle`]
/// when it loops.
pub fn remap_curie_prefixes<I, K, V>(converter: &Converter, remapping: I) -> Result<Converter>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let remapping = collect_remapping(remapping);
    let ordering = order_curie_remapping(converter, &remapping)?;
    let renamed_targets = intersection(&remapping);

    let mut records: Vec<Record> = converter.records().to_vec();
    let mut processed = vec![false; records.len()];

    for (old, new_prefix) in &ordering {
        let Some(canonical) = converter.synonym_to_prefix().get(old) else {
            debug!("skipping remapping {old} -> {new_prefix}: {old} is not in the converter");
            continue;
        };
        let Some(index) = records
            .iter()
            .enumerate()
            .position(|(index, record)| !processed[index] && record.prefix() == canonical)
        else {
            debug!("skipping remapping {old} -> {new_prefix}: record already remapped");
            continue;
        };
        processed[index] = true;

        let owner = records
            .iter()
            .position(|record| record.all_prefixes().any(|prefix| prefix == new_prefix));
        if let Some(owner) = owner
            && owner != index
        {
            debug!(
                "skipping remapping {old} -> {new_prefix}: clashes with {}",
                records[owner]
            );
            continue;
        }

        let record = &mut records[index];
        if renamed_targets.contains(old) {
            record.replace_prefix(new_prefix, false);
            record.remove_prefix_synonym(old);
        } else {
            record.replace_prefix(new_prefix, true);
        }
    }

    rebuild(converter, records)
}

/// Replace canonical URI prefixes.
///
/// Keys may be canonical URI prefixes or synonyms; the old canonical URI
/// prefix becomes a synonym.
///
/// # Errors
///
/// [`CuriesError::TransitiveRemapping`] if any string is both a key and a
/// value of the remapping.
pub fn remap_uri_prefixes<I, K, V>(converter: &Converter, remapping: I) -> Result<Converter>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let remapping = collect_remapping(remapping);
    let transitive = intersection(&remapping);
    if !transitive.is_empty() {
        return Err(CuriesError::TransitiveRemapping(
            transitive.into_iter().collect(),
        ));
    }

    let mut records: Vec<Record> = converter.records().to_vec();
    for record in &mut records {
        let Some(new_uri_prefix) = lookup_first(&remapping, record.all_uri_prefixes()) else {
            continue;
        };
        if clashes(converter, record, new_uri_prefix) {
            debug!(
                "skipping URI remapping of {} to {new_uri_prefix}: already in use",
                record.prefix()
            );
            continue;
        }
        record.replace_uri_prefix(new_uri_prefix);
    }

    rebuild(converter, records)
}

/// Point CURIE prefixes (canonical or synonym) at new canonical URI
/// prefixes. The old canonical URI prefix becomes a synonym.
pub fn rewire<I, K, V>(converter: &Converter, rewiring: I) -> Result<Converter>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let rewiring = collect_remapping(rewiring);

    let mut records: Vec<Record> = converter.records().to_vec();
    for record in &mut records {
        let Some(new_uri_prefix) = lookup_first(&rewiring, record.all_prefixes()) else {
            continue;
        };
        if new_uri_prefix == record.uri_prefix() {
            continue;
        }
        if clashes(converter, record, new_uri_prefix) {
            debug!(
                "skipping rewiring of {} to {new_uri_prefix}: already used by {}",
                record.prefix(),
                converter
                    .reverse_prefix_map()
                    .get(new_uri_prefix)
                    .map(String::as_str)
                    .unwrap_or_default()
            );
            continue;
        }
        record.replace_uri_prefix(new_uri_prefix);
    }

    rebuild(converter, records)
}

fn collect_remapping<I, K, V>(remapping: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    remapping
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Strings appearing both as a key and as a value.
fn intersection(remapping: &BTreeMap<String, String>) -> BTreeSet<String> {
    remapping
        .values()
        .filter(|value| remapping.contains_key(*value))
        .cloned()
        .collect()
}

/// Value for the first of `candidates` present in `remapping`.
fn lookup_first<'a, 'r>(
    remapping: &'r BTreeMap<String, String>,
    mut candidates: impl Iterator<Item = &'a str>,
) -> Option<&'r str> {
    candidates.find_map(|candidate| remapping.get(candidate).map(String::as_str))
}

/// Whether `uri_prefix` already belongs to the converter without being one
/// of this record's URI prefix synonyms.
fn clashes(converter: &Converter, record: &Record, uri_prefix: &str) -> bool {
    converter.reverse_prefix_map().contains_key(uri_prefix)
        && !record
            .uri_prefix_synonyms()
            .iter()
            .any(|synonym| synonym == uri_prefix)
}

fn rebuild(converter: &Converter, records: Vec<Record>) -> Result<Converter> {
    let config = converter.config().clone().with_strict(true);
    Converter::with_config(records, config)
}

/// Groups of remapping strings that standardize to the same canonical
/// prefix, keeping only groups with more than one member.
fn describe_groups<'a>(groups: BTreeMap<String, BTreeSet<&'a str>>) -> Option<String> {
    let described: Vec<String> = groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(canonical, members)| {
            let members: Vec<&str> = members.into_iter().collect();
            format!("{canonical}: [{}]", members.join(", "))
        })
        .collect();
    (!described.is_empty()).then(|| described.join("; "))
}

/// Validate a CURIE prefix remapping and order it so that chained renames
/// are applied target-first.
fn order_curie_remapping(
    converter: &Converter,
    remapping: &BTreeMap<String, String>,
) -> Result<Vec<(String, String)>> {
    let mut keys: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for key in remapping.keys() {
        if let Some(canonical) = converter.standardize_prefix(key) {
            keys.entry(canonical).or_default().insert(key.as_str());
        }
    }
    if let Some(message) = describe_groups(keys) {
        return Err(CuriesError::DuplicateRemappingKeys(message));
    }

    let mut values: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for value in remapping.values() {
        if let Some(canonical) = converter.standardize_prefix(value) {
            values.entry(canonical).or_default().push(value.as_str());
        }
    }
    let duplicated_values: Vec<String> = values
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(canonical, members)| format!("{canonical}: [{}]", members.join(", ")))
        .collect();
    if !duplicated_values.is_empty() {
        return Err(CuriesError::DuplicateRemappingValues(
            duplicated_values.join("; "),
        ));
    }

    let mut correspondence: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for (key, value) in remapping {
        let canonical_key = converter.standardize_prefix(key);
        let canonical_value = converter.standardize_prefix(value);
        if let Some(canonical) = &canonical_key {
            correspondence
                .entry(canonical.clone())
                .or_default()
                .insert(key.as_str());
        }
        if canonical_key != canonical_value
            && let Some(canonical) = canonical_value
        {
            correspondence
                .entry(canonical)
                .or_default()
                .insert(value.as_str());
        }
    }
    if let Some(message) = describe_groups(correspondence) {
        return Err(CuriesError::InconsistentRemapping(message));
    }

    if intersection(remapping).is_empty() {
        return Ok(remapping
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect());
    }

    let mut ordered = Vec::with_capacity(remapping.len());
    let mut remaining = remapping.clone();
    while !remaining.is_empty() {
        let free: BTreeSet<String> = remaining
            .values()
            .filter(|value| !remaining.contains_key(*value))
            .cloned()
            .collect();
        if free.is_empty() {
            return Err(CuriesError::RemappingCycle);
        }
        let (edges, rest): (BTreeMap<String, String>, BTreeMap<String, String>) = remaining
            .into_iter()
            .partition(|(_, value)| free.contains(value));
        ordered.extend(edges);
        remaining = rest;
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> Converter {
        Converter::new([
            Record::builder("a", "https://example.org/a/")
                .prefix_synonym("x")
                .build()
                .unwrap(),
            Record::builder("b", "https://example.org/b/")
                .prefix_synonym("y")
                .build()
                .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_order_without_chains_is_sorted() {
        let converter = converter();
        let remapping = collect_remapping([("b", "b1"), ("a", "a1")]);
        let ordering = order_curie_remapping(&converter, &remapping).unwrap();
        assert_eq!(
            ordering,
            vec![
                ("a".to_string(), "a1".to_string()),
                ("b".to_string(), "b1".to_string())
            ]
        );
    }

    #[test]
    fn test_order_chain_target_first() {
        let converter = Converter::default();
        let remapping = collect_remapping([("b", "c"), ("c", "d")]);
        let ordering = order_curie_remapping(&converter, &remapping).unwrap();
        assert_eq!(
            ordering,
            vec![
                ("c".to_string(), "d".to_string()),
                ("b".to_string(), "c".to_string())
            ]
        );
    }

    #[test]
    fn test_order_cycle() {
        let converter = Converter::default();
        let remapping = collect_remapping([("a", "b"), ("b", "a")]);
        assert!(matches!(
            order_curie_remapping(&converter, &remapping),
            Err(CuriesError::RemappingCycle)
        ));
    }

    #[test]
    fn test_duplicate_keys() {
        let converter = converter();
        let remapping = collect_remapping([("a", "a1"), ("x", "a2")]);
        assert!(matches!(
            order_curie_remapping(&converter, &remapping),
            Err(CuriesError::DuplicateRemappingKeys(_))
        ));
    }

    #[test]
    fn test_duplicate_values() {
        let converter = converter();
        let remapping = collect_remapping([("q", "b"), ("r", "y")]);
        assert!(matches!(
            order_curie_remapping(&converter, &remapping),
            Err(CuriesError::DuplicateRemappingValues(_))
        ));
    }

    #[test]
    fn test_inconsistent() {
        let converter = converter();
        // `a` is renamed while its synonym `x` is used as a target elsewhere.
        let remapping = collect_remapping([("a", "a1"), ("q", "x")]);
        assert!(matches!(
            order_curie_remapping(&converter, &remapping),
            Err(CuriesError::InconsistentRemapping(_))
        ));
    }

    #[test]
    fn test_lookup_first_prefers_canonical() {
        let remapping = collect_remapping([("x", "from-synonym"), ("a", "from-canonical")]);
        let record = Record::builder("a", "https://example.org/a/")
            .prefix_synonym("x")
            .build()
            .unwrap();
        assert_eq!(
            lookup_first(&remapping, record.all_prefixes()),
            Some("from-canonical")
        );
    }
}
