//! Discovery of candidate URI prefixes in a collection of URIs.
//!
//! Each URI is split at the rightmost occurrence of the first delimiter
//! that leaves an alphanumeric local identifier. The parts before the split
//! become candidate URI prefixes, which are given placeholder CURIE
//! prefixes (`ns1`, `ns2`, ...) in a new converter.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{CuriesError, Result};
use crate::record::Record;

/// Delimiters tried when none are configured.
pub const DEFAULT_DELIMITERS: [&str; 3] = ["#", "/", "_"];

/// Configuration for [`discover`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Delimiters between a URI prefix and a local identifier, in priority
    /// order. The delimiter stays part of the URI prefix.
    pub delimiters: Vec<String>,

    /// Minimum number of unique local identifiers a candidate needs.
    pub cutoff: Option<usize>,

    /// Start of each placeholder prefix, followed by a number.
    pub metaprefix: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.iter().map(ToString::to_string).collect(),
            cutoff: None,
            metaprefix: "ns".to_string(),
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn with_metaprefix<S: Into<String>>(mut self, metaprefix: S) -> Self {
        self.metaprefix = metaprefix.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.delimiters.is_empty() {
            return Err(CuriesError::invalid_config(
                "at least one delimiter is required",
            ));
        }
        if self.delimiters.iter().any(String::is_empty) {
            return Err(CuriesError::invalid_config("delimiters must not be empty"));
        }
        if self.metaprefix.is_empty() {
            return Err(CuriesError::invalid_config("metaprefix must not be empty"));
        }
        Ok(())
    }
}

/// Split `uri` into a candidate URI prefix (delimiter included) and a local
/// identifier, using the first delimiter that yields an alphanumeric
/// identifier.
fn split_uri<'a>(uri: &'a str, delimiters: &[String]) -> Option<(&'a str, &'a str)> {
    delimiters.iter().find_map(|delimiter| {
        let position = uri.rfind(delimiter.as_str())?;
        let end = position + delimiter.len();
        let identifier = &uri[end..];
        let alphanumeric =
            !identifier.is_empty() && identifier.chars().all(char::is_alphanumeric);
        alphanumeric.then(|| (&uri[..end], identifier))
    })
}

/// Candidate URI prefixes mapped to the unique local identifiers seen with
/// them. URIs `converter` already parses are skipped.
pub fn uri_prefix_candidates<'a, I>(
    uris: I,
    delimiters: &[String],
    converter: Option<&Converter>,
) -> BTreeMap<&'a str, BTreeSet<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: BTreeMap<&'a str, BTreeSet<&'a str>> = BTreeMap::new();
    for uri in uris {
        if converter.is_some_and(|converter| converter.is_uri(uri)) {
            continue;
        }
        if let Some((uri_prefix, identifier)) = split_uri(uri, delimiters) {
            candidates.entry(uri_prefix).or_default().insert(identifier);
        }
    }
    candidates
}

/// Build a converter with a placeholder prefix for every URI prefix
/// discovered in `uris`.
///
/// ```
/// use curies::discovery::{DiscoveryConfig, discover};
///
/// let uris: Vec<String> = (0..30).map(|i| format!("http://ran.dom/{i:03}")).collect();
/// let converter = discover(uris.iter().map(String::as_str), &DiscoveryConfig::default(), None)
///     .unwrap();
/// assert_eq!(converter.compress("http://ran.dom/002").as_deref(), Some("ns1:002"));
/// ```
///
/// # Errors
///
/// [`CuriesError::InvalidConfig`] for an invalid configuration.
pub fn discover<'a, I>(
    uris: I,
    config: &DiscoveryConfig,
    converter: Option<&Converter>,
) -> Result<Converter>
where
    I: IntoIterator<Item = &'a str>,
{
    config.validate()?;

    let candidates = uri_prefix_candidates(uris, &config.delimiters, converter);
    let found = candidates.len();
    let records: Vec<Record> = candidates
        .into_iter()
        .filter(|(_, identifiers)| config.cutoff.is_none_or(|cutoff| identifiers.len() >= cutoff))
        .enumerate()
        .map(|(index, (uri_prefix, _))| {
            Record::new(format!("{}{}", config.metaprefix, index + 1), uri_prefix)
        })
        .collect();

    debug!(
        "discovered {} URI prefixes ({} below cutoff)",
        records.len(),
        found - records.len()
    );
    Converter::new(records)
}
