//! Compression, expansion and standardization.
//!
//! Every lookup comes in three forms. The plain form returns `None` on a
//! miss, the `_strict` form returns a typed error, and the `_or_passthrough`
//! form hands back the input unchanged.

use regex::Regex;

use crate::converter::registry::Converter;
use crate::error::{CuriesError, Result};
use crate::reference::ReferenceTuple;

impl Converter {
    /// Join a prefix and identifier with this converter's delimiter.
    pub fn format_curie(&self, prefix: &str, identifier: &str) -> String {
        format!("{prefix}{}{identifier}", self.delimiter())
    }

    /// Split a CURIE on the first delimiter. No registry lookup happens here.
    pub fn parse_curie(&self, curie: &str) -> Result<ReferenceTuple> {
        ReferenceTuple::from_curie(curie, self.delimiter())
    }

    /// Split a URI into canonical prefix and identifier using the longest
    /// registered URI prefix (canonical or synonym).
    pub fn parse_uri(&self, uri: &str) -> Option<ReferenceTuple> {
        let (matched, prefix) = self.indexes.trie.longest_prefix_item(uri).ok()?;
        Some(ReferenceTuple::new(prefix, &uri[matched.len()..]))
    }

    /// Whether a registered URI prefix matches the start of `s`.
    pub fn is_uri(&self, s: &str) -> bool {
        self.parse_uri(s).is_some()
    }

    /// Whether `s` is a CURIE with a registered prefix.
    pub fn is_curie(&self, s: &str) -> bool {
        self.expand(s).is_some()
    }

    /// Interpret `uri_or_curie` as a URI first and as a CURIE second,
    /// returning the reference with its canonical prefix.
    pub fn parse(&self, uri_or_curie: &str) -> Option<ReferenceTuple> {
        if let Some(reference) = self.parse_uri(uri_or_curie) {
            return Some(reference);
        }
        let reference = self.parse_curie(uri_or_curie).ok()?;
        let prefix = self.standardize_prefix(&reference.prefix)?;
        let identifier = self.standardize_identifier(&prefix, &reference.identifier)?;
        Some(ReferenceTuple::new(prefix, identifier))
    }

    /// Run the attached identifier standardizer. Without one the identifier
    /// comes back unchanged.
    pub fn standardize_identifier(&self, prefix: &str, identifier: &str) -> Option<String> {
        self.identifier_standardizer.standardize(prefix, identifier)
    }

    /// Compress a URI to a CURIE with the canonical prefix.
    ///
    /// ```
    /// use curies::converter::Converter;
    ///
    /// let converter = Converter::from_prefix_map([
    ///     ("OBO", "http://purl.obolibrary.org/obo/"),
    ///     ("GO", "http://purl.obolibrary.org/obo/GO_"),
    /// ])
    /// .unwrap();
    /// assert_eq!(
    ///     converter.compress("http://purl.obolibrary.org/obo/GO_0032571").as_deref(),
    ///     Some("GO:0032571")
    /// );
    /// ```
    pub fn compress(&self, uri: &str) -> Option<String> {
        self.parse_uri(uri)
            .map(|reference| self.format_curie(&reference.prefix, &reference.identifier))
    }

    pub fn compress_strict(&self, uri: &str) -> Result<String> {
        self.compress(uri)
            .ok_or_else(|| CuriesError::compression(uri))
    }

    pub fn compress_or_passthrough(&self, uri: &str) -> String {
        self.compress(uri).unwrap_or_else(|| uri.to_string())
    }

    /// Expand a prefix (canonical or synonym) and identifier to a URI using
    /// the canonical URI prefix.
    pub fn expand_pair(&self, prefix: &str, identifier: &str) -> Option<String> {
        self.indexes
            .prefix_map
            .get(prefix)
            .map(|uri_prefix| format!("{uri_prefix}{identifier}"))
    }

    pub fn expand_reference(&self, reference: &ReferenceTuple) -> Option<String> {
        self.expand_pair(&reference.prefix, &reference.identifier)
    }

    /// Expand a CURIE to a URI. A missing delimiter counts as a miss.
    pub fn expand(&self, curie: &str) -> Option<String> {
        let reference = self.parse_curie(curie).ok()?;
        self.expand_reference(&reference)
    }

    pub fn expand_strict(&self, curie: &str) -> Result<String> {
        let reference = self.parse_curie(curie)?;
        self.expand_reference(&reference)
            .ok_or_else(|| CuriesError::expansion(curie))
    }

    pub fn expand_or_passthrough(&self, curie: &str) -> String {
        self.expand(curie).unwrap_or_else(|| curie.to_string())
    }

    /// Every URI a CURIE can expand to: canonical URI prefix first, then
    /// each URI prefix synonym.
    pub fn expand_all(&self, curie: &str) -> Option<Vec<String>> {
        let reference = self.parse_curie(curie).ok()?;
        self.expand_pair_all(&reference.prefix, &reference.identifier)
    }

    pub fn expand_pair_all(&self, prefix: &str, identifier: &str) -> Option<Vec<String>> {
        let record = self.get_record(prefix)?;
        Some(
            record
                .all_uri_prefixes()
                .map(|uri_prefix| format!("{uri_prefix}{identifier}"))
                .collect(),
        )
    }

    /// Map a prefix or prefix synonym to its canonical prefix.
    pub fn standardize_prefix(&self, prefix: &str) -> Option<String> {
        self.indexes.synonym_to_prefix.get(prefix).cloned()
    }

    pub fn standardize_prefix_strict(&self, prefix: &str) -> Result<String> {
        self.standardize_prefix(prefix)
            .ok_or_else(|| CuriesError::prefix_standardization(prefix))
    }

    pub fn standardize_prefix_or_passthrough(&self, prefix: &str) -> String {
        self.standardize_prefix(prefix)
            .unwrap_or_else(|| prefix.to_string())
    }

    /// Rewrite a CURIE to use its canonical prefix and standardized
    /// identifier.
    pub fn standardize_curie(&self, curie: &str) -> Option<String> {
        let reference = self.parse_curie(curie).ok()?;
        let prefix = self.standardize_prefix(&reference.prefix)?;
        let identifier = self.standardize_identifier(&prefix, &reference.identifier)?;
        Some(self.format_curie(&prefix, &identifier))
    }

    pub fn standardize_curie_strict(&self, curie: &str) -> Result<String> {
        self.parse_curie(curie)?;
        self.standardize_curie(curie)
            .ok_or_else(|| CuriesError::curie_standardization(curie))
    }

    pub fn standardize_curie_or_passthrough(&self, curie: &str) -> String {
        self.standardize_curie(curie)
            .unwrap_or_else(|| curie.to_string())
    }

    /// Rewrite a URI to use its record's canonical URI prefix.
    pub fn standardize_uri(&self, uri: &str) -> Option<String> {
        let reference = self.parse_uri(uri)?;
        self.expand_reference(&reference)
    }

    pub fn standardize_uri_strict(&self, uri: &str) -> Result<String> {
        self.standardize_uri(uri)
            .ok_or_else(|| CuriesError::uri_standardization(uri))
    }

    pub fn standardize_uri_or_passthrough(&self, uri: &str) -> String {
        self.standardize_uri(uri).unwrap_or_else(|| uri.to_string())
    }

    /// Compress a URI, or standardize a CURIE. URIs are tried first.
    pub fn compress_or_standardize(&self, uri_or_curie: &str) -> Option<String> {
        self.parse(uri_or_curie)
            .map(|reference| self.format_curie(&reference.prefix, &reference.identifier))
    }

    pub fn compress_or_standardize_strict(&self, uri_or_curie: &str) -> Result<String> {
        self.compress_or_standardize(uri_or_curie)
            .ok_or_else(|| CuriesError::compression(uri_or_curie))
    }

    pub fn compress_or_standardize_or_passthrough(&self, uri_or_curie: &str) -> String {
        self.compress_or_standardize(uri_or_curie)
            .unwrap_or_else(|| uri_or_curie.to_string())
    }

    /// Standardize a URI, or expand a CURIE. URIs are tried first.
    pub fn expand_or_standardize(&self, uri_or_curie: &str) -> Option<String> {
        self.parse(uri_or_curie)
            .and_then(|reference| self.expand_reference(&reference))
    }

    pub fn expand_or_standardize_strict(&self, uri_or_curie: &str) -> Result<String> {
        self.expand_or_standardize(uri_or_curie)
            .ok_or_else(|| CuriesError::expansion(uri_or_curie))
    }

    pub fn expand_or_standardize_or_passthrough(&self, uri_or_curie: &str) -> String {
        self.expand_or_standardize(uri_or_curie)
            .unwrap_or_else(|| uri_or_curie.to_string())
    }

    /// Check `identifier` against the pattern declared by the record owning
    /// `prefix`. `None` if the prefix is unknown or has no pattern.
    pub fn matches_pattern(&self, prefix: &str, identifier: &str) -> Result<Option<bool>> {
        let Some(canonical) = self.indexes.synonym_to_prefix.get(prefix) else {
            return Ok(None);
        };
        let Some(pattern) = self.get_pattern(canonical) else {
            return Ok(None);
        };
        let regex = Regex::new(pattern).map_err(|source| CuriesError::InvalidPattern {
            prefix: canonical.clone(),
            source,
        })?;
        Ok(Some(regex.is_match(identifier)))
    }
}
