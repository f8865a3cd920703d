//! Character-keyed prefix tree used to find the longest registered URI prefix.

use ahash::AHashMap;

use crate::error::{CuriesError, Result};

#[derive(Debug, Clone, Default)]
struct Node {
    value: Option<String>,
    children: AHashMap<char, Node>,
}

/// A trie mapping string keys to string values.
///
/// Lookups walk the query one character at a time, so the cost of
/// [`StringTrie::longest_prefix_item`] depends on the query length and not
/// on the number of stored keys.
#[derive(Debug, Clone, Default)]
pub struct StringTrie {
    root: Node,
    len: usize,
}

impl StringTrie {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, overwriting any value already stored for exactly that key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.value.is_none() {
            self.len += 1;
        }
        node.value = Some(value.into());
    }

    /// Exact-key membership.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some_and(|node| node.value.is_some())
    }

    /// Return the longest stored key that is a prefix of `query`, together
    /// with its value.
    ///
    /// The empty key only matches if it was inserted explicitly.
    pub fn longest_prefix_item<'q>(&self, query: &'q str) -> Result<(&'q str, &str)> {
        let mut node = &self.root;
        let mut best = node.value.as_deref().map(|value| (0, value));

        for (offset, ch) in query.char_indices() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(value) = node.value.as_deref() {
                best = Some((offset + ch.len_utf8(), value));
            }
        }

        best.map(|(end, value)| (&query[..end], value))
            .ok_or_else(|| CuriesError::not_found(format!("no stored key is a prefix of {query}")))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, key: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

impl<K, V> FromIterator<(K, V)> for StringTrie
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = StringTrie::new();
        for (key, value) in iter {
            trie.set(key.as_ref(), value);
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obo_trie() -> StringTrie {
        [
            ("http://purl.obolibrary.org/obo/", "OBO"),
            ("http://purl.obolibrary.org/obo/GO_", "GO"),
            ("http://purl.obolibrary.org/obo/CHEBI_", "CHEBI"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_longest_prefix_wins() {
        let trie = obo_trie();

        let (key, value) = trie
            .longest_prefix_item("http://purl.obolibrary.org/obo/GO_0032571")
            .unwrap();
        assert_eq!(key, "http://purl.obolibrary.org/obo/GO_");
        assert_eq!(value, "GO");

        let (key, value) = trie
            .longest_prefix_item("http://purl.obolibrary.org/obo/go.owl")
            .unwrap();
        assert_eq!(key, "http://purl.obolibrary.org/obo/");
        assert_eq!(value, "OBO");
    }

    #[test]
    fn test_exact_key_match() {
        let trie = obo_trie();
        let (key, value) = trie
            .longest_prefix_item("http://purl.obolibrary.org/obo/GO_")
            .unwrap();
        assert_eq!(key, "http://purl.obolibrary.org/obo/GO_");
        assert_eq!(value, "GO");
    }

    #[test]
    fn test_miss() {
        let trie = obo_trie();
        let err = trie
            .longest_prefix_item("http://example.org/missing:0000000")
            .unwrap_err();
        assert!(matches!(err, CuriesError::NotFound(_)));

        // Partial walk that never reaches a stored key.
        assert!(trie.longest_prefix_item("http://purl.obo").is_err());
        assert!(trie.longest_prefix_item("").is_err());
    }

    #[test]
    fn test_empty_key_only_when_inserted() {
        let mut trie = StringTrie::new();
        assert!(trie.longest_prefix_item("anything").is_err());

        trie.set("", "ROOT");
        let (key, value) = trie.longest_prefix_item("anything").unwrap();
        assert_eq!(key, "");
        assert_eq!(value, "ROOT");
    }

    #[test]
    fn test_contains_is_exact() {
        let trie = obo_trie();
        assert!(trie.contains("http://purl.obolibrary.org/obo/"));
        assert!(!trie.contains("http://purl.obolibrary.org/ob"));
        assert!(!trie.contains("http://purl.obolibrary.org/obo/GO_1"));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_overwrite() {
        let mut trie = obo_trie();
        trie.set("http://purl.obolibrary.org/obo/GO_", "go");
        let (_, value) = trie
            .longest_prefix_item("http://purl.obolibrary.org/obo/GO_1")
            .unwrap();
        assert_eq!(value, "go");
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_multibyte_keys() {
        let mut trie = StringTrie::new();
        trie.set("https://例え.jp/", "EX");
        let (key, value) = trie.longest_prefix_item("https://例え.jp/123").unwrap();
        assert_eq!(key, "https://例え.jp/");
        assert_eq!(value, "EX");
    }
}
