//! A converter handle that can be shared between threads.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::converter::config::AddRecordOptions;
use crate::converter::registry::Converter;
use crate::error::Result;
use crate::record::Record;
use crate::reference::ReferenceTuple;

/// A [`Converter`] behind a single read-write lock.
///
/// Lookups take the read lock. Mutations take the write lock for the whole
/// update, so readers never observe the indexes and the trie out of step.
#[derive(Debug, Clone, Default)]
pub struct SharedConverter {
    inner: Arc<RwLock<Converter>>,
}

impl SharedConverter {
    pub fn new(converter: Converter) -> Self {
        SharedConverter {
            inner: Arc::new(RwLock::new(converter)),
        }
    }

    /// Read guard for lookups not wrapped here.
    pub fn read(&self) -> RwLockReadGuard<'_, Converter> {
        self.inner.read()
    }

    pub fn compress(&self, uri: &str) -> Option<String> {
        self.inner.read().compress(uri)
    }

    pub fn expand(&self, curie: &str) -> Option<String> {
        self.inner.read().expand(curie)
    }

    pub fn parse_uri(&self, uri: &str) -> Option<ReferenceTuple> {
        self.inner.read().parse_uri(uri)
    }

    pub fn standardize_prefix(&self, prefix: &str) -> Option<String> {
        self.inner.read().standardize_prefix(prefix)
    }

    pub fn standardize_curie(&self, curie: &str) -> Option<String> {
        self.inner.read().standardize_curie(curie)
    }

    pub fn standardize_uri(&self, uri: &str) -> Option<String> {
        self.inner.read().standardize_uri(uri)
    }

    pub fn add_record(&self, record: Record, options: AddRecordOptions) -> Result<()> {
        self.inner.write().add_record(record, options)
    }

    /// Build a record from its parts and add it under the write lock.
    pub fn add_prefix<P, U, I, J, S, T>(
        &self,
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
        self.inner.write().add_prefix(
            prefix,
            uri_prefix,
            prefix_synonyms,
            uri_prefix_synonyms,
            options,
        )
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> Converter {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<Converter> for SharedConverter {
    fn from(converter: Converter) -> Self {
        SharedConverter::new(converter)
    }
}
