//! Hook for rewriting or rejecting local identifiers.

use std::fmt;
use std::sync::Arc;

/// Standardizes the local identifier of a CURIE once its prefix has been
/// standardized.
///
/// Returning `None` rejects the identifier. Implementations should be
/// idempotent so that standardizing twice gives the same CURIE.
pub trait IdentifierStandardizer: Send + Sync {
    /// Standardize `identifier` for the canonical prefix `prefix`.
    fn standardize(&self, prefix: &str, identifier: &str) -> Option<String>;

    /// Get the name of this standardizer (for debugging).
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> IdentifierStandardizer for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn standardize(&self, prefix: &str, identifier: &str) -> Option<String> {
        self(prefix, identifier)
    }
}

/// Optional standardizer attached to a converter.
#[derive(Clone, Default)]
pub(crate) struct StandardizerSlot(Option<Arc<dyn IdentifierStandardizer>>);

impl StandardizerSlot {
    pub(crate) fn new<S: IdentifierStandardizer + 'static>(standardizer: S) -> Self {
        StandardizerSlot(Some(Arc::new(standardizer)))
    }

    pub(crate) fn standardize(&self, prefix: &str, identifier: &str) -> Option<String> {
        match &self.0 {
            Some(standardizer) => standardizer.standardize(prefix, identifier),
            None => Some(identifier.to_string()),
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for StandardizerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(standardizer) => write!(f, "Some({})", standardizer.name()),
            None => write!(f, "None"),
        }
    }
}
