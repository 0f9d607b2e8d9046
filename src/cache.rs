use std::collections::HashMap;

use cfg_derivation::RecognitionResult;

use crate::config::Strategy;

/// Identifies one recognition request across calls.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct CacheKey {
    pub(crate) fingerprint: u64,
    pub(crate) start: String,
    pub(crate) strategy: Strategy,
    pub(crate) track_derivation: bool,
    pub(crate) shortcuts: u64,
    pub(crate) input: String,
}

/// Results remembered across calls, owned by the caller.
///
/// Entries are keyed by grammar fingerprint, start symbol, engine,
/// registered shortcuts and string, so one cache can serve several
/// recognizers. Shortcuts can change which derivation is reported, so
/// recognizers with different shortcuts never share entries.
#[derive(Clone, Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, RecognitionResult>,
    hits: usize,
}

impl ResultCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&mut self, key: &CacheKey) -> Option<&RecognitionResult> {
        let result = self.entries.get(key);
        if result.is_some() {
            self.hits += 1;
        }
        result
    }

    pub(crate) fn insert(&mut self, key: CacheKey, result: RecognitionResult) {
        self.entries.insert(key, result);
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of requests served from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Forgets every result.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
