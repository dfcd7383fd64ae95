// Namepick Result Cache
// Memoized filter results keyed by picker instance and normalized filter

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::matcher::UserId;

/// Identifies one picker instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorId(pub u64);

impl SelectorId {
    /// Allocate a process-wide unique selector id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SelectorId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SelectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selector#{}", self.0)
    }
}

/// A hashable key for result lookups
///
/// The filter is lowercased so that filters differing only in case share
/// an entry. A missing filter is stored as the empty string.
///
/// Layout expansion is not case-insensitive on punctuation keys: `Ж` and
/// `ж` share a key but expand to `:` and `;` on the `en` layout, so within
/// one selector whichever was filtered first answers for both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub selector: SelectorId,
    pub filter: String,
}

impl CacheKey {
    pub fn new(selector: SelectorId, filter: Option<&str>) -> Self {
        Self {
            selector,
            filter: filter.map(str::to_lowercase).unwrap_or_default(),
        }
    }
}

/// Cached outcome of one filter call
///
/// `None` means no filter was applied. Stored results are shared, never
/// mutated.
pub type FilterResult = Option<Arc<[UserId]>>;

/// Filter result cache
///
/// Entries live until their selector is invalidated or the cache is
/// cleared; there is no eviction.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, FilterResult>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `key`, computing and storing it on a miss
    pub fn get_or_insert_with<F>(&mut self, key: CacheKey, compute: F) -> FilterResult
    where
        F: FnOnce() -> Option<Vec<UserId>>,
    {
        if let Some(result) = self.entries.get(&key) {
            self.hits += 1;
            return result.clone();
        }

        self.misses += 1;
        log::debug!("cache miss for {} filter '{}'", key.selector, key.filter);
        let result: FilterResult = compute().map(Arc::from);
        self.entries.insert(key, result.clone());
        result
    }

    /// Look up a stored result without computing
    ///
    /// The outer `None` means the key was never stored.
    pub fn get(&self, key: &CacheKey) -> Option<&FilterResult> {
        self.entries.get(key)
    }

    /// Drop every entry of one selector
    pub fn invalidate(&mut self, selector: SelectorId) {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.selector != selector);
        log::debug!(
            "invalidated {} cached results for {}",
            before - self.entries.len(),
            selector
        );
    }

    /// Get the number of cached results
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Clear the cache and its counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
