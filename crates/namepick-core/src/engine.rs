// Namepick Filter Engine
// Matcher plus result cache: the filtering entry point used by pickers

use std::sync::Arc;

use crate::cache::{CacheKey, FilterResult, ResultCache, SelectorId};
use crate::layout::LayoutTable;
use crate::matcher::{CandidateFilter, Matcher, UserRecord};
use crate::translit::TranslitDictionary;

/// Filters candidate lists and memoizes the results per selector
///
/// The cache key is the selector and the lowercased filter; the candidate
/// list is not part of it. Call [`FilterEngine::invalidate`] whenever a
/// selector's list changes.
#[derive(Debug)]
pub struct FilterEngine<F: CandidateFilter = Matcher> {
    matcher: F,
    cache: ResultCache,
}

impl FilterEngine<Matcher> {
    /// Engine over the built-in layout table and dictionary
    pub fn builtin() -> Self {
        Self::new(Matcher::builtin())
    }

    pub fn from_tables(layouts: Arc<LayoutTable>, dictionary: Arc<TranslitDictionary>) -> Self {
        Self::new(Matcher::new(layouts, dictionary))
    }
}

impl<F: CandidateFilter> FilterEngine<F> {
    pub fn new(matcher: F) -> Self {
        Self {
            matcher,
            cache: ResultCache::new(),
        }
    }

    /// Filter `candidates` for one selector
    ///
    /// Repeating a filter on the same selector, in any letter case, returns
    /// the stored result without running the matcher.
    pub fn filter(
        &mut self,
        candidates: Option<&[UserRecord]>,
        filter: Option<&str>,
        selector: SelectorId,
    ) -> FilterResult {
        let matcher = &self.matcher;
        self.cache
            .get_or_insert_with(CacheKey::new(selector, filter), || {
                matcher.filter(candidates, filter)
            })
    }

    /// Forget every stored result of one selector
    pub fn invalidate(&mut self, selector: SelectorId) {
        self.cache.invalidate(selector);
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn matcher(&self) -> &F {
        &self.matcher
    }
}

impl Default for FilterEngine<Matcher> {
    fn default() -> Self {
        Self::builtin()
    }
}
