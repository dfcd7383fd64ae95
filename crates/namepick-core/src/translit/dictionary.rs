// Namepick Translit Dictionary
// Bidirectional transliteration equivalences, closed over substring decomposition

use std::sync::{Arc, OnceLock};

use indexmap::{IndexMap, IndexSet};

use super::builtin::FORWARD;

/// Errors raised while building a dictionary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    #[error("transliteration keys cannot be empty")]
    EmptyKey,
}

/// Key -> ordered, duplicate-free alternatives
type Alternations = IndexMap<String, IndexSet<String>>;

/// Transliteration dictionary used by the pattern compiler
///
/// Every key maps to the full list of strings it is equivalent to, the key
/// itself included. Keys are lowercase; lookups are expected to lowercase
/// the probed text first.
#[derive(Debug, Clone, Default)]
pub struct TranslitDictionary {
    entries: IndexMap<String, Vec<String>>,
    max_key_chars: usize,
}

impl TranslitDictionary {
    /// Build a dictionary from forward entries
    ///
    /// Each entry is `(source, "alt1|alt2|...")`. The reverse direction is
    /// derived from the forward one, both directions are expanded over
    /// substring decomposition, and the results are merged.
    pub fn build<K, V>(forward: &[(K, V)]) -> Result<Self, DictionaryError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let forward = parse_forward(forward)?;
        let reverse = reverse(&forward);

        let forward_expanded = expand(&forward);
        let reverse_expanded = expand(&reverse);

        let dictionary = Self::merge([forward_expanded, reverse_expanded]);
        log::debug!(
            "translit dictionary: {} forward keys, {} reverse keys, {} merged keys",
            forward.len(),
            reverse.len(),
            dictionary.len()
        );
        Ok(dictionary)
    }

    /// Process-wide dictionary built from the built-in forward table
    pub fn builtin() -> Arc<TranslitDictionary> {
        static BUILTIN: OnceLock<Arc<TranslitDictionary>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                // Built-in keys are non-empty literals, so the build cannot fail
                let dictionary = Self::build(FORWARD).unwrap_or_default();
                Arc::new(dictionary)
            })
            .clone()
    }

    /// The built-in forward entries the built-in dictionary is made from
    pub fn builtin_forward() -> &'static [(&'static str, &'static str)] {
        FORWARD
    }

    fn merge(parts: [Alternations; 2]) -> Self {
        let mut merged: Alternations = IndexMap::new();
        for part in parts {
            for (key, alternatives) in part {
                merged
                    .entry(key.to_lowercase())
                    .or_default()
                    .extend(alternatives);
            }
        }

        let max_key_chars = merged.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        let entries = merged
            .into_iter()
            .map(|(key, alternatives)| (key, alternatives.into_iter().collect()))
            .collect();

        Self {
            entries,
            max_key_chars,
        }
    }

    /// Alternatives for a lowercase key
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Alternatives for any-case text
    pub fn lookup(&self, text: &str) -> Option<&[String]> {
        self.get(&text.to_lowercase())
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length, in characters, of the longest key
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    /// Keys in substitution priority order
    ///
    /// Longer keys come first so that a key is always tried before any of
    /// its substrings. Keys of equal length keep insertion order.
    pub fn keys_by_priority(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
        keys
    }

    /// Iterate over (key, alternatives) in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

fn parse_forward<K, V>(forward: &[(K, V)]) -> Result<Alternations, DictionaryError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parsed: Alternations = IndexMap::new();
    for (key, value) in forward {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(DictionaryError::EmptyKey);
        }
        parsed
            .entry(key.to_string())
            .or_default()
            .extend(value.as_ref().split('|').map(str::to_string));
    }
    Ok(parsed)
}

/// Every alternative of a key gets that key as one of its own alternatives
fn reverse(forward: &Alternations) -> Alternations {
    let mut reverse: Alternations = IndexMap::new();
    for (key, alternatives) in forward {
        for alternative in alternatives.iter().filter(|a| !a.is_empty()) {
            reverse
                .entry(alternative.clone())
                .or_default()
                .insert(key.clone());
        }
    }
    reverse
}

/// Full alternative list for every key: the key, its direct alternatives,
/// then everything its decomposition produces
fn expand(dictionary: &Alternations) -> Alternations {
    dictionary
        .iter()
        .map(|(key, alternatives)| {
            let mut expanded = IndexSet::with_capacity(alternatives.len() + 1);
            expanded.insert(key.clone());
            expanded.extend(alternatives.iter().cloned());
            if key.chars().count() > 1 {
                expanded.extend(decompose(dictionary, key));
            }
            (key.clone(), expanded)
        })
        .collect()
}

/// Derive every string reachable from `source` by substituting dictionary keys
///
/// One step replaces the first occurrence of a key contained in the current
/// string with one of that key's alternatives. A derived string is queued for
/// further steps only the first time it enters `seen`, so the walk terminates
/// even when the dictionary contains cycles.
fn decompose(dictionary: &Alternations, source: &str) -> IndexSet<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    let mut pending = vec![source.to_string()];

    while let Some(current) = pending.pop() {
        for (key, alternatives) in dictionary {
            if key == &current || !current.contains(key.as_str()) {
                continue;
            }
            for alternative in alternatives {
                let derived = current.replacen(key.as_str(), alternative, 1);
                if seen.insert(derived.clone()) {
                    pending.push(derived);
                }
            }
        }
    }

    seen
}
