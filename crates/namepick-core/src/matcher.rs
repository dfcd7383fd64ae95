// Namepick Matcher
// Filters a candidate list with one compiled pattern per filter token

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::layout::LayoutTable;
use crate::pattern::{CompiledPattern, PatternCompiler};
use crate::translit::TranslitDictionary;

/// Identifier of a candidate user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id)
    }
}

/// A candidate as far as matching is concerned
///
/// Any other fields of the source record are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserRecord {
    pub fn new(id: u64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last", skipping empty parts
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Something that can filter a candidate list
///
/// `None` means no filter was applied; `Some(vec![])` means nothing matched.
pub trait CandidateFilter {
    fn filter(&self, users: Option<&[UserRecord]>, filter: Option<&str>) -> Option<Vec<UserId>>;
}

/// Per-token patterns for one filter string (most filters have few tokens)
pub type TokenPatterns = SmallVec<[CompiledPattern; 4]>;

/// Layout and transliteration aware candidate matcher
#[derive(Debug, Clone)]
pub struct Matcher {
    compiler: PatternCompiler,
}

impl Matcher {
    pub fn new(layouts: Arc<LayoutTable>, dictionary: Arc<TranslitDictionary>) -> Self {
        Self {
            compiler: PatternCompiler::new(layouts, dictionary),
        }
    }

    /// Matcher over the built-in layout table and dictionary
    pub fn builtin() -> Self {
        Self {
            compiler: PatternCompiler::builtin(),
        }
    }

    pub fn compiler(&self) -> &PatternCompiler {
        &self.compiler
    }

    pub fn layouts(&self) -> &LayoutTable {
        self.compiler.layouts()
    }

    pub fn dictionary(&self) -> &TranslitDictionary {
        self.compiler.dictionary()
    }

    /// Compile one pattern per whitespace-separated token
    ///
    /// A token the compiler rejects falls back to a literal prefix match.
    pub fn compile_filter(&self, filter: &str) -> TokenPatterns {
        filter
            .split_whitespace()
            .map(|token| {
                self.compiler.compile(token).unwrap_or_else(|e| {
                    log::warn!("token '{}' matched literally: {}", token, e);
                    self.compiler.compile_literal(token)
                })
            })
            .collect()
    }

    /// Filter `users`, keeping their original order
    ///
    /// Returns `None` when there is no list or no filter. A filter made only
    /// of whitespace keeps every user.
    pub fn filter(&self, users: Option<&[UserRecord]>, filter: Option<&str>) -> Option<Vec<UserId>> {
        let users = users?;
        let filter = filter.filter(|f| !f.is_empty())?;

        let patterns = self.compile_filter(filter);
        Some(
            users
                .iter()
                .filter(|user| matches_all(&patterns, user))
                .map(|user| user.id)
                .collect(),
        )
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CandidateFilter for Matcher {
    fn filter(&self, users: Option<&[UserRecord]>, filter: Option<&str>) -> Option<Vec<UserId>> {
        Matcher::filter(self, users, filter)
    }
}

/// Every token must be a prefix of the first or the last name
fn matches_all(patterns: &[CompiledPattern], user: &UserRecord) -> bool {
    patterns.iter().all(|pattern| {
        pattern.is_prefix_of(&user.first_name) || pattern.is_prefix_of(&user.last_name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Иван", "Петров"),
            UserRecord::new(2, "Пётр", "Иванов"),
            UserRecord::new(3, "Анна", "Щербакова"),
            UserRecord::new(4, "John", "Smith"),
            UserRecord::new(5, "Иван", "Сидоров"),
        ]
    }

    fn ids(result: Option<Vec<UserId>>) -> Vec<u64> {
        result.unwrap().into_iter().map(|id| id.0).collect()
    }

    #[test]
    fn test_no_list_or_no_filter_is_none() {
        let matcher = Matcher::builtin();
        let users = users();

        assert_eq!(matcher.filter(None, Some("ivan")), None);
        assert_eq!(matcher.filter(Some(&users), None), None);
        assert_eq!(matcher.filter(Some(&users), Some("")), None);
    }

    #[test]
    fn test_whitespace_filter_keeps_everyone() {
        let matcher = Matcher::builtin();
        let users = users();
        assert_eq!(ids(matcher.filter(Some(&users), Some("   "))), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_match_is_empty_not_none() {
        let matcher = Matcher::builtin();
        let users = users();
        assert_eq!(matcher.filter(Some(&users), Some("zzz")), Some(vec![]));
    }

    #[test]
    fn test_prefix_on_either_field() {
        let matcher = Matcher::builtin();
        let users = users();

        // First name of 1 and 5, last name of 2
        assert_eq!(ids(matcher.filter(Some(&users), Some("Иван"))), vec![1, 2, 5]);
    }

    #[test]
    fn test_tokens_are_anded_in_any_order() {
        let matcher = Matcher::builtin();
        let users = users();

        assert_eq!(ids(matcher.filter(Some(&users), Some("Иван Петров"))), vec![1]);
        assert_eq!(ids(matcher.filter(Some(&users), Some("Петров Иван"))), vec![1]);
        assert_eq!(ids(matcher.filter(Some(&users), Some("  Иван   Сид "))), vec![5]);
    }

    #[test]
    fn test_wrong_layout_and_transliteration() {
        let matcher = Matcher::builtin();
        let users = users();

        assert_eq!(ids(matcher.filter(Some(&users), Some("Bdfy"))), vec![1, 2, 5]);
        assert_eq!(ids(matcher.filter(Some(&users), Some("sch"))), vec![3]);
        assert_eq!(ids(matcher.filter(Some(&users), Some("джо"))), vec![4]);
    }

    #[test]
    fn test_order_is_preserved() {
        let matcher = Matcher::builtin();
        let users = users();
        let result = ids(matcher.filter(Some(&users), Some("и")));

        let mut sorted = result.clone();
        sorted.sort();
        assert_eq!(result, sorted);
    }

    #[test]
    fn test_compile_filter_skips_empty_tokens() {
        let matcher = Matcher::builtin();
        let patterns = matcher.compile_filter("  a  b ");

        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].token(), "a");
        assert_eq!(patterns[1].token(), "b");
    }

    #[test]
    fn test_record_deserializes_with_extra_fields() {
        let json = r#"{"id": 7, "first_name": "Олег", "last_name": "Ким", "email": "o@k"}"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record, UserRecord::new(7, "Олег", "Ким"));
        assert_eq!(record.display_name(), "Олег Ким");
    }
}
