// Namepick Pattern Compiler
// Turns one filter token into an anchored, case-insensitive prefix matcher

use std::sync::Arc;

use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};

use super::segment::{segment, PatternVariant, Segment};
use crate::layout::{expand_to_all_layouts, LayoutTable};
use crate::translit::TranslitDictionary;

/// Locale label used for the variant of a literal fallback pattern
pub const LITERAL_LOCALE: &str = "literal";

/// Errors that can occur while compiling a token
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("cannot compile an empty filter token")]
    EmptyToken,

    #[error("pattern rejected by the regex engine: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone)]
enum PrefixMatcher {
    Regex(Regex),
    /// Lowercased token, compared against the lowercased field
    Literal(String),
}

/// Compiled matcher for one filter token
///
/// Matches a field when the token, read as typed on any known layout and with
/// any known transliteration substituted, is a prefix of the field.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    token: String,
    variants: Vec<PatternVariant>,
    matcher: PrefixMatcher,
}

impl CompiledPattern {
    /// The token this pattern was compiled from
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Per-layout variants, in layout table order
    pub fn variants(&self) -> &[PatternVariant] {
        &self.variants
    }

    /// Regex source, or the lowercased token for a literal pattern
    pub fn as_str(&self) -> &str {
        match &self.matcher {
            PrefixMatcher::Regex(regex) => regex.as_str(),
            PrefixMatcher::Literal(text) => text,
        }
    }

    /// Whether this pattern is the literal fallback
    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, PrefixMatcher::Literal(_))
    }

    /// Case-insensitive prefix match against one field
    pub fn is_prefix_of(&self, field: &str) -> bool {
        match &self.matcher {
            PrefixMatcher::Regex(regex) => regex.is_match(field),
            PrefixMatcher::Literal(text) => field.to_lowercase().starts_with(text.as_str()),
        }
    }
}

/// Compiles filter tokens against a layout table and a dictionary
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    layouts: Arc<LayoutTable>,
    dictionary: Arc<TranslitDictionary>,
}

impl PatternCompiler {
    pub fn new(layouts: Arc<LayoutTable>, dictionary: Arc<TranslitDictionary>) -> Self {
        Self {
            layouts,
            dictionary,
        }
    }

    /// Compiler over the built-in layout table and dictionary
    pub fn builtin() -> Self {
        Self::new(LayoutTable::builtin(), TranslitDictionary::builtin())
    }

    pub fn layouts(&self) -> &LayoutTable {
        &self.layouts
    }

    pub fn dictionary(&self) -> &TranslitDictionary {
        &self.dictionary
    }

    /// Compile one whitespace-free token
    ///
    /// The token is rewritten into every layout, each variant is segmented
    /// against the dictionary, and the variants are joined into a single
    /// alternation anchored at the start of the field.
    pub fn compile(&self, token: &str) -> Result<CompiledPattern, PatternError> {
        if token.trim().is_empty() {
            return Err(PatternError::EmptyToken);
        }

        let variants: Vec<PatternVariant> = expand_to_all_layouts(&self.layouts, token)
            .into_iter()
            .map(|variant| PatternVariant {
                locale: variant.locale.to_string(),
                segments: segment(&self.dictionary, &variant.value),
                source: variant.value,
            })
            .collect();

        // Layouts that leave the token unchanged render identically
        let rendered: IndexSet<String> = variants.iter().map(PatternVariant::render).collect();
        let source = format!(
            "^(?:{})",
            rendered.into_iter().collect::<Vec<_>>().join("|")
        );
        log::trace!("compiled '{}' -> {}", token, source);

        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;

        Ok(CompiledPattern {
            token: token.to_string(),
            variants,
            matcher: PrefixMatcher::Regex(regex),
        })
    }

    /// Literal prefix pattern for a token, with no layout or dictionary
    /// expansion
    pub fn compile_literal(&self, token: &str) -> CompiledPattern {
        CompiledPattern {
            token: token.to_string(),
            variants: vec![PatternVariant {
                locale: LITERAL_LOCALE.to_string(),
                source: token.to_string(),
                segments: vec![Segment::Literal(token.to_string())],
            }],
            matcher: PrefixMatcher::Literal(token.to_lowercase()),
        }
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_layout_match() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("Bdfy").unwrap();

        assert!(pattern.is_prefix_of("Иван"));
        assert!(pattern.is_prefix_of("Иванов"));
        assert!(!pattern.is_prefix_of("Пётр"));
    }

    #[test]
    fn test_variants_follow_layout_order() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("Bdfy").unwrap();
        let variants = pattern.variants();

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].locale, "ru");
        assert_eq!(variants[0].source, "Иван");
        assert_eq!(variants[1].locale, "en");
        assert_eq!(variants[1].source, "Bdfy");
    }

    #[test]
    fn test_transliteration_match() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("sch").unwrap();

        assert!(pattern.is_prefix_of("Щербаков"));
        assert!(pattern.is_prefix_of("Schmidt"));
        assert!(!pattern.is_prefix_of("Шилов"));
    }

    #[test]
    fn test_latin_name_typed_in_cyrillic() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("иван").unwrap();

        assert!(pattern.is_prefix_of("Ivan"));
        assert!(pattern.is_prefix_of("Иван"));
    }

    #[test]
    fn test_case_insensitive() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("IVAN").unwrap();

        assert!(pattern.is_prefix_of("Иван"));
        assert!(pattern.is_prefix_of("ivanov"));
    }

    #[test]
    fn test_prefix_only() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("ван").unwrap();

        assert!(!pattern.is_prefix_of("Иван"));
        assert!(pattern.is_prefix_of("Ванесса"));
    }

    #[test]
    fn test_longest_match_priority() {
        let dictionary = TranslitDictionary::build(&[("ц", "ts"), ("с", "s")]).unwrap();
        let compiler = PatternCompiler::new(LayoutTable::builtin(), Arc::new(dictionary));
        let pattern = compiler.compile("ts").unwrap();

        // "ts" as a whole stands for "ц"; a match of "s" alone would leave
        // a literal "t" that "ц" cannot satisfy
        assert!(pattern.is_prefix_of("ц"));

        let en = pattern.variants().iter().find(|v| v.locale == "en").unwrap();
        assert!(matches!(&en.segments[..], [Segment::Choice(alts)] if alts[0] == "ts"));
    }

    #[test]
    fn test_tsar_matches_cyrillic_spelling() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("tsar").unwrap();

        assert!(pattern.is_prefix_of("Царёв"));
        assert!(pattern.is_prefix_of("Tsarev"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("a.b").unwrap();

        assert!(!pattern.is_prefix_of("axb"));
        assert!(pattern.is_prefix_of("a.bc"));
    }

    #[test]
    fn test_unknown_characters_match_literally() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile("42").unwrap();

        assert!(pattern.is_prefix_of("42nd"));
        assert!(!pattern.is_prefix_of("4x"));
    }

    #[test]
    fn test_empty_token_is_an_error() {
        let compiler = PatternCompiler::builtin();
        assert!(matches!(compiler.compile(""), Err(PatternError::EmptyToken)));
        assert!(matches!(compiler.compile("  "), Err(PatternError::EmptyToken)));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let compiler = PatternCompiler::builtin();
        let a = compiler.compile("Petr").unwrap();
        let b = compiler.compile("Petr").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_literal_fallback() {
        let compiler = PatternCompiler::builtin();
        let pattern = compiler.compile_literal("A(b");

        assert!(pattern.is_literal());
        assert!(pattern.is_prefix_of("a(bc"));
        assert!(!pattern.is_prefix_of("ab"));
        assert_eq!(pattern.variants()[0].locale, LITERAL_LOCALE);
    }
}
