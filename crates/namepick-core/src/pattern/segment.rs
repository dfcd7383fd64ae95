// Namepick Pattern Segments
// Structured form of a compiled token: literal runs and dictionary choices

use crate::translit::TranslitDictionary;

/// One piece of a pattern variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text matched as-is (case-insensitively)
    Literal(String),
    /// Any one of the listed strings
    Choice(Vec<String>),
}

impl Segment {
    fn render_into(&self, out: &mut String) {
        match self {
            Segment::Literal(text) => out.push_str(&regex::escape(text)),
            Segment::Choice(alternatives) => {
                out.push_str("(?:");
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    out.push_str(&regex::escape(alternative));
                }
                out.push(')');
            }
        }
    }
}

/// A token as typed on one layout, split into segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternVariant {
    pub locale: String,
    pub source: String,
    pub segments: Vec<Segment>,
}

impl PatternVariant {
    /// Regex source for this variant (unanchored)
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            segment.render_into(&mut out);
        }
        out
    }
}

/// Split `text` into literal runs and dictionary choices
///
/// At every position the longest dictionary key is tried first, down to a
/// single character, so a key always wins over its own substrings.
/// Comparison is case-insensitive.
pub fn segment(dictionary: &TranslitDictionary, text: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let max_key = dictionary.max_key_chars();

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let longest = (1..=max_key.min(chars.len() - i)).rev().find_map(|len| {
            let probe: String = chars[i..i + len].iter().collect();
            dictionary.lookup(&probe).map(|alternatives| (len, alternatives))
        });

        match longest {
            Some((len, alternatives)) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Choice(alternatives.to_vec()));
                i += len;
            }
            None => {
                literal.push(chars[i]);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}
