// Namepick Layout Transliterator
// Rewrites a string as if it had been typed on every other layout of a table

use super::table::LayoutTable;

/// A string rewritten into one layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutVariant<'a> {
    pub locale: &'a str,
    pub value: String,
}

/// Rewrite `s` into every layout of the table
///
/// Produces one variant per locale, in table order. Each character is looked
/// up in the first layout that contains it and replaced by the character on
/// the same physical key of the target layout. Characters that are on no
/// layout pass through unchanged.
///
/// For example, with the built-in table:
/// - "Bdfy" -> [("ru", "Иван"), ("en", "Bdfy")]
/// - "ghbdtn 42" -> [("ru", "привет 42"), ("en", "ghbdtn 42")]
pub fn expand_to_all_layouts<'a>(table: &'a LayoutTable, s: &str) -> Vec<LayoutVariant<'a>> {
    // Resolve key positions once, reuse them for every target layout
    let positions: Vec<(char, Option<usize>)> = s
        .chars()
        .map(|c| (c, table.position_of(c).map(|(_, pos)| pos)))
        .collect();

    table
        .iter()
        .map(|target| {
            let value = positions
                .iter()
                .map(|&(c, pos)| pos.and_then(|p| target.key_at(p)).unwrap_or(c))
                .collect();
            LayoutVariant {
                locale: target.locale(),
                value,
            }
        })
        .collect()
}

/// Rewrite `s` from one layout into another
///
/// Only characters of the `from` layout are converted. Returns None when
/// either locale is unknown.
pub fn transliterate(table: &LayoutTable, s: &str, from: &str, to: &str) -> Option<String> {
    let from = table.layout(from)?;
    let to = table.layout(to)?;

    Some(
        s.chars()
            .map(|c| {
                from.position_of(c)
                    .and_then(|pos| to.key_at(pos))
                    .unwrap_or(c)
            })
            .collect(),
    )
}
