//! Text folding and collation helpers.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

fn is_diacritic(c: char) -> bool {
    COMBINING_MARKS.contains(&c)
}

/// NFKD-decompose and drop combining diacritical marks.
pub fn strip_diacritics(s: &str) -> String {
    s.nfkd().filter(|c| !is_diacritic(*c)).collect()
}

/// Normalize a string for matching.
///
/// Decomposes (NFKD), strips combining diacritical marks, lowercases, collapses
/// whitespace runs to a single space and trims both ends. The result is a fixed
/// point: `normalize(&normalize(s)) == normalize(s)`.
///
/// # Example
///
/// ```
/// use stampcard_lib::text::normalize;
///
/// assert_eq!(normalize("  Café   Crème "), "cafe creme");
/// ```
pub fn normalize(s: &str) -> String {
    let folded = strip_diacritics(s).to_lowercase();
    let mut out = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    // Lowercasing can produce fresh combining marks (e.g. U+0130), fold again.
    if out.chars().any(is_diacritic) {
        out = normalize(&out);
    }
    out
}

/// Compare two strings the way a user-facing locale sort does.
///
/// Letters compare ignoring accents and case first, then unaccented before
/// accented, then lowercase before uppercase, then by code point.
///
/// ```
/// use std::cmp::Ordering;
/// use stampcard_lib::text::locale_cmp;
///
/// assert_eq!(locale_cmp("alice", "Bob"), Ordering::Less);
/// assert_eq!(locale_cmp("cafe", "Café"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let base_a = strip_diacritics(a).to_lowercase();
    let base_b = strip_diacritics(b).to_lowercase();
    base_a
        .cmp(&base_b)
        .then_with(|| {
            let accents_a = a.nfkd().collect::<String>().to_lowercase();
            let accents_b = b.nfkd().collect::<String>().to_lowercase();
            accents_a.cmp(&accents_b)
        })
        .then_with(|| {
            let case_a = a.chars().map(char::is_uppercase);
            let case_b = b.chars().map(char::is_uppercase);
            case_a.cmp(case_b)
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Café"), normalize("cafe"));
        assert_eq!(normalize("ÅNGSTRÖM"), "angstrom");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("\tJohn \n  Smith  "), "john smith");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn compatibility_forms_fold() {
        // Ligature and full-width forms decompose under NFKD.
        assert_eq!(normalize("ﬁle"), "file");
        assert_eq!(normalize("ＡＢＣ"), "abc");
    }

    #[test]
    fn locale_order_is_case_insensitive_first() {
        let mut names = vec!["bob", "Alice", "alice", "Émile", "eve"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["alice", "Alice", "bob", "Émile", "eve"]);
    }
}
