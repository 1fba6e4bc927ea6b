use strsim::levenshtein;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form used on both sides of every comparison.
///
/// Unicode decomposition with combining marks dropped (so "José" and "Jose"
/// compare equal), lowercase, punctuation removed, whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First word of an already normalized name.
pub fn first_name(normalized: &str) -> &str {
    normalized.split(' ').next().unwrap_or(normalized)
}

/// Whether a normalized name has more than one word.
pub fn is_multi_word(normalized: &str) -> bool {
    normalized.contains(' ')
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Edit distance turned into a 0.0-1.0 similarity: `1 - distance / max_len`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let max_len = char_len(a).max(char_len(b));
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}
