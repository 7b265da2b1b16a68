//! Free-text normalization for recall and sequence answers.

/// Characters stripped from both ends of every recall token.
const EDGE_PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}',
];

/// Split free text into lowercase tokens.
///
/// Splits on commas and whitespace, lowercases each piece, then strips
/// [`EDGE_PUNCTUATION`] from both ends. Pieces that end up empty are dropped.
/// Order of appearance is kept and duplicates are not collapsed here.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(|piece| piece.to_lowercase())
        .map(|piece| piece.trim_matches(EDGE_PUNCTUATION).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Lowercase `text` and keep only its alphanumeric characters.
///
/// Used where embedded spacing and punctuation carry no meaning, e.g. a typed
/// digit string.
pub fn alphanumeric_only(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
