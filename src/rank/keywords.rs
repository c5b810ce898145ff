//! Keyword extraction for relevance scoring.

use std::collections::BTreeSet;

/// Stop-words removed from persona and job keyword sets.
///
/// A fixed English list; anything this short is better carried inline than
/// pulled from a corpus at runtime.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "an", "and", "any", "are", "as", "at", "be", "been", "before",
    "being", "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "him", "his", "how", "if", "in", "into", "is", "it", "its", "just",
    "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
];

/// Whether a token is a stop-word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Split text into lowercase word tokens.
///
/// Tokens are maximal alphanumeric runs; single characters are dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= 2)
        .map(|word| word.to_lowercase())
}

/// Extract the distinct keyword set of a query string: tokenized,
/// lowercased, stop-words removed. Returned sorted for deterministic
/// iteration.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    tokenize(text)
        .filter(|token| !is_stop_word(token))
        .collect()
}
