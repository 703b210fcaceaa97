use lazy_static::lazy_static;
use regex::Regex;

/// Size descriptors dropped from ingredient names.
pub const SIZE_MODIFIERS: &[&str] = &["small", "medium", "large", "extra large", "whole"];

/// Preparation descriptors dropped from ingredient names.
pub const PREPARATION_MODIFIERS: &[&str] = &[
    "chopped", "diced", "sliced", "minced", "cooked", "raw", "fresh", "dried", "frozen",
];

lazy_static! {
    /// Whole-word, case-insensitive alternation of every modifier. Leftmost
    /// alternative wins, so "extra large" is removed as one phrase.
    static ref MODIFIER_PATTERN: Regex = {
        let words: Vec<String> = SIZE_MODIFIERS
            .iter()
            .chain(PREPARATION_MODIFIERS)
            .map(|w| regex::escape(w).replace(' ', r"\s+"))
            .collect();
        Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).unwrap()
    };
}

/// Strip size and preparation modifiers from a raw ingredient name and
/// collapse the leftover whitespace.
///
/// Pluralization, punctuation and word order are left alone. The result
/// may be empty when every word was a modifier.
pub fn normalize_name(raw_name: &str) -> String {
    let stripped = MODIFIER_PATTERN.replace_all(raw_name, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
