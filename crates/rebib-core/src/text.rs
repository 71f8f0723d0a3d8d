//! Text helpers for key-token extraction
//!
//! Surname and title-word extraction used by the key generator, plus the
//! author-field cleanup applied before any token leaves the pipeline.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Stop words skipped when picking the title word for a citation key
    static ref STOP_WORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for word in [
            "the", "a", "an", "on", "in", "of", "for", "and", "with", "via", "to", "from",
        ] {
            set.insert(word);
        }
        set
    };

    /// A trailing space followed by exactly four digits, as appended by
    /// bibliographic databases to disambiguate same-named authors
    static ref DISAMBIGUATION_SUFFIX: Regex = Regex::new(r"\s+\d{4}$").unwrap();
}

/// Remove numeric disambiguation suffixes from an author/editor field.
///
/// Each name in the `and`-separated list is handled on its own, so
/// `"Jane Doe 0001 and John Roe"` becomes `"Jane Doe and John Roe"`.
pub fn strip_disambiguation_suffixes(field: &str) -> String {
    field
        .split(" and ")
        .map(|name| DISAMBIGUATION_SUFFIX.replace(name, "").into_owned())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Extract the first author's surname for key generation.
///
/// Handles both "Last, First" and "First Last" formats; the result is folded
/// to ASCII alphanumerics. Returns "Unknown" when the field is absent or
/// blank.
pub fn first_author_surname(author_field: Option<&str>) -> String {
    let Some(field) = author_field.map(str::trim).filter(|f| !f.is_empty()) else {
        return "Unknown".to_string();
    };

    let first_author = field.split(" and ").next().unwrap_or(field).trim();

    let surname = if let Some(comma) = first_author.find(',') {
        &first_author[..comma]
    } else {
        first_author
            .split_whitespace()
            .last()
            .unwrap_or(first_author)
    };

    fold_to_alphanumeric(surname)
}

/// Extract the title word for key generation: the first word that is not a
/// stop word, with its first letter capitalized.
///
/// Falls back to the first word when the title is all stop words, and to
/// "Untitled" when there is no usable word at all.
pub fn title_key_word(title: Option<&str>) -> String {
    let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
        return "Untitled".to_string();
    };

    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    for word in &words {
        if !STOP_WORDS.contains(word.to_lowercase().as_str()) {
            return capitalize_first(word);
        }
    }

    match words.first() {
        Some(word) => capitalize_first(word),
        None => "Untitled".to_string(),
    }
}

/// Fold a string to its ASCII alphanumeric characters, decomposing
/// diacritics first so "Müller" becomes "Muller" rather than "Mller".
pub fn fold_to_alphanumeric(s: &str) -> String {
    s.nfkd().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Capitalize the first letter of a word, leaving the rest untouched
fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}
