//! Deterministic citation key generation
//!
//! Builds keys from a template containing the placeholders `[Auth]`,
//! `[Year]`, `[Title]` and `[Venue]`, in any order or repetition.
//! Unrecognized placeholders pass through unchanged. The finished key is
//! lowercased and stripped to `[a-z0-9_-]`.
//!
//! The generator is a pure function of its inputs; collisions between
//! records are an observable output property, not an error.

use lazy_static::lazy_static;
use regex::Regex;

use rebib_bibtex::RawRecord;

use crate::text::{first_author_surname, title_key_word};
use crate::venue::VenueResolution;

/// Venue tokens longer than this are compressed to word initials
pub const VENUE_COMPRESS_LEN: usize = 20;
/// Fallback truncation length for long single-word venue tokens
pub const VENUE_TRUNCATE_LEN: usize = 10;

lazy_static! {
    static ref NON_KEY_CHARS: Regex = Regex::new(r"[^a-z0-9_-]").unwrap();
}

/// Generate a citation key for a record.
///
/// With `keep_original` set and a non-empty source key, the source key is
/// returned verbatim, unsanitized; that mode is an explicit opt-in to trust
/// the source key format.
pub fn generate(
    record: &RawRecord,
    resolution: &VenueResolution,
    template: &str,
    keep_original: bool,
) -> String {
    if keep_original && !record.citation_key.is_empty() {
        return record.citation_key.clone();
    }

    let author = first_author_surname(record.author());
    let year = year_token(record.year());
    let title = title_key_word(record.title());
    let venue = venue_token(&resolution.key_token);

    let key = template
        .replace("[Auth]", &author)
        .replace("[Year]", &year)
        .replace("[Title]", &title)
        .replace("[Venue]", &venue)
        .to_lowercase();

    NON_KEY_CHARS.replace_all(&key, "").into_owned()
}

/// Year with non-alphanumeric characters stripped; "0000" when absent
fn year_token(year: Option<&str>) -> String {
    match year {
        Some(year) if !year.trim().is_empty() => {
            year.chars().filter(|c| c.is_alphanumeric()).collect()
        }
        _ => "0000".to_string(),
    }
}

/// Compress a venue token so generated keys stay short even when the venue
/// is an unresolved long phrase.
///
/// Tokens over [`VENUE_COMPRESS_LEN`] characters become the concatenation of
/// each word's leading letter; a long token with fewer than two words is
/// truncated to [`VENUE_TRUNCATE_LEN`] characters instead.
fn venue_token(raw_token: &str) -> String {
    let cleaned: String = raw_token
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= VENUE_COMPRESS_LEN {
        return cleaned.to_string();
    }

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() >= 2 {
        words
            .iter()
            .filter_map(|word| word.chars().next())
            .collect()
    } else {
        cleaned.chars().take(VENUE_TRUNCATE_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::MatchedVia;

    fn resolution(token: &str) -> VenueResolution {
        VenueResolution {
            display_name: token.to_string(),
            key_token: token.to_string(),
            matched_via: MatchedVia::RuleLibrary,
            warning: None,
        }
    }

    fn record(fields: &[(&str, &str)]) -> RawRecord {
        let mut record = RawRecord::new("article", "SourceKey");
        for (k, v) in fields {
            record.set_field(*k, *v);
        }
        record
    }

    #[test]
    fn test_generate_basic_key() {
        let record = record(&[
            ("author", "Smith, J."),
            ("title", "A Study of Foo"),
            ("year", "2024"),
        ]);

        let key = generate(&record, &resolution("CVPR"), "[Auth][Year][Title]_[Venue]", false);
        assert_eq!(key, "smith2024study_cvpr");
    }

    #[test]
    fn test_keep_original_returns_source_key_verbatim() {
        let mut record = record(&[("author", "Smith, J.")]);
        record.citation_key = "Smith_2024_CVPR!!".to_string();

        let key = generate(&record, &resolution("CVPR"), "[Auth][Year]", true);
        assert_eq!(key, "Smith_2024_CVPR!!");
    }

    #[test]
    fn test_keep_original_with_empty_source_key_generates() {
        let mut record = record(&[("author", "Smith, J."), ("year", "2024")]);
        record.citation_key = String::new();

        let key = generate(&record, &resolution("CVPR"), "[Auth][Year]", true);
        assert_eq!(key, "smith2024");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let record = record(&[]);
        let key = generate(&record, &resolution("CVPR"), "[Auth][Year][Title]", false);
        assert_eq!(key, "unknown0000untitled");
    }

    #[test]
    fn test_long_venue_token_compresses_to_initials() {
        let record = record(&[("author", "Smith, J."), ("year", "2024")]);
        let resolution = resolution("Advances in Neural Information Processing Systems");

        let key = generate(&record, &resolution, "[Auth][Year]_[Venue]", false);
        assert_eq!(key, "smith2024_ainips");
    }

    #[test]
    fn test_long_single_word_venue_token_truncates() {
        let record = record(&[("author", "Smith, J."), ("year", "2024")]);
        let resolution = resolution("Supercalifragilisticexpialidocious");

        let key = generate(&record, &resolution, "[Auth]_[Venue]", false);
        assert_eq!(key, "smith_supercalif");
    }

    #[test]
    fn test_short_venue_token_is_kept() {
        let record = record(&[("author", "Smith, J.")]);
        let key = generate(&record, &resolution("Unknown Workshop XYZ"), "[Venue]", false);
        assert_eq!(key, "unknownworkshopxyz");
    }

    #[test]
    fn test_template_placeholder_repetition() {
        let record = record(&[("year", "2024")]);
        let key = generate(&record, &resolution("CVPR"), "[Year]-[Year]", false);
        assert_eq!(key, "2024-2024");
    }

    #[test]
    fn test_unrecognized_placeholder_passes_through() {
        let record = record(&[("year", "2024")]);
        let key = generate(&record, &resolution("CVPR"), "[Year][Extra]", false);
        assert_eq!(key, "2024extra");
    }

    #[test]
    fn test_year_token_strips_punctuation() {
        let record = record(&[("year", "{2024}")]);
        let key = generate(&record, &resolution("CVPR"), "[Year]", false);
        assert_eq!(key, "2024");
    }

    #[test]
    fn test_underscores_and_hyphens_survive_sanitization() {
        let record = record(&[("author", "Smith, J."), ("year", "2024")]);
        let key = generate(&record, &resolution("CVPR"), "[Auth]_[Year]-[Venue]", false);
        assert_eq!(key, "smith_2024-cvpr");
    }

    #[test]
    fn test_generation_is_deterministic() {
        let record = record(&[
            ("author", "Smith, J."),
            ("title", "A Study of Foo"),
            ("year", "2024"),
        ]);
        let res = resolution("CVPR");

        let first = generate(&record, &res, "[Auth][Year][Title]_[Venue]", false);
        let second = generate(&record, &res, "[Auth][Year][Title]_[Venue]", false);
        assert_eq!(first, second);
    }
}
