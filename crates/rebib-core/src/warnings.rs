//! Warning taxonomy and record checks
//!
//! Warnings are structured diagnostics: the pipeline accumulates them and
//! hands them to the caller instead of guessing silently or failing. The
//! venue resolver produces the resolution-related kinds; `check_record`
//! covers field completeness and format nits.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use rebib_bibtex::{EntryKind, RawRecord};

/// How urgent a warning is.
///
/// `Error` flags data that needs attention (missing required fields) but
/// never stops processing; a best-effort record is still emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Error,
}

/// The distinguishable warning conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// No rule matched the venue; the raw string was kept
    VenueUnknown,
    /// The venue token came from an external lookup hint, not the rule library
    VenueFromHint,
    /// A rule matched but an external hint disagrees with the outcome
    VenueMismatch,
    /// A field required for this entry type is absent
    MissingField,
    /// A present field has a suspicious format
    FormatIssue,
}

/// A single diagnostic attached to a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Warning {
    /// No rule matched; the raw venue string is kept as-is
    pub fn venue_unknown(raw_venue: &str) -> Self {
        Self {
            kind: WarningKind::VenueUnknown,
            field: "booktitle".to_string(),
            message: format!(
                "\"{}...\" (Not in Library, keeping original)",
                truncate(raw_venue, VENUE_PREVIEW_LEN)
            ),
            severity: Severity::Medium,
        }
    }

    /// The venue token was taken from an external lookup hint
    pub fn venue_from_hint(token: &str) -> Self {
        Self {
            kind: WarningKind::VenueFromHint,
            field: "booktitle".to_string(),
            message: format!("\"{}\" (From DBLP, not in Library)", token),
            severity: Severity::Low,
        }
    }

    /// A rule matched but the external hint disagrees with the outcome
    pub fn venue_mismatch(display: &str, hint: &str) -> Self {
        Self {
            kind: WarningKind::VenueMismatch,
            field: "booktitle".to_string(),
            message: format!("Mismatch: Output \"{}\" vs DBLP \"{}\"", display, hint),
            severity: Severity::Medium,
        }
    }

    fn missing_field(field: &str) -> Self {
        Self {
            kind: WarningKind::MissingField,
            field: field.to_string(),
            message: format!("Missing field: {}", field),
            severity: Severity::Error,
        }
    }

    fn format_issue(field: &str, message: String) -> Self {
        Self {
            kind: WarningKind::FormatIssue,
            field: field.to_string(),
            message,
            severity: Severity::Low,
        }
    }
}

/// How many characters of the raw venue to quote in a warning
const VENUE_PREVIEW_LEN: usize = 40;

lazy_static! {
    static ref PAGE_RANGE: Regex = Regex::new(r"(\d+)-(\d+)").unwrap();
    static ref FOUR_DIGIT_YEAR: Regex = Regex::new(r"^\d{4}$").unwrap();
}

/// Check a record for missing required fields and format issues.
///
/// Required fields depend on the entry type: author/title/year always, a
/// venue field for articles and conference papers, a publisher for books.
/// Findings are reported; processing always continues.
pub fn check_record(record: &RawRecord) -> Vec<Warning> {
    let mut warnings = Vec::new();

    check_missing_fields(record, &mut warnings);
    check_format_issues(record, &mut warnings);

    warnings
}

fn check_missing_fields(record: &RawRecord, warnings: &mut Vec<Warning>) {
    let author_missing = match record.author() {
        None => true,
        Some(value) => {
            let trimmed = value.trim();
            trimmed.is_empty() || trimmed.to_lowercase().contains("unknown")
        }
    };
    if author_missing {
        warnings.push(Warning::missing_field("author"));
    }

    if !record.has_field("title") {
        warnings.push(Warning::missing_field("title"));
    }

    if !record.has_field("year") {
        warnings.push(Warning::missing_field("year"));
    }

    let has_venue =
        record.has_field("booktitle") || record.has_field("journal") || record.has_field("venue");

    match record.kind() {
        EntryKind::Article | EntryKind::InProceedings => {
            if !has_venue {
                warnings.push(Warning::missing_field("booktitle/journal"));
            }
        }
        EntryKind::Book | EntryKind::InBook => {
            if !record.has_field("publisher") {
                warnings.push(Warning::missing_field("publisher"));
            }
        }
        _ => {}
    }
}

fn check_format_issues(record: &RawRecord, warnings: &mut Vec<Warning>) {
    // Page ranges should use -- rather than a single hyphen
    if let Some(pages) = record.get_field("pages") {
        if pages.contains('-') && !pages.contains("--") {
            let suggested = PAGE_RANGE.replace_all(pages, "$1--$2");
            warnings.push(Warning::format_issue(
                "pages",
                format!("Page range \"{}\" should be \"{}\"", pages, suggested),
            ));
        }
    }

    if let Some(year) = record.year() {
        if !year.trim().is_empty() && !FOUR_DIGIT_YEAR.is_match(year.trim()) {
            warnings.push(Warning::format_issue(
                "year",
                format!("Year \"{}\" is not a 4-digit value", year),
            ));
        }
    }

    if let Some(doi) = record.get_field("doi") {
        if !doi.trim().is_empty() && !doi.trim().starts_with("10.") {
            warnings.push(Warning::format_issue(
                "doi",
                format!("DOI \"{}\" does not start with \"10.\"", doi),
            ));
        }
    }
}

/// Truncate a string to at most `max` characters
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entry_type: &str, fields: &[(&str, &str)]) -> RawRecord {
        let mut record = RawRecord::new(entry_type, "key");
        for (k, v) in fields {
            record.set_field(*k, *v);
        }
        record
    }

    #[test]
    fn test_complete_article_has_no_warnings() {
        let record = record(
            "article",
            &[
                ("author", "Smith, J."),
                ("title", "A Study"),
                ("year", "2024"),
                ("journal", "Nature"),
            ],
        );
        assert!(check_record(&record).is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_errors() {
        let record = record("article", &[]);
        let warnings = check_record(&record);

        for field in ["author", "title", "year", "booktitle/journal"] {
            let warning = warnings
                .iter()
                .find(|w| w.field == field)
                .unwrap_or_else(|| panic!("no warning for {}", field));
            assert_eq!(warning.kind, WarningKind::MissingField);
            assert_eq!(warning.severity, Severity::Error);
        }
    }

    #[test]
    fn test_unknown_author_counts_as_missing() {
        let record = record(
            "misc",
            &[("author", "Unknown Author"), ("title", "T"), ("year", "2024")],
        );
        let warnings = check_record(&record);
        assert!(warnings.iter().any(|w| w.field == "author"));
    }

    #[test]
    fn test_book_requires_publisher() {
        let record = record(
            "book",
            &[("author", "Smith, J."), ("title", "T"), ("year", "2024")],
        );
        let warnings = check_record(&record);
        assert!(warnings.iter().any(|w| w.field == "publisher"));
    }

    #[test]
    fn test_conference_alias_requires_venue() {
        let record = record(
            "conference",
            &[("author", "Smith, J."), ("title", "T"), ("year", "2024")],
        );
        let warnings = check_record(&record);
        assert!(warnings.iter().any(|w| w.field == "booktitle/journal"));
    }

    #[test]
    fn test_single_hyphen_pages_get_suggestion() {
        let record = record(
            "misc",
            &[
                ("author", "Smith, J."),
                ("title", "T"),
                ("year", "2024"),
                ("pages", "12-34"),
            ],
        );
        let warnings = check_record(&record);
        let warning = warnings.iter().find(|w| w.field == "pages").unwrap();
        assert_eq!(warning.kind, WarningKind::FormatIssue);
        assert!(warning.message.contains("12--34"));
    }

    #[test]
    fn test_double_hyphen_pages_pass() {
        let record = record(
            "misc",
            &[
                ("author", "Smith, J."),
                ("title", "T"),
                ("year", "2024"),
                ("pages", "12--34"),
            ],
        );
        assert!(check_record(&record).is_empty());
    }

    #[test]
    fn test_odd_year_and_doi_are_flagged() {
        let record = record(
            "misc",
            &[
                ("author", "Smith, J."),
                ("title", "T"),
                ("year", "202X"),
                ("doi", "doi:10.1000/xyz"),
            ],
        );
        let warnings = check_record(&record);
        assert!(warnings.iter().any(|w| w.field == "year"));
        assert!(warnings.iter().any(|w| w.field == "doi"));
    }

    #[test]
    fn test_venue_warning_messages_are_distinguishable() {
        let unknown = Warning::venue_unknown("Unknown Workshop XYZ");
        let hinted = Warning::venue_from_hint("CoRL");
        let mismatch = Warning::venue_mismatch("CVPR", "ICCV");

        assert_eq!(
            unknown.message,
            "\"Unknown Workshop XYZ...\" (Not in Library, keeping original)"
        );
        assert_eq!(hinted.message, "\"CoRL\" (From DBLP, not in Library)");
        assert_eq!(mismatch.message, "Mismatch: Output \"CVPR\" vs DBLP \"ICCV\"");

        assert_ne!(unknown.kind, hinted.kind);
        assert_ne!(hinted.kind, mismatch.kind);
    }

    #[test]
    fn test_warning_serializes_to_json() {
        let warning = Warning::venue_from_hint("CoRL");
        let json = serde_json::to_string(&warning).unwrap();
        let back: Warning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, warning);
    }
}
