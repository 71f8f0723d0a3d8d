//! BibTeX serialization
//!
//! Writes processed entries back out as BibTeX blocks. Only the fields listed
//! in an entry's `keep_fields` are emitted, in that order.

use super::entry::ProcessedEntry;

/// Serialize a single entry to a BibTeX block
pub fn format_entry(entry: &ProcessedEntry) -> String {
    let mut result = String::new();

    result.push('@');
    result.push_str(&entry.entry_type);
    result.push('{');
    result.push_str(&entry.id);
    result.push(',');
    result.push('\n');

    for key in &entry.keep_fields {
        let Some(value) = entry.get_field(key) else {
            continue;
        };
        result.push_str("  ");
        result.push_str(key);
        result.push_str(" = ");
        result.push_str(&format_field_value(value));
        result.push(',');
        result.push('\n');
    }

    // Drop the trailing comma on the last field
    if result.ends_with(",\n") {
        result.truncate(result.len() - 2);
        result.push('\n');
    }

    result.push('}');
    result
}

/// Serialize multiple entries, separated by blank lines
pub fn format_entries(entries: &[ProcessedEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a field value, choosing appropriate delimiters
fn format_field_value(value: &str) -> String {
    // Purely numeric values go unbraced
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }

    let mut result = String::with_capacity(value.len() + 2);
    result.push('{');
    result.push_str(value);
    result.push('}');
    result
}
