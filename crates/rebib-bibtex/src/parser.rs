//! Tolerant BibTeX record scanner
//!
//! Extracts records of the common `@type{key, field = value, ...}` shape from
//! loosely structured text. The scanner is best-effort by design: spans that
//! do not look like an entry, and fields with unsupported value syntax, are
//! skipped silently. It never fails on malformed input.
//!
//! Boundary rule: a record's body runs from the comma after its citation key
//! up to the next `@identifier{` marker (or end of input). The text after the
//! body's last closing brace is discarded, which strips the record's own
//! terminator along with any trailing garbage.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    IResult,
};

use super::entry::RawRecord;

/// Parse raw text into a sequence of records.
///
/// Never fails; unparsable spans yield no record and unsupported fields are
/// dropped. A record with zero parseable fields is still returned.
pub fn parse(input: &str) -> Vec<RawRecord> {
    let markers = find_markers(input);
    let mut records = Vec::new();

    for (i, marker) in markers.iter().enumerate() {
        let span_end = markers
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(input.len());
        let span = &input[marker.body_start..span_end];

        // Citation key extraction requires a comma after the opening brace;
        // a marker without one is not an entry.
        let Some(comma) = span.find(',') else {
            continue;
        };
        let key = span[..comma].trim();

        let mut body = &span[comma + 1..];
        if let Some(last_brace) = body.rfind('}') {
            body = &body[..last_brace];
        }

        let mut record = RawRecord::new(marker.raw_type, key);
        for (field_key, field_value) in parse_fields(body) {
            record.set_field(field_key, field_value);
        }
        records.push(record);
    }

    records
}

/// An `@identifier{` occurrence
struct Marker<'a> {
    /// Byte offset of the `@`
    start: usize,
    /// The identifier as written in the source
    raw_type: &'a str,
    /// Byte offset just past the opening brace
    body_start: usize,
}

/// Locate every `@identifier{` marker in the input
fn find_markers(input: &str) -> Vec<Marker<'_>> {
    let bytes = input.as_bytes();
    let mut markers = Vec::new();

    for (at, _) in input.match_indices('@') {
        let mut pos = at + 1;
        let ident_start = pos;
        while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
            pos += 1;
        }
        if pos == ident_start {
            continue;
        }
        let ident_end = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] == b'{' {
            markers.push(Marker {
                start: at,
                raw_type: &input[ident_start..ident_end],
                body_start: pos + 1,
            });
        }
    }

    markers
}

/// Extract `key = value` fields from a record body.
///
/// Fields the grammar does not cover are skipped up to the next separator.
fn parse_fields(body: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut remaining = body;

    loop {
        remaining = remaining.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if remaining.is_empty() {
            break;
        }

        match parse_single_field(remaining) {
            Ok((rest, field)) => {
                fields.push(field);
                remaining = rest;
            }
            Err(_) => {
                // Unsupported value syntax: skip ahead to the next separator
                match remaining.find(',') {
                    Some(pos) => remaining = &remaining[pos + 1..],
                    None => break,
                }
            }
        }
    }

    fields
}

/// Parse a single `key = value` field
fn parse_single_field(input: &str) -> IResult<&str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = parse_field_value(rest)?;

    Ok((
        rest,
        (key.to_lowercase(), collapse_whitespace(value.trim())),
    ))
}

/// Parse a field value: braced, quoted, or a bare integer
fn parse_field_value(input: &str) -> IResult<&str, String> {
    alt((
        parse_braced_value,
        parse_quoted_value,
        map(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
            s.to_string()
        }),
    ))(input)
}

/// Parse a braced value `{content}`, returning the content without the
/// outer braces. Inner brace groups are kept verbatim.
fn parse_braced_value(input: &str) -> IResult<&str, String> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], input[1..pos].to_string()));
                }
            }
            b'\\' => {
                // Skip escaped character
                pos += 1;
            }
            _ => {}
        }
        pos += 1;
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Parse a quoted value `"content"`. Quotes inside brace groups do not
/// terminate the value.
fn parse_quoted_value(input: &str) -> IResult<&str, String> {
    if !input.starts_with('"') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let mut result = String::new();
    let mut chars = input.char_indices().skip(1).peekable();
    let mut brace_depth = 0usize;

    while let Some((pos, c)) = chars.next() {
        match c {
            '"' if brace_depth == 0 => {
                return Ok((&input[pos + 1..], result));
            }
            '{' => {
                brace_depth += 1;
                result.push('{');
            }
            '}' => {
                brace_depth = brace_depth.saturating_sub(1);
                result.push('}');
            }
            '\\' => {
                result.push('\\');
                if let Some((_, escaped)) = chars.next() {
                    result.push(escaped);
                }
            }
            other => result.push(other),
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Collapse whitespace runs into a single space
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_entry() {
        let input = r#"
@article{Smith2024,
    author = {John Smith},
    title = {A Great Paper},
    year = {2024},
    journal = {Nature},
}
"#;
        let records = parse(input);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.citation_key, "Smith2024");
        assert_eq!(record.entry_type, "article");
        assert_eq!(record.author(), Some("John Smith"));
        assert_eq!(record.title(), Some("A Great Paper"));
        assert_eq!(record.year(), Some("2024"));
    }

    #[test]
    fn test_parse_quoted_and_numeric_values() {
        let input = r#"
@article{Test2024,
    author = "Jane Doe",
    year = 2024,
}
"#;
        let records = parse(input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author(), Some("Jane Doe"));
        assert_eq!(records[0].year(), Some("2024"));
    }

    #[test]
    fn test_parse_multiple_entries() {
        let input = r#"
@article{First2024,
    title = {First Paper},
}

@book{Second2024,
    title = {Second Book},
}
"#;
        let records = parse(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].citation_key, "First2024");
        assert_eq!(records[0].title(), Some("First Paper"));
        assert_eq!(records[1].citation_key, "Second2024");
        assert_eq!(records[1].title(), Some("Second Book"));
    }

    #[test]
    fn test_trailing_garbage_after_record_is_discarded() {
        let input = "@article{a,\n title = {A},\n}\nstray text\n@book{b,\n title = {B},\n}";
        let records = parse(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields.len(), 1);
        assert_eq!(records[1].title(), Some("B"));
    }

    #[test]
    fn test_marker_without_comma_is_not_an_entry() {
        let records = parse("@misc{nokey}");
        assert!(records.is_empty());
    }

    #[test]
    fn test_entry_with_no_parseable_fields_still_yields_record() {
        let records = parse("@misc{only_key,\n}");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].citation_key, "only_key");
        assert!(records[0].fields.is_empty());
    }

    #[test]
    fn test_duplicate_field_overwrites() {
        let input = "@article{x,\n title = {First},\n title = {Second},\n}";
        let records = parse(input);
        assert_eq!(records[0].title(), Some("Second"));
        assert_eq!(records[0].fields.len(), 1);
    }

    #[test]
    fn test_value_whitespace_is_collapsed() {
        let input = "@article{x,\n title = {A   Study\n   of Foo},\n}";
        let records = parse(input);
        assert_eq!(records[0].title(), Some("A Study of Foo"));
    }

    #[test]
    fn test_nested_braces_kept_in_value() {
        let input = "@article{x,\n title = {A {B}ook about {LaTeX}},\n}";
        let records = parse(input);
        assert_eq!(records[0].title(), Some("A {B}ook about {LaTeX}"));
    }

    #[test]
    fn test_unsupported_field_syntax_is_skipped() {
        let input = "@article{x,\n journal = nature,\n year = {2024},\n}";
        let records = parse(input);
        assert_eq!(records[0].get_field("journal"), None);
        assert_eq!(records[0].year(), Some("2024"));
    }

    #[test]
    fn test_field_keys_are_lowercased() {
        let input = "@article{x,\n TITLE = {Loud},\n}";
        let records = parse(input);
        assert_eq!(records[0].title(), Some("Loud"));
    }

    #[test]
    fn test_unterminated_final_record() {
        // The last-brace truncation consumes the field's own closer when the
        // record terminator is missing; the record survives with no fields.
        let records = parse("@article{x, title = {T}");
        assert_eq!(records.len(), 1);
        assert!(records[0].fields.is_empty());
    }

    #[test]
    fn test_text_without_markers_yields_nothing() {
        assert!(parse("plain text, no entries here").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_email_address_is_not_a_marker() {
        let records = parse("contact me@example.org\n@article{x, year = {2024},\n}");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].citation_key, "x");
    }
}
