//! Venue mapping rule compiler
//!
//! Rules are authored as a line-oriented mini-DSL:
//!
//! ```text
//! # comment
//! PATTERN => ABBR
//! PATTERN => ABBR || FULL NAME
//! ```
//!
//! `PATTERN` is a case-insensitive regular expression matched against raw
//! venue strings. Unless a pattern anchors itself (leading `^` or an explicit
//! `\b`), it is wrapped in word-boundary assertions so short abbreviations
//! cannot match as substrings of unrelated words. A line that fails to
//! compile is dropped with a diagnostic; the rest of the batch is unaffected.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// A compiled venue mapping rule
#[derive(Debug, Clone)]
pub struct MappingRule {
    /// Case-insensitive, word-boundary-hardened matcher
    pub pattern: Regex,
    /// Short token used in citation keys
    pub abbreviation: String,
    /// Display form; defaults to the abbreviation
    pub full_name: String,
}

// `Regex` does not implement `PartialEq`, so it cannot be derived; compare the
// compiled pattern by its source string together with the remaining fields.
impl PartialEq for MappingRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
            && self.abbreviation == other.abbreviation
            && self.full_name == other.full_name
    }
}

/// Why a single rule line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("missing \"=>\" separator")]
    MissingSeparator,
    #[error("empty pattern")]
    EmptyPattern,
    #[error("empty abbreviation")]
    EmptyAbbreviation,
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Compile rule text into the rules that parsed cleanly.
///
/// Source order is preserved (resolution is first-match-wins). Malformed
/// lines yield no rule and are logged, never fatal to the batch.
pub fn compile(rule_text: &str) -> Vec<MappingRule> {
    let mut rules = Vec::new();

    for (number, line) in rule_text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match compile_line(line) {
            Ok(rule) => rules.push(rule),
            Err(error) => {
                tracing::warn!(line = number + 1, %error, "dropping venue mapping rule");
            }
        }
    }

    rules
}

/// Compile one `PATTERN => ABBR [|| FULL]` line
pub fn compile_line(line: &str) -> Result<MappingRule, RuleError> {
    let (raw_pattern, target) = line.split_once("=>").ok_or(RuleError::MissingSeparator)?;

    let raw_pattern = raw_pattern.trim();
    if raw_pattern.is_empty() {
        return Err(RuleError::EmptyPattern);
    }

    let (abbreviation, full_name) = match target.split_once("||") {
        Some((abbr, full)) => (abbr.trim(), full.trim()),
        None => (target.trim(), ""),
    };
    if abbreviation.is_empty() {
        return Err(RuleError::EmptyAbbreviation);
    }
    let full_name = if full_name.is_empty() {
        abbreviation
    } else {
        full_name
    };

    let pattern = RegexBuilder::new(&harden_pattern(raw_pattern))
        .case_insensitive(true)
        .build()
        .map_err(|e| RuleError::InvalidPattern(e.to_string()))?;

    Ok(MappingRule {
        pattern,
        abbreviation: abbreviation.to_string(),
        full_name: full_name.to_string(),
    })
}

/// Wrap a pattern in word-boundary assertions unless it anchors itself.
///
/// Venue strings come from arbitrary sources; without this, a 3-letter
/// abbreviation like `RAL` would match inside "Neural".
fn harden_pattern(pattern: &str) -> String {
    if pattern.starts_with('^') || pattern.contains("\\b") {
        pattern.to_string()
    } else {
        format!(r"\b(?:{})\b", pattern)
    }
}
