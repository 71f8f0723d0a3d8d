//! Pipeline orchestration
//!
//! Runs the full normalization pass over raw text: parse records, clean
//! author/editor disambiguation suffixes, resolve venues, write the resolved
//! names back, generate citation keys, and aggregate warnings.
//!
//! Every invocation is independent and re-entrant: records are created fresh
//! from the input text, nothing is shared mutably across runs, and the only
//! external resource (the caller-owned learned-rules map) is only read.
//! Output order matches input order; sorting and deduplication are caller
//! concerns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use rebib_bibtex::{parse, ProcessedEntry, RawRecord};

use crate::citekey;
use crate::config::{DEFAULT_KEEP_FIELDS, DEFAULT_KEY_TEMPLATE};
use crate::rules::MappingRule;
use crate::text::strip_disambiguation_suffixes;
use crate::venue::{self, VenueMode};
use crate::warnings::{self, Warning};

/// Caller-provided settings for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Citation key template with `[Auth]`/`[Year]`/`[Title]`/`[Venue]`
    pub key_template: String,
    /// Fields to keep on output, in preferred order
    pub keep_fields: Vec<String>,
    pub venue_mode: VenueMode,
    /// Keep non-empty source citation keys verbatim
    pub keep_original_keys: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            key_template: DEFAULT_KEY_TEMPLATE.to_string(),
            keep_fields: DEFAULT_KEEP_FIELDS.iter().map(|s| s.to_string()).collect(),
            venue_mode: VenueMode::Abbrev,
            keep_original_keys: false,
        }
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PipelineOutput {
    pub entries: Vec<ProcessedEntry>,
    pub warnings: Vec<Warning>,
}

/// Run the full pipeline over raw text.
///
/// `learned` maps full venue strings to short tokens captured from prior
/// confirmed imports; `hint` is the short form supplied by an external
/// lookup, honored only when the input holds exactly one record.
pub fn run(
    text: &str,
    rules: &[MappingRule],
    config: &PipelineConfig,
    learned: &HashMap<String, String>,
    hint: Option<&str>,
) -> PipelineOutput {
    let records = parse(text);
    let single_record_run = records.len() == 1;

    let mut output = PipelineOutput::default();

    for record in records {
        let (entry, entry_warnings) =
            process_record(record, rules, config, learned, hint, single_record_run);
        output.entries.push(entry);
        output.warnings.extend(entry_warnings);
    }

    output
}

fn process_record(
    record: RawRecord,
    rules: &[MappingRule],
    config: &PipelineConfig,
    learned: &HashMap<String, String>,
    hint: Option<&str>,
    single_record_run: bool,
) -> (ProcessedEntry, Vec<Warning>) {
    let mut work = record;
    let mut collected = Vec::new();

    // Upstream sources append numeric suffixes to disambiguate same-named
    // authors; these must not leak into display or key generation.
    for key in ["author", "editor"] {
        if let Some(value) = work.get_field(key) {
            let stripped = strip_disambiguation_suffixes(value);
            work.set_field(key, stripped);
        }
    }

    let resolution = venue::resolve(
        &work,
        rules,
        config.venue_mode,
        learned,
        hint,
        single_record_run,
    );

    if !resolution.display_name.is_empty() {
        for key in ["booktitle", "journal"] {
            if work.has_field(key) {
                work.set_field(key, resolution.display_name.clone());
            }
        }
    }

    let id = citekey::generate(
        &work,
        &resolution,
        &config.key_template,
        config.keep_original_keys,
    );

    if let Some(warning) = resolution.warning {
        collected.push(warning);
    }
    collected.extend(warnings::check_record(&work));

    let keep_fields = config
        .keep_fields
        .iter()
        .filter(|key| work.has_field(key))
        .map(|key| key.to_lowercase())
        .collect();

    let entry = ProcessedEntry {
        entry_type: work.raw_type,
        id,
        fields: work.fields,
        keep_fields,
    };

    (entry, collected)
}
