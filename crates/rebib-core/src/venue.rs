//! Venue name resolution
//!
//! Decides the canonical venue label for a record and the short token used
//! in key generation. Sources are consulted in strict precedence order,
//! never blended: learned rules, then the compiled rule library, then an
//! external lookup hint (single-record runs only), then the raw string
//! itself. Anything short of a confirmed match is surfaced as a warning.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use rebib_bibtex::RawRecord;

use crate::rules::MappingRule;
use crate::warnings::Warning;

/// Placeholder key token for records without any venue field
pub const UNKNOWN_VENUE_TOKEN: &str = "CONF";

/// Which venue form is written into the output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueMode {
    /// Short form (e.g. "CVPR")
    Abbrev,
    /// Full form (e.g. "IEEE/CVF Computer Vision and Pattern Recognition Conference")
    Full,
}

/// Which precedence tier produced the resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchedVia {
    LearnedRule,
    RuleLibrary,
    ExternalHint,
    RawFallback,
}

/// Result of resolving one record's venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueResolution {
    /// What gets written into the output venue field
    pub display_name: String,
    /// What goes into the generated citation key; never empty
    pub key_token: String,
    pub matched_via: MatchedVia,
    pub warning: Option<Warning>,
}

/// Resolve a record's venue.
///
/// `learned` is the caller-owned map of full venue strings to short tokens
/// captured from previously confirmed imports; it always wins over the rule
/// library. `hint` is the short form suggested by an external lookup; it is
/// only trusted when the current run processes exactly one record, since a
/// single hint cannot safely apply to a heterogeneous batch.
pub fn resolve(
    record: &RawRecord,
    rules: &[MappingRule],
    mode: VenueMode,
    learned: &HashMap<String, String>,
    hint: Option<&str>,
    single_record_run: bool,
) -> VenueResolution {
    let Some(raw) = record.venue() else {
        // Missing venue is a field-completeness concern, not a resolution
        // failure; no warning here.
        return VenueResolution {
            display_name: String::new(),
            key_token: UNKNOWN_VENUE_TOKEN.to_string(),
            matched_via: MatchedVia::RawFallback,
            warning: None,
        };
    };

    let hint = hint.map(str::trim).filter(|h| !h.is_empty());
    let usable_hint = if single_record_run { hint } else { None };

    if let Some(abbr) = learned.get(raw) {
        return VenueResolution {
            display_name: display_for(mode, raw, abbr),
            key_token: abbr.clone(),
            matched_via: MatchedVia::LearnedRule,
            warning: None,
        };
    }

    if let Some(rule) = rules.iter().find(|r| r.pattern.is_match(raw)) {
        let display_name = match mode {
            VenueMode::Full => rule.full_name.clone(),
            VenueMode::Abbrev => rule.abbreviation.clone(),
        };
        // A hint that disagrees with both outputs may mean the rule library
        // is stale; surface it without changing the resolution.
        let warning = usable_hint
            .filter(|h| *h != display_name && *h != rule.abbreviation)
            .map(|h| Warning::venue_mismatch(&display_name, h));
        return VenueResolution {
            display_name,
            key_token: rule.abbreviation.clone(),
            matched_via: MatchedVia::RuleLibrary,
            warning,
        };
    }

    if let Some(hint) = usable_hint {
        return VenueResolution {
            display_name: display_for(mode, raw, hint),
            key_token: hint.to_string(),
            matched_via: MatchedVia::ExternalHint,
            warning: Some(Warning::venue_from_hint(hint)),
        };
    }

    VenueResolution {
        display_name: raw.to_string(),
        key_token: raw.to_string(),
        matched_via: MatchedVia::RawFallback,
        warning: Some(Warning::venue_unknown(raw)),
    }
}

/// Display form for resolutions whose short token did not come from the rule
/// library: full mode keeps the raw string, abbreviated mode uses the token.
fn display_for(mode: VenueMode, raw: &str, token: &str) -> String {
    match mode {
        VenueMode::Full => raw.to_string(),
        VenueMode::Abbrev => token.to_string(),
    }
}
