//! rebib-core: rule-based normalization for bibliographic records
//!
//! This library turns loosely structured BibTeX-like text into standardized
//! citation entries with deterministic identifiers:
//! - Venue mapping rules compiled from a line-oriented mini-DSL
//! - Venue resolution with strict precedence (learned rules, rule library,
//!   external hint, raw fallback) and conflict detection
//! - Template-driven citation key generation
//! - A structured warning taxonomy instead of silent guesses
//!
//! The pipeline is synchronous, pure, and re-entrant: no I/O, no global
//! state, no network. External lookups (e.g. DBLP) live outside the core and
//! hand their results in as an already-resolved hint string.

pub mod citekey;
pub mod config;
pub mod pipeline;
pub mod rules;
pub mod text;
pub mod venue;
pub mod warnings;

pub use pipeline::{run, PipelineConfig, PipelineOutput};
pub use rules::{compile, MappingRule, RuleError};
pub use venue::{MatchedVia, VenueMode, VenueResolution, UNKNOWN_VENUE_TOKEN};
pub use warnings::{Severity, Warning, WarningKind};

// Re-export the record model for convenience
pub use rebib_bibtex::{
    format_entries, format_entry, parse, EntryKind, ProcessedEntry, RawRecord, RecordField,
};
