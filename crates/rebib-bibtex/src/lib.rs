//! Tolerant BibTeX record parsing and serialization
//!
//! This crate provides the record model shared by the rebib pipeline:
//! - A best-effort parser for the common `@type{key, field = value, ...}`
//!   subset produced by bibliography databases and manual entry
//! - Record data structures with normalized (lowercased, deduplicated)
//!   field maps
//! - A serializer that emits only caller-selected fields
//!
//! The parser never fails: unparsable spans and unsupported field syntax are
//! skipped, not reported as errors. Full BibTeX grammar coverage
//! (@string/@preamble/@comment, cross-references, concatenation) is a
//! non-goal.

mod entry;
mod formatter;
mod parser;

pub use entry::{EntryKind, ProcessedEntry, RawRecord, RecordField};
pub use formatter::{format_entries, format_entry};
pub use parser::parse;
