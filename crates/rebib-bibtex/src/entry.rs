//! BibTeX record data structures

use serde::{Deserialize, Serialize};

/// BibTeX entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Article,
    Book,
    InBook,
    InCollection,
    InProceedings,
    MastersThesis,
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
    Unknown,
}

impl EntryKind {
    /// Parse an entry kind from a type string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "inbook" => Self::InBook,
            "incollection" => Self::InCollection,
            "inproceedings" | "conference" => Self::InProceedings,
            "mastersthesis" => Self::MastersThesis,
            "misc" => Self::Misc,
            "phdthesis" => Self::PhdThesis,
            "proceedings" => Self::Proceedings,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            _ => Self::Unknown,
        }
    }

    /// Convert the entry kind to its canonical type string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::InBook => "inbook",
            Self::InCollection => "incollection",
            Self::InProceedings => "inproceedings",
            Self::MastersThesis => "mastersthesis",
            Self::Misc => "misc",
            Self::PhdThesis => "phdthesis",
            Self::Proceedings => "proceedings",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
            Self::Unknown => "misc",
        }
    }
}

/// A single field (key-value pair) of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub key: String,
    pub value: String,
}

/// A record extracted from raw BibTeX-like text.
///
/// Field keys are lowercased and unique; a duplicate key in the source
/// overwrites the earlier value while keeping its original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Entry type, lowercased (e.g. "article")
    pub entry_type: String,
    /// Entry type as written in the source
    pub raw_type: String,
    /// Citation key from the source; may be empty
    pub citation_key: String,
    pub fields: Vec<RecordField>,
}

impl RawRecord {
    pub fn new(raw_type: impl Into<String>, citation_key: impl Into<String>) -> Self {
        let raw_type = raw_type.into();
        Self {
            entry_type: raw_type.to_lowercase(),
            raw_type,
            citation_key: citation_key.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field value, overwriting an existing entry for the same key.
    ///
    /// The key is lowercased. Overwriting keeps the position of the first
    /// occurrence so field iteration order stays reproducible.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_lowercase();
        let value = value.into();
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.value = value;
        } else {
            self.fields.push(RecordField { key, value });
        }
    }

    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// True when the field exists with a non-blank value
    pub fn has_field(&self, key: &str) -> bool {
        self.get_field(key).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::from_str(&self.entry_type)
    }

    pub fn author(&self) -> Option<&str> {
        self.get_field("author")
    }

    pub fn title(&self) -> Option<&str> {
        self.get_field("title")
    }

    pub fn year(&self) -> Option<&str> {
        self.get_field("year")
    }

    /// The raw venue string: `booktitle` when present, else `journal`.
    ///
    /// Blank values count as absent.
    pub fn venue(&self) -> Option<&str> {
        for key in ["booktitle", "journal"] {
            if let Some(value) = self.get_field(key) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            }
        }
        None
    }
}

/// A fully processed record, ready for serialization.
///
/// `keep_fields` lists the field keys the caller wants serialized, in caller
/// order; it only ever contains keys actually present in `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedEntry {
    /// Entry type as written in the source
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Generated (or kept) citation key
    pub id: String,
    pub fields: Vec<RecordField>,
    pub keep_fields: Vec<String>,
}

impl ProcessedEntry {
    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }
}
