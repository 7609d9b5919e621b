//! Mapping tables: which answer lands in which template field, and how.
//!
//! Answers arrive as a flat bag of opaque string keys. Nothing here knows or
//! cares which questionnaire produced them; the table is the only bridge
//! between a response key and a field name printed on an official form.

use decree_spec::ResponseMap;
use serde::{Deserialize, Serialize};

use crate::doctype::DocumentType;
use crate::error::ConfigError;
use crate::transform::Transform;

/// How the filling routine writes the destination field. Declared up front,
/// never probed at fill time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Checkbox,
    Date,
    Number,
}

/// One answer-to-field wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Response key to read.
    pub source: String,
    /// Template field name to write.
    pub dest: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    /// Grouping tag for tooling that reports coverage by form section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_tag: Option<String>,
}

impl FieldMapping {
    pub fn text(source: &str, dest: &str) -> Self {
        Self::new(source, dest, FieldKind::Text, None)
    }

    pub fn checkbox(source: &str, dest: &str) -> Self {
        Self::new(source, dest, FieldKind::Checkbox, None)
    }

    pub fn date(source: &str, dest: &str) -> Self {
        Self::new(source, dest, FieldKind::Date, Some(Transform::LongDate))
    }

    pub fn currency(source: &str, dest: &str) -> Self {
        Self::new(source, dest, FieldKind::Number, Some(Transform::Currency))
    }

    pub fn new(source: &str, dest: &str, kind: FieldKind, transform: Option<Transform>) -> Self {
        Self {
            source: source.to_string(),
            dest: dest.to_string(),
            kind,
            transform,
            section_tag: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_section_tag(mut self, tag: &str) -> Self {
        self.section_tag = Some(tag.to_string());
        self
    }
}

/// The full wiring for one document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingTable {
    pub document_type: DocumentType,
    pub entries: Vec<FieldMapping>,
}

impl MappingTable {
    pub fn new(document_type: DocumentType, entries: Vec<FieldMapping>) -> Self {
        Self {
            document_type,
            entries,
        }
    }

    /// Extend a base table with additional entries, append-only: base entries
    /// keep their order and come first, so a composed form fills exactly like
    /// its base plus the extension.
    pub fn compose(base: &MappingTable, document_type: DocumentType, extra: Vec<FieldMapping>) -> Self {
        let mut entries = base.entries.clone();
        entries.extend(extra);
        Self {
            document_type,
            entries,
        }
    }

    /// Reject tables that write the same destination field twice. Later
    /// writes would silently win at fill time, which is exactly the kind of
    /// shadowing a composed table must not hide.
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if seen.contains(&entry.dest.as_str()) {
                return Err(ConfigError::DuplicateDestination {
                    document: self.document_type,
                    dest: entry.dest.clone(),
                });
            }
            seen.push(&entry.dest);
        }
        Ok(())
    }

    /// Resolve the table against a response bag into ordered
    /// `(dest, value)` pairs, ready for the filling pass.
    ///
    /// An absent source key drops the entry unless its transform declares a
    /// default. Same table + same responses always yields the same output.
    pub fn apply(&self, responses: &ResponseMap) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let stored = responses.get(&entry.source).filter(|value| value.answered());
            let rendered = match (stored, &entry.transform) {
                (Some(value), Some(transform)) => transform.apply(value),
                (Some(value), None) => value.display_string(),
                (None, Some(transform)) => match transform.default_value() {
                    Some(default) => default.to_string(),
                    None => continue,
                },
                (None, None) => continue,
            };
            out.push((entry.dest.clone(), rendered));
        }
        out
    }
}
