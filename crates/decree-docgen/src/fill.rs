//! The filling pass: ordered `(field, value)` pairs into a parsed template.
//!
//! Official templates drift between revisions; a mapping that names a field
//! the current template lacks is logged and skipped, never fatal. The
//! report tells tooling exactly what landed and what did not.

use tracing::warn;

use crate::error::TemplateError;
use crate::mapping::{FieldKind, FieldMapping};
use crate::template_doc::{FieldControl, FormTemplate, TextRun};

/// Spellings that tick a checkbox. Everything else clears it.
const CHECKBOX_TRUTHY: [&str; 7] = ["true", "yes", "y", "on", "x", "1", "checked"];

/// Outcome of one filling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub written: usize,
    /// Destination names the template did not have, in write order.
    pub skipped: Vec<String>,
}

impl FillReport {
    pub fn merge(&mut self, other: FillReport) {
        self.written += other.written;
        self.skipped.extend(other.skipped);
    }
}

/// Write each `(dest, value)` pair into the template.
///
/// The declared `FieldKind` from the mapping drives exactly one typed write;
/// pairs with no mapping entry (computed aggregates, generation stamps) are
/// written as text. Later pairs overwrite earlier ones, which is what lets
/// the aggregate pass refresh anything the mapping pass touched.
pub fn fill(
    template: &mut FormTemplate,
    values: &[(String, String)],
    mappings: &[FieldMapping],
) -> FillReport {
    let mut report = FillReport::default();
    for (dest, value) in values {
        let Some(field) = template.field_mut(dest) else {
            warn!(field = %dest, "template has no such field; skipping");
            report.skipped.push(dest.clone());
            continue;
        };

        let declared = mappings
            .iter()
            .find(|mapping| &mapping.dest == dest)
            .map(|mapping| mapping.kind)
            .unwrap_or(FieldKind::Text);

        match (declared, field.kind) {
            (FieldKind::Checkbox, _) | (_, FieldControl::Checkbox) => {
                field.checked = is_truthy(value);
            }
            _ => field.set_text(value),
        }
        report.written += 1;
    }
    report
}

/// Fix the filled content and serialize.
///
/// Flattening burns every field into its page as plain text (`X` for a
/// ticked checkbox) and drops the fields, so the output can no longer be
/// edited as a form. Without flattening the filled template serializes
/// as-is, fields intact.
pub fn finalize(mut template: FormTemplate, flatten: bool) -> Result<Vec<u8>, TemplateError> {
    if flatten {
        for page in &mut template.pages {
            for field in page.fields.drain(..) {
                let text = match field.kind {
                    FieldControl::Checkbox => {
                        if field.checked {
                            "X".to_string()
                        } else {
                            continue;
                        }
                    }
                    FieldControl::Text => match field.value {
                        Some(value) if !value.is_empty() => value,
                        _ => continue,
                    },
                };
                page.texts.push(TextRun {
                    x: field.x,
                    y: field.y,
                    text,
                });
            }
        }
    }
    template.to_bytes()
}

pub fn is_truthy(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    CHECKBOX_TRUTHY.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_set_is_case_insensitive() {
        for spelling in ["true", "Yes", "Y", "ON", "x", "1", "Checked"] {
            assert!(is_truthy(spelling), "{spelling} should tick a checkbox");
        }
        for spelling in ["no", "false", "", "0", "unchecked"] {
            assert!(!is_truthy(spelling), "{spelling} should clear a checkbox");
        }
    }
}
