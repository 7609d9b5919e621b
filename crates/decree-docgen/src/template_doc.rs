//! Typed model of an externally-authored fillable form template.
//!
//! Templates cross the boundary as JSON bytes; this side parses them into a
//! closed structure and writes them back deterministically. Pages, text
//! runs, and fields are all ordered vectors, so serializing the same
//! template twice yields the same bytes.

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// A fillable document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub document_type: String,
    pub title: String,
    pub pages: Vec<TemplatePage>,
}

/// One page: fixed prose plus named fields, both positioned in points from
/// the page's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePage {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub texts: Vec<TextRun>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// A run of fixed text on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// What kind of control a template field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldControl {
    Text,
    Checkbox,
}

/// A named fillable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub kind: FieldControl,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

impl FormTemplate {
    /// Parse template bytes, rejecting templates with nothing to fill.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TemplateError> {
        let template: FormTemplate = serde_json::from_slice(bytes)?;
        if template.pages.is_empty() {
            return Err(TemplateError::Empty {
                title: template.title,
            });
        }
        Ok(template)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TemplateError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Find a field by name across pages. Field names are unique per
    /// template by authoring convention; the first match wins regardless.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.pages
            .iter_mut()
            .flat_map(|page| page.fields.iter_mut())
            .find(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.pages
            .iter()
            .flat_map(|page| page.fields.iter())
            .find(|field| field.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.fields.iter())
            .map(|field| field.name.as_str())
            .collect()
    }
}

impl FormField {
    /// Write a text value, honoring the template's declared length cap.
    pub fn set_text(&mut self, value: &str) {
        let capped = match self.max_len {
            Some(max) => value.chars().take(max as usize).collect(),
            None => value.to_string(),
        };
        self.value = Some(capped);
    }
}
