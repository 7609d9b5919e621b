use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::integrity;
use crate::schema::question::QuestionSpec;
use crate::schema::section::SectionSpec;

/// Content-layer metadata describing a questionnaire as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpecMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_supporting_documents: Vec<String>,
}

/// Top-level questionnaire definition.
///
/// Loaded once from the content store and treated as immutable; every engine
/// operation takes it by shared reference together with a response snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionnaireSpec {
    pub id: String,
    pub name: String,
    pub version: String,
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub metadata: SpecMetadata,
}

impl QuestionnaireSpec {
    /// Parse a questionnaire from JSON and run the structural integrity
    /// checks, so defective content fails loudly at load time.
    pub fn load_json(text: &str) -> Result<Self, SpecLoadError> {
        let spec: QuestionnaireSpec = serde_json::from_str(text)?;
        integrity::check(&spec)?;
        Ok(spec)
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.iter_questions().find(|question| question.id == id)
    }

    /// All questions in schema order, across sections.
    pub fn iter_questions(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }

    /// The section containing the given question, if any.
    pub fn section_of(&self, question_id: &str) -> Option<&SectionSpec> {
        self.sections
            .iter()
            .find(|section| section.question(question_id).is_some())
    }
}

/// Failure while loading a questionnaire definition.
#[derive(Debug, thiserror::Error)]
pub enum SpecLoadError {
    #[error("questionnaire JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
