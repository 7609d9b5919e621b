use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::ConditionalRule;
use crate::schema::question::QuestionSpec;

/// An ordered group of questions presented together.
///
/// A section is visible when its explicit `visible_when` condition fires.
/// With no condition declared, it is visible when any of its questions is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<ConditionalRule>,
    pub questions: Vec<QuestionSpec>,
}

impl SectionSpec {
    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }
}
