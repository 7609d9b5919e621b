use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::ConditionalRule;

/// Input widget kinds a question can render as.
///
/// The enum is closed so a new kind cannot ship without every consumer
/// (validation, schema generation, prompting, mapping transforms) taking a
/// position on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    ShortText,
    LongText,
    Number,
    Date,
    SingleChoice,
    MultiChoice,
    YesNo,
    AddressBlock,
}

impl QuestionType {
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultiChoice)
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::ShortText => "short-text",
            QuestionType::LongText => "long-text",
            QuestionType::Number => "number",
            QuestionType::Date => "date",
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultiChoice => "multi-choice",
            QuestionType::YesNo => "yes-no",
            QuestionType::AddressBlock => "address-block",
        }
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// A per-question validation rule.
///
/// Rules are checked in declared order; the first failure of each kind wins,
/// and kinds accumulate, so a single question can report one message per
/// failing kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValidationRule {
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Min {
        threshold: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Max {
        threshold: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    pub fn kind_label(&self) -> &'static str {
        match self {
            ValidationRule::Required { .. } => "required",
            ValidationRule::Min { .. } => "min",
            ValidationRule::Max { .. } => "max",
            ValidationRule::Pattern { .. } => "pattern",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationRule::Required { message }
            | ValidationRule::Min { message, .. }
            | ValidationRule::Max { message, .. }
            | ValidationRule::Pattern { message, .. } => message.as_deref(),
        }
    }
}

/// A single question within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionalRule>,
}

impl QuestionSpec {
    /// Base requiredness before conditional require/relax rules apply:
    /// the flag, or a declared `required` rule.
    pub fn required_by_default(&self) -> bool {
        self.required
            || self
                .rules
                .iter()
                .any(|rule| matches!(rule, ValidationRule::Required { .. }))
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|option| option.value.as_str())
            .collect()
    }
}
