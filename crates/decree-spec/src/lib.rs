#![allow(missing_docs)]

pub mod answers;
pub mod condition;
pub mod error;
pub mod format;
pub mod integrity;
pub mod progress;
pub mod response_schema;
pub mod samples;
pub mod schema;
pub mod template;
pub mod validate;
pub mod visibility;

pub use answers::{
    AnswerValue, Meta, ResponseMap, ResponseSet, ValidationIssue, ValidationResult,
};
pub use condition::{ConditionOperator, ConditionalRule, RuleEffect, evaluate};
pub use error::{ConfigError, TemplateError};
pub use integrity::check;
pub use progress::{Progress, SectionProgress, next_question, progress};
pub use response_schema::generate as response_schema;
pub use samples::generate as sample_responses;
pub use schema::{
    ChoiceOption, QuestionSpec, QuestionType, QuestionnaireSpec, SectionSpec, SpecMetadata,
    ValidationRule,
};
pub use schema::questionnaire::SpecLoadError;
pub use template::{ResolutionMode, TemplateEngine, register_default_helpers};
pub use validate::{validate_all, validate_question};
pub use visibility::{
    VisibilityMap, effective_required, question_visible, resolve_visibility, visible_questions,
    visible_sections,
};
