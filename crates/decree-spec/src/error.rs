use thiserror::Error;

/// Defects in authored questionnaire content.
///
/// These are raised when a schema is loaded or checked, never in response to
/// user input. A questionnaire that fails `integrity::check` should be fixed
/// at the content layer, not worked around at runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),

    #[error("duplicate section id '{0}'")]
    DuplicateSectionId(String),

    // `r#source` keeps thiserror from treating the field as an Error::source
    // cause; it names the condition's source question, not an error chain.
    #[error("question '{question}' has a condition referencing unknown question '{source}'")]
    UnknownConditionSource { question: String, r#source: String },

    #[error("section '{section}' has a condition referencing unknown question '{source}'")]
    UnknownSectionSource { section: String, r#source: String },

    #[error("condition cycle through questions: {}", .0.join(" -> "))]
    ConditionCycle(Vec<String>),

    #[error("choice question '{0}' declares no options")]
    MissingOptions(String),

    #[error("question '{0}' declares options but is not a choice type")]
    UnexpectedOptions(String),

    #[error("question '{question}' condition operator '{operator}' requires a comparison value")]
    MissingComparison { question: String, operator: String },

    #[error("question '{question}' has an invalid pattern rule: {pattern}")]
    InvalidPattern { question: String, pattern: String },
}

/// Failures while interpolating answers into question labels or help text.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to encode answers for templating: {0}")]
    Context(#[from] serde_json::Error),
}
