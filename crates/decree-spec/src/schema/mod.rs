pub mod question;
pub mod questionnaire;
pub mod section;

pub use question::{ChoiceOption, QuestionSpec, QuestionType, ValidationRule};
pub use questionnaire::{QuestionnaireSpec, SpecMetadata};
pub use section::SectionSpec;
