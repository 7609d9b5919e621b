//! Example response generation, used by docs, tooling, and tests.

use serde_json::{Map, Value, json};

use crate::schema::question::{QuestionSpec, QuestionType};
use crate::schema::questionnaire::QuestionnaireSpec;
use crate::visibility::VisibilityMap;

/// Produce an example response object covering every visible question.
pub fn generate(spec: &QuestionnaireSpec, visibility: &VisibilityMap) -> Value {
    let mut map = Map::new();
    for question in spec.iter_questions() {
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        map.insert(question.id.clone(), sample_value(question));
    }
    Value::Object(map)
}

fn sample_value(question: &QuestionSpec) -> Value {
    match question.kind {
        QuestionType::ShortText | QuestionType::LongText => match &question.placeholder {
            Some(placeholder) => Value::String(placeholder.clone()),
            None => Value::String(format!("example-{}", question.id)),
        },
        QuestionType::Number => json!(0),
        QuestionType::Date => Value::String("2020-01-01".to_string()),
        QuestionType::YesNo => Value::Bool(false),
        QuestionType::SingleChoice => question
            .options
            .first()
            .map(|option| Value::String(option.value.clone()))
            .unwrap_or(Value::Null),
        QuestionType::MultiChoice => {
            let first = question
                .options
                .first()
                .map(|option| Value::String(option.value.clone()));
            Value::Array(first.into_iter().collect())
        }
        QuestionType::AddressBlock => Value::String("123 Main Street\nSpringfield".to_string()),
    }
}
