//! JSON Schema generation for the expected response object.
//!
//! The schema covers currently-visible questions only, so tooling that
//! validates a response payload sees the same questionnaire the user does.

use serde_json::{Map, Value, json};

use crate::answers::ResponseMap;
use crate::schema::question::{QuestionSpec, QuestionType};
use crate::schema::questionnaire::QuestionnaireSpec;
use crate::visibility::{VisibilityMap, effective_required};

/// Build a draft-07 JSON Schema describing the response map.
pub fn generate(
    spec: &QuestionnaireSpec,
    visibility: &VisibilityMap,
    responses: &ResponseMap,
) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in spec.iter_questions() {
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        properties.insert(question.id.clone(), question_schema(question));
        if effective_required(question, responses) {
            required.push(Value::String(question.id.clone()));
        }
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": spec.name,
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
        "additionalProperties": false,
    })
}

fn question_schema(question: &QuestionSpec) -> Value {
    let mut schema = match question.kind {
        QuestionType::ShortText | QuestionType::LongText | QuestionType::AddressBlock => {
            json!({ "type": "string" })
        }
        QuestionType::Number => json!({ "type": "number" }),
        QuestionType::Date => json!({ "type": "string", "format": "date" }),
        QuestionType::YesNo => json!({ "type": "boolean" }),
        QuestionType::SingleChoice => json!({
            "type": "string",
            "enum": question.option_values(),
        }),
        QuestionType::MultiChoice => json!({
            "type": "array",
            "items": { "type": "string", "enum": question.option_values() },
        }),
    };

    if let Value::Object(object) = &mut schema {
        object.insert("title".into(), Value::String(question.label.clone()));
        if let Some(help) = &question.help_text {
            object.insert("description".into(), Value::String(help.clone()));
        }
    }
    schema
}
