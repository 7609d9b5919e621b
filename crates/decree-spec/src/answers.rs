use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single stored answer.
///
/// The union is closed on purpose: every consumer pattern-matches these five
/// shapes exhaustively instead of probing an arbitrary JSON value. `Empty`
/// round-trips as JSON `null` so that persisted drafts which explicitly
/// cleared an answer stay distinguishable from drafts that never stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Many(Vec<String>),
    Empty,
}

impl AnswerValue {
    /// Whether this value counts as an answer.
    ///
    /// `Number(0.0)` is answered (zero is data); an empty or whitespace-only
    /// string, an empty selection list, and `Empty` are not.
    pub fn answered(&self) -> bool {
        match self {
            AnswerValue::Bool(_) | AnswerValue::Number(_) => true,
            AnswerValue::Text(text) => !text.trim().is_empty(),
            AnswerValue::Many(values) => !values.is_empty(),
            AnswerValue::Empty => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Many(values) => Some(values),
            _ => None,
        }
    }

    /// Numeric reading of the value, lenient about how people type money:
    /// `$` prefixes and thousands separators are stripped before parsing.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(text) => {
                let cleaned: String = text
                    .trim()
                    .chars()
                    .filter(|ch| *ch != '$' && *ch != ',')
                    .collect();
                cleaned.parse().ok()
            }
            AnswerValue::Bool(_) | AnswerValue::Many(_) | AnswerValue::Empty => None,
        }
    }

    /// Boolean reading, accepting the yes/no spellings questionnaire content
    /// uses for comparison values.
    pub fn coerce_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(flag) => Some(*flag),
            AnswerValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "y" | "1" => Some(true),
                "no" | "false" | "n" | "0" => Some(false),
                _ => None,
            },
            AnswerValue::Number(_) | AnswerValue::Many(_) | AnswerValue::Empty => None,
        }
    }

    /// Raw string form used when no transform is declared for a mapping.
    pub fn display_string(&self) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Bool(flag) => flag.to_string(),
            AnswerValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{}", value)
                }
            }
            AnswerValue::Many(values) => values.join(", "),
            AnswerValue::Empty => String::new(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Text(text.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        AnswerValue::Text(text)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(flag: bool) -> Self {
        AnswerValue::Bool(flag)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Many(values)
    }
}

/// Stored answers keyed by question id. Key order never matters; the BTreeMap
/// only buys deterministic iteration.
pub type ResponseMap = BTreeMap<String, AnswerValue>;

/// Bookkeeping carried alongside a saved draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_section: Option<usize>,
}

/// A response snapshot as exchanged with the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub questionnaire_id: String,
    pub spec_version: String,
    pub responses: ResponseMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ResponseSet {
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, serde_cbor::Error> {
        serde_cbor::from_slice(bytes)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// One failed check against one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub question_id: String,
    pub message: String,
    pub code: String,
}

/// Outcome of validating a full response map.
///
/// User input problems are data, never errors: callers block submission on
/// `valid == false` and attach `errors_by_question` messages to the exact
/// fields that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors_by_question: BTreeMap<String, Vec<String>>,
    pub missing_required: Vec<String>,
    /// Schema-order id of the first visible question carrying an error,
    /// used to point the user somewhere concrete when submission is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_failing: Option<String>,
}
