use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::{AnswerValue, ResponseMap};

/// Comparison applied between a stored answer and a rule's comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    Answered,
    NotAnswered,
}

impl ConditionOperator {
    /// Operators that compare against a value; `Answered`/`NotAnswered`
    /// only inspect presence.
    pub fn needs_comparison(&self) -> bool {
        !matches!(
            self,
            ConditionOperator::Answered | ConditionOperator::NotAnswered
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "notEquals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::GreaterThan => "greaterThan",
            ConditionOperator::LessThan => "lessThan",
            ConditionOperator::Answered => "answered",
            ConditionOperator::NotAnswered => "notAnswered",
        }
    }
}

/// What a firing condition does to the question that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleEffect {
    Show,
    Hide,
    Require,
    Relax,
}

/// A conditional rule attached to a question or section.
///
/// `source` names an earlier question; the rule fires when `operator` holds
/// between that question's stored answer and `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionalRule {
    pub source: String,
    pub operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AnswerValue>,
    pub effect: RuleEffect,
}

impl ConditionalRule {
    /// Whether this rule fires against the given responses.
    pub fn fires(&self, responses: &ResponseMap) -> bool {
        evaluate(self.operator, responses.get(&self.source), self.value.as_ref())
    }
}

/// The one condition evaluator.
///
/// Visibility, requiredness, and section gating all route through here so
/// "does this rule fire" has a single meaning. Total: malformed pairings
/// simply do not fire.
pub fn evaluate(
    operator: ConditionOperator,
    stored: Option<&AnswerValue>,
    comparison: Option<&AnswerValue>,
) -> bool {
    let answered = stored.map(AnswerValue::answered).unwrap_or(false);
    match operator {
        ConditionOperator::Answered => answered,
        ConditionOperator::NotAnswered => !answered,
        ConditionOperator::Equals => {
            let (Some(stored), Some(comparison)) = (stored, comparison) else {
                return false;
            };
            answered && loose_eq(stored, comparison)
        }
        ConditionOperator::NotEquals => {
            // An unanswered source is "not equal" to any concrete value.
            let Some(comparison) = comparison else {
                return false;
            };
            match stored {
                Some(stored) if stored.answered() => !loose_eq(stored, comparison),
                _ => true,
            }
        }
        ConditionOperator::Contains => {
            let (Some(stored), Some(comparison)) = (stored, comparison) else {
                return false;
            };
            let Some(needle) = comparison.as_text() else {
                return false;
            };
            match stored {
                AnswerValue::Many(values) => values.iter().any(|value| value == needle),
                AnswerValue::Text(text) => text.contains(needle),
                _ => false,
            }
        }
        ConditionOperator::GreaterThan | ConditionOperator::LessThan => {
            let left = stored.and_then(AnswerValue::coerce_number);
            let right = comparison.and_then(AnswerValue::coerce_number);
            match (left, right) {
                (Some(left), Some(right)) => {
                    if operator == ConditionOperator::GreaterThan {
                        left > right
                    } else {
                        left < right
                    }
                }
                _ => false,
            }
        }
    }
}

/// Scalar equality lenient about the shapes questionnaire content mixes:
/// yes/no text against booleans, numeric text against numbers, and a
/// single-element selection against its lone value.
fn loose_eq(left: &AnswerValue, right: &AnswerValue) -> bool {
    match (left, right) {
        (AnswerValue::Text(a), AnswerValue::Text(b)) => a == b,
        (AnswerValue::Bool(a), AnswerValue::Bool(b)) => a == b,
        (AnswerValue::Number(a), AnswerValue::Number(b)) => a == b,
        (AnswerValue::Bool(_), AnswerValue::Text(_))
        | (AnswerValue::Text(_), AnswerValue::Bool(_)) => {
            match (left.coerce_bool(), right.coerce_bool()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (AnswerValue::Number(_), AnswerValue::Text(_))
        | (AnswerValue::Text(_), AnswerValue::Number(_)) => {
            match (left.coerce_number(), right.coerce_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (AnswerValue::Many(values), AnswerValue::Text(text))
        | (AnswerValue::Text(text), AnswerValue::Many(values)) => {
            values.len() == 1 && &values[0] == text
        }
        (AnswerValue::Many(a), AnswerValue::Many(b)) => a == b,
        _ => false,
    }
}
