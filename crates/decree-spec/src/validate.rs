use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;

use crate::answers::{AnswerValue, ResponseMap, ValidationIssue, ValidationResult};
use crate::schema::question::{QuestionSpec, QuestionType, ValidationRule};
use crate::schema::questionnaire::QuestionnaireSpec;
use crate::visibility::{effective_required, question_visible, resolve_visibility};

/// Validate one question against a candidate value.
///
/// The required check applies only when the question is visible by its own
/// rules and effectively required. Rules run in declared order; the first
/// failure per rule kind is reported and further kinds keep accumulating, so
/// one question can carry several distinct messages.
pub fn validate_question(
    question: &QuestionSpec,
    value: Option<&AnswerValue>,
    responses: &ResponseMap,
) -> Vec<ValidationIssue> {
    if !question_visible(question, responses) {
        return Vec::new();
    }

    let answered = value.map(AnswerValue::answered).unwrap_or(false);
    if !answered {
        if effective_required(question, responses) {
            let message = question
                .rules
                .iter()
                .find(|rule| matches!(rule, ValidationRule::Required { .. }))
                .and_then(|rule| rule.message())
                .unwrap_or("This question is required.")
                .to_string();
            return vec![issue(question, message, "required")];
        }
        return Vec::new();
    }
    let value = match value {
        Some(value) => value,
        None => return Vec::new(),
    };

    if let Some(message) = type_mismatch(question.kind, value) {
        return vec![issue(question, message, "type")];
    }

    let mut issues = Vec::new();
    let mut failed_kinds: Vec<&'static str> = Vec::new();
    for rule in &question.rules {
        let kind = rule.kind_label();
        if failed_kinds.contains(&kind) {
            continue;
        }
        if let Some(message) = rule_failure(rule, question, value) {
            issues.push(issue(question, message, kind));
            failed_kinds.push(kind);
        }
    }

    if let Some(message) = conformance_failure(question, value) {
        issues.push(issue(question, message.0, message.1));
    }

    issues
}

/// Validate every visible question; hidden questions never block submission
/// regardless of what answer they still carry.
pub fn validate_all(spec: &QuestionnaireSpec, responses: &ResponseMap) -> ValidationResult {
    let visibility = resolve_visibility(spec, responses);

    let mut errors_by_question: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut missing_required = Vec::new();
    let mut first_failing = None;

    for question in spec.iter_questions() {
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        let issues = validate_question(question, responses.get(&question.id), responses);
        if issues.is_empty() {
            continue;
        }
        if issues.iter().any(|issue| issue.code == "required") {
            missing_required.push(question.id.clone());
        }
        if first_failing.is_none() {
            first_failing = Some(question.id.clone());
        }
        errors_by_question.insert(
            question.id.clone(),
            issues.into_iter().map(|issue| issue.message).collect(),
        );
    }

    ValidationResult {
        valid: errors_by_question.is_empty(),
        errors_by_question,
        missing_required,
        first_failing,
    }
}

fn issue(question: &QuestionSpec, message: String, code: &str) -> ValidationIssue {
    ValidationIssue {
        question_id: question.id.clone(),
        message,
        code: code.to_string(),
    }
}

fn type_mismatch(kind: QuestionType, value: &AnswerValue) -> Option<String> {
    let ok = match kind {
        QuestionType::ShortText | QuestionType::LongText | QuestionType::Date => {
            matches!(value, AnswerValue::Text(_))
        }
        QuestionType::Number => value.coerce_number().is_some(),
        QuestionType::SingleChoice => matches!(value, AnswerValue::Text(_)),
        QuestionType::MultiChoice => matches!(value, AnswerValue::Many(_)),
        QuestionType::YesNo => value.coerce_bool().is_some(),
        QuestionType::AddressBlock => {
            matches!(value, AnswerValue::Text(_) | AnswerValue::Many(_))
        }
    };
    if ok {
        return None;
    }
    Some(match kind {
        QuestionType::Number => "Enter a number.".to_string(),
        QuestionType::YesNo => "Answer yes or no.".to_string(),
        QuestionType::MultiChoice => "Select one or more of the listed options.".to_string(),
        _ => "Enter text for this question.".to_string(),
    })
}

fn rule_failure(rule: &ValidationRule, question: &QuestionSpec, value: &AnswerValue) -> Option<String> {
    match rule {
        // Answered questions satisfy `required` by definition.
        ValidationRule::Required { .. } => None,
        ValidationRule::Min { threshold, message } => {
            let measured = measure(question.kind, value)?;
            if measured < *threshold {
                Some(
                    message
                        .clone()
                        .unwrap_or_else(|| min_message(question.kind, *threshold)),
                )
            } else {
                None
            }
        }
        ValidationRule::Max { threshold, message } => {
            let measured = measure(question.kind, value)?;
            if measured > *threshold {
                Some(
                    message
                        .clone()
                        .unwrap_or_else(|| max_message(question.kind, *threshold)),
                )
            } else {
                None
            }
        }
        ValidationRule::Pattern { pattern, message } => {
            let text = value.as_text()?;
            // Invalid patterns are a config defect caught by `integrity::check`;
            // at validation time they simply do not fire.
            let regex = Regex::new(pattern).ok()?;
            if regex.is_match(text) {
                None
            } else {
                Some(
                    message
                        .clone()
                        .unwrap_or_else(|| "Value does not match the expected format.".to_string()),
                )
            }
        }
    }
}

/// What min/max thresholds measure, by question kind: the numeric value for
/// numbers, character count for text, selection count for multi-choice.
fn measure(kind: QuestionType, value: &AnswerValue) -> Option<f64> {
    match kind {
        QuestionType::Number => value.coerce_number(),
        QuestionType::ShortText | QuestionType::LongText | QuestionType::AddressBlock => {
            value.as_text().map(|text| text.chars().count() as f64)
        }
        QuestionType::MultiChoice => value.as_many().map(|values| values.len() as f64),
        QuestionType::Date | QuestionType::SingleChoice | QuestionType::YesNo => None,
    }
}

fn min_message(kind: QuestionType, threshold: f64) -> String {
    match kind {
        QuestionType::Number => format!("Value must be at least {}.", trim_threshold(threshold)),
        QuestionType::MultiChoice => {
            format!("Select at least {} options.", trim_threshold(threshold))
        }
        _ => format!("Must be at least {} characters.", trim_threshold(threshold)),
    }
}

fn max_message(kind: QuestionType, threshold: f64) -> String {
    match kind {
        QuestionType::Number => format!("Value must be at most {}.", trim_threshold(threshold)),
        QuestionType::MultiChoice => {
            format!("Select at most {} options.", trim_threshold(threshold))
        }
        _ => format!("Must be at most {} characters.", trim_threshold(threshold)),
    }
}

fn trim_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 {
        format!("{}", threshold as i64)
    } else {
        format!("{}", threshold)
    }
}

/// Kind-specific conformance beyond the declared rules: choice membership
/// and date well-formedness.
fn conformance_failure(
    question: &QuestionSpec,
    value: &AnswerValue,
) -> Option<(String, &'static str)> {
    match question.kind {
        QuestionType::SingleChoice => {
            let text = value.as_text()?;
            if question.option_values().contains(&text) {
                None
            } else {
                Some(("Choose one of the listed options.".to_string(), "options"))
            }
        }
        QuestionType::MultiChoice => {
            let values = value.as_many()?;
            let allowed = question.option_values();
            if values.iter().all(|value| allowed.contains(&value.as_str())) {
                None
            } else {
                Some((
                    "One or more selections are not listed options.".to_string(),
                    "options",
                ))
            }
        }
        QuestionType::Date => {
            let text = value.as_text()?;
            if NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_ok() {
                None
            } else {
                Some(("Enter a valid date (YYYY-MM-DD).".to_string(), "date"))
            }
        }
        _ => None,
    }
}
