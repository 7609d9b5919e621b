//! Structural checks over authored questionnaire content.
//!
//! Everything here reports configuration defects, the kind that should break
//! a content build rather than surface to a user filling in answers.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::question::{QuestionType, ValidationRule};
use crate::schema::questionnaire::QuestionnaireSpec;

/// Validate a questionnaire definition, failing on the first defect found.
pub fn check(spec: &QuestionnaireSpec) -> Result<(), ConfigError> {
    let mut section_ids = BTreeSet::new();
    for section in &spec.sections {
        if !section_ids.insert(section.id.as_str()) {
            return Err(ConfigError::DuplicateSectionId(section.id.clone()));
        }
    }

    let mut question_ids = BTreeSet::new();
    for question in spec.iter_questions() {
        if !question_ids.insert(question.id.as_str()) {
            return Err(ConfigError::DuplicateQuestionId(question.id.clone()));
        }
    }

    for question in spec.iter_questions() {
        if question.kind.is_choice() && question.options.is_empty() {
            return Err(ConfigError::MissingOptions(question.id.clone()));
        }
        if !question.kind.is_choice()
            && !matches!(question.kind, QuestionType::YesNo)
            && !question.options.is_empty()
        {
            return Err(ConfigError::UnexpectedOptions(question.id.clone()));
        }

        for rule in &question.rules {
            if let ValidationRule::Pattern { pattern, .. } = rule
                && Regex::new(pattern).is_err()
            {
                return Err(ConfigError::InvalidPattern {
                    question: question.id.clone(),
                    pattern: pattern.clone(),
                });
            }
        }

        for condition in &question.conditions {
            if !question_ids.contains(condition.source.as_str()) {
                return Err(ConfigError::UnknownConditionSource {
                    question: question.id.clone(),
                    source: condition.source.clone(),
                });
            }
            if condition.operator.needs_comparison() && condition.value.is_none() {
                return Err(ConfigError::MissingComparison {
                    question: question.id.clone(),
                    operator: condition.operator.as_str().to_string(),
                });
            }
        }
    }

    for section in &spec.sections {
        if let Some(condition) = &section.visible_when {
            if !question_ids.contains(condition.source.as_str()) {
                return Err(ConfigError::UnknownSectionSource {
                    section: section.id.clone(),
                    source: condition.source.clone(),
                });
            }
            if condition.operator.needs_comparison() && condition.value.is_none() {
                return Err(ConfigError::MissingComparison {
                    question: section.id.clone(),
                    operator: condition.operator.as_str().to_string(),
                });
            }
        }
    }

    let stuck = unresolvable(spec);
    if !stuck.is_empty() {
        return Err(ConfigError::ConditionCycle(extract_cycle(spec, &stuck)));
    }

    Ok(())
}

/// Question ids whose conditions can never be ordered: members of a condition
/// reference cycle, plus anything downstream of one.
///
/// Evaluation reads stored values, so a cycle cannot make the engine loop;
/// it still marks content that has no well-defined reading, and visibility
/// resolution hides these questions outright.
pub fn unresolvable(spec: &QuestionnaireSpec) -> BTreeSet<String> {
    let known: BTreeSet<&str> = spec.iter_questions().map(|q| q.id.as_str()).collect();
    let mut deps: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for question in spec.iter_questions() {
        let sources = question
            .conditions
            .iter()
            .map(|condition| condition.source.as_str())
            .filter(|source| known.contains(source))
            .collect();
        deps.insert(question.id.as_str(), sources);
    }

    // Peel questions whose sources are all settled; whatever remains sits on
    // or behind a cycle.
    let mut settled: BTreeSet<&str> = BTreeSet::new();
    loop {
        let mut advanced = false;
        for (id, sources) in &deps {
            if settled.contains(id) {
                continue;
            }
            if sources.iter().all(|source| settled.contains(source)) {
                settled.insert(*id);
                advanced = true;
            }
        }
        if !advanced {
            break;
        }
    }

    deps.keys()
        .filter(|id| !settled.contains(**id))
        .map(|id| id.to_string())
        .collect()
}

/// Walk the stuck subgraph from its smallest id until a repeat, producing one
/// concrete cycle path for the error message.
fn extract_cycle(spec: &QuestionnaireSpec, stuck: &BTreeSet<String>) -> Vec<String> {
    let mut path: Vec<String> = Vec::new();
    let mut current = match stuck.iter().next() {
        Some(id) => id.clone(),
        None => return path,
    };

    loop {
        if let Some(position) = path.iter().position(|id| *id == current) {
            path.push(current);
            return path.split_off(position);
        }
        path.push(current.clone());

        let next = spec.question(&current).and_then(|question| {
            question
                .conditions
                .iter()
                .map(|condition| condition.source.clone())
                .find(|source| stuck.contains(source))
        });
        match next {
            Some(next) => current = next,
            // Only reachable mid-walk if the stuck set was not a cycle after
            // all; report what was collected.
            None => return path,
        }
    }
}
