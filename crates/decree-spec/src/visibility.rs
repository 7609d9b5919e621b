use std::collections::BTreeMap;

use crate::answers::ResponseMap;
use crate::condition::RuleEffect;
use crate::integrity;
use crate::schema::question::QuestionSpec;
use crate::schema::questionnaire::QuestionnaireSpec;
use crate::schema::section::SectionSpec;

/// Per-question visibility after section gating, keyed by question id.
pub type VisibilityMap = BTreeMap<String, bool>;

/// Resolve visibility for every question in one pass.
///
/// Conditions read stored answers only, never another question's computed
/// visibility, so there is no fixed point to iterate. Questions flagged
/// unresolvable by the integrity pass (condition cycles) come out hidden.
pub fn resolve_visibility(spec: &QuestionnaireSpec, responses: &ResponseMap) -> VisibilityMap {
    let own = own_visibility(spec, responses);

    let mut map = VisibilityMap::new();
    for section in &spec.sections {
        let section_on = section_visible(section, responses, &own);
        for question in &section.questions {
            let shown = section_on && own.get(question.id.as_str()).copied().unwrap_or(true);
            map.insert(question.id.clone(), shown);
        }
    }
    map
}

/// Sections currently visible, preserving schema order.
pub fn visible_sections<'a>(
    spec: &'a QuestionnaireSpec,
    responses: &ResponseMap,
) -> Vec<&'a SectionSpec> {
    let own = own_visibility(spec, responses);
    spec.sections
        .iter()
        .filter(|section| section_visible(section, responses, &own))
        .collect()
}

/// Visible questions of one section, preserving schema order. An unknown or
/// hidden section yields an empty list.
pub fn visible_questions<'a>(
    spec: &'a QuestionnaireSpec,
    responses: &ResponseMap,
    section_id: &str,
) -> Vec<&'a QuestionSpec> {
    let Some(section) = spec.section(section_id) else {
        return Vec::new();
    };
    let own = own_visibility(spec, responses);
    if !section_visible(section, responses, &own) {
        return Vec::new();
    }
    section
        .questions
        .iter()
        .filter(|question| own.get(question.id.as_str()).copied().unwrap_or(true))
        .collect()
}

/// Visibility from a question's own show/hide rules, ignoring its section.
///
/// Useful for probing a single question; `resolve_visibility` layers section
/// gating and cycle handling on top of this.
pub fn question_visible(question: &QuestionSpec, responses: &ResponseMap) -> bool {
    let mut visible = true;
    for condition in &question.conditions {
        match condition.effect {
            RuleEffect::Show => {
                if !condition.fires(responses) {
                    visible = false;
                }
            }
            RuleEffect::Hide => {
                if condition.fires(responses) {
                    visible = false;
                }
            }
            RuleEffect::Require | RuleEffect::Relax => {}
        }
    }
    visible
}

/// Requiredness after conditional require/relax rules.
///
/// When rules disagree in the same evaluation, require wins over relax: the
/// engine fails toward collecting more information, not less.
pub fn effective_required(question: &QuestionSpec, responses: &ResponseMap) -> bool {
    let mut any_require = false;
    let mut any_relax = false;
    for condition in &question.conditions {
        match condition.effect {
            RuleEffect::Require => {
                if condition.fires(responses) {
                    any_require = true;
                }
            }
            RuleEffect::Relax => {
                if condition.fires(responses) {
                    any_relax = true;
                }
            }
            RuleEffect::Show | RuleEffect::Hide => {}
        }
    }

    if any_require {
        true
    } else if any_relax {
        false
    } else {
        question.required_by_default()
    }
}

fn own_visibility<'a>(
    spec: &'a QuestionnaireSpec,
    responses: &ResponseMap,
) -> BTreeMap<&'a str, bool> {
    let stuck = integrity::unresolvable(spec);
    spec.iter_questions()
        .map(|question| {
            let shown = !stuck.contains(&question.id) && question_visible(question, responses);
            (question.id.as_str(), shown)
        })
        .collect()
}

fn section_visible(
    section: &SectionSpec,
    responses: &ResponseMap,
    own: &BTreeMap<&str, bool>,
) -> bool {
    match &section.visible_when {
        Some(condition) => condition.fires(responses),
        None => section
            .questions
            .iter()
            .any(|question| own.get(question.id.as_str()).copied().unwrap_or(true)),
    }
}
