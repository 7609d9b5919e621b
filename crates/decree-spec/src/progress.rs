use serde::{Deserialize, Serialize};

use crate::answers::ResponseMap;
use crate::schema::question::QuestionSpec;
use crate::schema::questionnaire::QuestionnaireSpec;
use crate::visibility::{effective_required, resolve_visibility};

/// Completion state of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub section_id: String,
    pub complete: bool,
}

/// Completion snapshot, always derived from schema + responses, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 0-100, rounded to the nearest integer.
    pub percent: u8,
    pub sections: Vec<SectionProgress>,
}

/// Compute overall and per-section completion.
///
/// The denominator is the set of visible, effectively required questions; a
/// questionnaire with none of those is trivially complete (100). Zero is an
/// answer; an empty string or empty selection is not.
pub fn progress(spec: &QuestionnaireSpec, responses: &ResponseMap) -> Progress {
    let visibility = resolve_visibility(spec, responses);

    let mut total = 0u32;
    let mut answered = 0u32;
    let mut sections = Vec::with_capacity(spec.sections.len());

    for section in &spec.sections {
        let mut section_complete = true;
        for question in &section.questions {
            if !visibility.get(&question.id).copied().unwrap_or(true) {
                continue;
            }
            if !effective_required(question, responses) {
                continue;
            }
            total += 1;
            let has_answer = responses
                .get(&question.id)
                .map(|value| value.answered())
                .unwrap_or(false);
            if has_answer {
                answered += 1;
            } else {
                section_complete = false;
            }
        }
        sections.push(SectionProgress {
            section_id: section.id.clone(),
            complete: section_complete,
        });
    }

    let percent = if total == 0 {
        100
    } else {
        ((answered * 100 + total / 2) / total) as u8
    };

    Progress { percent, sections }
}

/// The question the caller should surface next: the first visible required
/// question without an answer, then the first visible optional one, in
/// schema order.
pub fn next_question<'a>(
    spec: &'a QuestionnaireSpec,
    responses: &ResponseMap,
) -> Option<&'a QuestionSpec> {
    let visibility = resolve_visibility(spec, responses);
    let unanswered = |question: &&QuestionSpec| {
        visibility.get(&question.id).copied().unwrap_or(true)
            && !responses
                .get(&question.id)
                .map(|value| value.answered())
                .unwrap_or(false)
    };

    spec.iter_questions()
        .filter(unanswered)
        .find(|question| effective_required(question, responses))
        .or_else(|| spec.iter_questions().find(unanswered))
}
