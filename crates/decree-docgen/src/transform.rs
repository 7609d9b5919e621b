//! Value transforms applied between a stored answer and a form field.
//!
//! Every transform is total: bad input degrades to a readable string, never
//! a panic or an error. Generation must not fall over because someone typed
//! "around June" into a date box; validation owns telling them off.

use decree_spec::AnswerValue;
use decree_spec::format;
use serde::{Deserialize, Serialize};

/// Named transforms the mapping tables may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    /// `2024-03-18` -> `March 18, 2024`; unparseable input passes through.
    LongDate,
    /// Two-decimal `$` rendering; non-numeric input counts as zero.
    Currency,
    /// County code -> court-caption county name.
    CountyName,
    /// Custody code -> the decision-making wording decrees use.
    LegalAuthority,
    /// Parenting schedule code -> agreement wording.
    ScheduleType,
    /// Truthy answer -> `Yes` / `No`.
    YesNoWord,
    Uppercase,
}

impl Transform {
    /// Apply the transform to a stored answer, producing the string that
    /// lands in the document.
    pub fn apply(&self, value: &AnswerValue) -> String {
        match self {
            Transform::LongDate => {
                let raw = value.display_string();
                format::long_date(&raw).unwrap_or(raw)
            }
            Transform::Currency => format::currency_opt(value.coerce_number()),
            Transform::CountyName => lookup(value, county_name),
            Transform::LegalAuthority => lookup(value, legal_authority),
            Transform::ScheduleType => lookup(value, schedule_type),
            Transform::YesNoWord => match value.coerce_bool() {
                Some(true) => "Yes".to_string(),
                Some(false) => "No".to_string(),
                None => value.display_string(),
            },
            Transform::Uppercase => value.display_string().to_uppercase(),
        }
    }

    /// What to emit when the source answer is absent entirely. Only currency
    /// fields have a meaningful blank: official financial forms expect
    /// `$0.00`, not empty boxes.
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            Transform::Currency => Some("$0.00"),
            _ => None,
        }
    }
}

/// Code->label lookup with identity fallback. The questionnaire content and
/// this catalog can drift out of step; an unrecognized code still reaches
/// the page rather than silently vanishing.
fn lookup(value: &AnswerValue, table: fn(&str) -> Option<&'static str>) -> String {
    let raw = value.display_string();
    table(raw.trim()).map(str::to_string).unwrap_or(raw)
}

fn county_name(code: &str) -> Option<&'static str> {
    match code {
        "jefferson" => Some("Jefferson County"),
        "madison" => Some("Madison County"),
        "hamilton" => Some("Hamilton County"),
        "clark" => Some("Clark County"),
        _ => None,
    }
}

fn legal_authority(code: &str) -> Option<&'static str> {
    match code {
        "joint-legal" => Some("Joint legal custody, with decision-making authority shared by both parents"),
        "sole-petitioner" => Some("Sole legal custody to the Petitioner"),
        "sole-respondent" => Some("Sole legal custody to the Respondent"),
        _ => None,
    }
}

fn schedule_type(code: &str) -> Option<&'static str> {
    match code {
        "alternating-weeks" => Some("Alternating weeks"),
        "weekends" => Some("Alternate weekends with one midweek evening"),
        "custom" => Some("The custom schedule described in the parenting plan"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_total() {
        assert_eq!(Transform::Currency.apply(&AnswerValue::Number(450.0)), "$450.00");
        assert_eq!(
            Transform::Currency.apply(&AnswerValue::Number(-123.456)),
            "-$123.46"
        );
        assert_eq!(Transform::Currency.apply(&AnswerValue::from("$1,200")), "$1200.00");
        assert_eq!(Transform::Currency.apply(&AnswerValue::from("unknown")), "$0.00");
        assert_eq!(Transform::Currency.apply(&AnswerValue::Empty), "$0.00");
    }

    #[test]
    fn long_date_passes_junk_through() {
        assert_eq!(
            Transform::LongDate.apply(&AnswerValue::from("2024-03-18")),
            "March 18, 2024"
        );
        assert_eq!(
            Transform::LongDate.apply(&AnswerValue::from("around June")),
            "around June"
        );
    }

    #[test]
    fn lookups_fall_back_to_identity() {
        assert_eq!(
            Transform::CountyName.apply(&AnswerValue::from("jefferson")),
            "Jefferson County"
        );
        assert_eq!(
            Transform::CountyName.apply(&AnswerValue::from("greene")),
            "greene"
        );
        assert_eq!(
            Transform::ScheduleType.apply(&AnswerValue::from("weekends")),
            "Alternate weekends with one midweek evening"
        );
    }

    #[test]
    fn yes_no_word_reads_bools_and_text() {
        assert_eq!(Transform::YesNoWord.apply(&AnswerValue::Bool(true)), "Yes");
        assert_eq!(Transform::YesNoWord.apply(&AnswerValue::from("no")), "No");
        assert_eq!(
            Transform::YesNoWord.apply(&AnswerValue::from("maybe")),
            "maybe"
        );
    }

    #[test]
    fn only_currency_declares_a_default() {
        assert_eq!(Transform::Currency.default_value(), Some("$0.00"));
        assert_eq!(Transform::LongDate.default_value(), None);
        assert_eq!(Transform::Uppercase.default_value(), None);
    }
}
