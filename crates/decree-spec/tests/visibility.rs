use serde_json::json;

use decree_spec::{
    AnswerValue, QuestionnaireSpec, ResponseMap, effective_required, resolve_visibility,
    visible_questions, visible_sections,
};

fn fixture() -> QuestionnaireSpec {
    QuestionnaireSpec::load_json(include_str!("fixtures/uncontested_divorce.json"))
        .expect("fixture questionnaire loads")
}

fn parse(value: serde_json::Value) -> QuestionnaireSpec {
    serde_json::from_value(value).expect("inline questionnaire parses")
}

fn answers(pairs: &[(&str, AnswerValue)]) -> ResponseMap {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

#[test]
fn conditional_question_waits_for_its_trigger() {
    let spec = parse(json!({
        "id": "pair",
        "name": "Pair",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "has-children", "type": "yes-no", "label": "Children?", "required": true },
                {
                    "id": "child-count",
                    "type": "number",
                    "label": "How many?",
                    "required": true,
                    "conditions": [
                        { "source": "has-children", "operator": "equals", "value": "yes", "effect": "show" }
                    ]
                }
            ]
        }]
    }));

    let empty = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &empty);
    assert_eq!(visibility.get("has-children"), Some(&true));
    assert_eq!(visibility.get("child-count"), Some(&false));

    let yes = answers(&[("has-children", AnswerValue::Bool(true))]);
    let visibility = resolve_visibility(&spec, &yes);
    assert_eq!(visibility.get("child-count"), Some(&true));

    let no = answers(&[("has-children", AnswerValue::Bool(false))]);
    let visibility = resolve_visibility(&spec, &no);
    assert_eq!(visibility.get("child-count"), Some(&false));
}

#[test]
fn all_show_rules_must_fire() {
    // spousal-support-monthly is gated on "answered" AND "not waived".
    let spec = fixture();

    let empty = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &empty);
    assert_eq!(visibility.get("spousal-support-monthly"), Some(&false));

    let waived = answers(&[("spousal-support", AnswerValue::from("waived"))]);
    let visibility = resolve_visibility(&spec, &waived);
    assert_eq!(visibility.get("spousal-support-monthly"), Some(&false));

    let pays = answers(&[("spousal-support", AnswerValue::from("respondent-pays"))]);
    let visibility = resolve_visibility(&spec, &pays);
    assert_eq!(visibility.get("spousal-support-monthly"), Some(&true));
    assert_eq!(visibility.get("spousal-support-months"), Some(&true));
}

#[test]
fn firing_hide_rule_overrides_show() {
    let spec = parse(json!({
        "id": "hide-wins",
        "name": "Hide wins",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "trigger", "type": "yes-no", "label": "Trigger" },
                {
                    "id": "target",
                    "type": "short-text",
                    "label": "Target",
                    "conditions": [
                        { "source": "trigger", "operator": "answered", "effect": "show" },
                        { "source": "trigger", "operator": "equals", "value": "yes", "effect": "hide" }
                    ]
                }
            ]
        }]
    }));

    let shown = answers(&[("trigger", AnswerValue::Bool(false))]);
    assert_eq!(resolve_visibility(&spec, &shown).get("target"), Some(&true));

    let hidden = answers(&[("trigger", AnswerValue::Bool(true))]);
    assert_eq!(resolve_visibility(&spec, &hidden).get("target"), Some(&false));
}

#[test]
fn section_gate_cascades_to_member_questions() {
    let spec = fixture();

    let empty = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &empty);
    assert_eq!(visibility.get("children-count"), Some(&false));
    assert_eq!(visibility.get("custody-arrangement"), Some(&false));

    let section_ids: Vec<&str> = visible_sections(&spec, &empty)
        .iter()
        .map(|section| section.id.as_str())
        .collect();
    assert!(!section_ids.contains(&"children"));
    assert!(visible_questions(&spec, &empty, "children").is_empty());

    let with_children = answers(&[("has-minor-children", AnswerValue::Bool(true))]);
    let visibility = resolve_visibility(&spec, &with_children);
    assert_eq!(visibility.get("children-count"), Some(&true));
    let section_ids: Vec<&str> = visible_sections(&spec, &with_children)
        .iter()
        .map(|section| section.id.as_str())
        .collect();
    assert!(section_ids.contains(&"children"));
}

#[test]
fn ungated_section_follows_its_members() {
    let spec = parse(json!({
        "id": "member-driven",
        "name": "Member driven",
        "version": "1.0.0",
        "sections": [
            {
                "id": "first",
                "title": "First",
                "questions": [
                    { "id": "trigger", "type": "yes-no", "label": "Trigger" }
                ]
            },
            {
                "id": "second",
                "title": "Second",
                "questions": [
                    {
                        "id": "dependent",
                        "type": "short-text",
                        "label": "Dependent",
                        "conditions": [
                            { "source": "trigger", "operator": "equals", "value": "yes", "effect": "show" }
                        ]
                    }
                ]
            }
        ]
    }));

    let empty = ResponseMap::new();
    let section_ids: Vec<&str> = visible_sections(&spec, &empty)
        .iter()
        .map(|section| section.id.as_str())
        .collect();
    assert_eq!(section_ids, vec!["first"]);

    let yes = answers(&[("trigger", AnswerValue::Bool(true))]);
    let section_ids: Vec<&str> = visible_sections(&spec, &yes)
        .iter()
        .map(|section| section.id.as_str())
        .collect();
    assert_eq!(section_ids, vec!["first", "second"]);
}

#[test]
fn condition_cycles_fail_closed() {
    // Bypasses load-time checks on purpose: a cycle that sneaks into a
    // running engine must hide its members, not loop or guess.
    let spec = parse(json!({
        "id": "cyclic",
        "name": "Cyclic",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                {
                    "id": "q-a",
                    "type": "short-text",
                    "label": "A",
                    "conditions": [
                        { "source": "q-b", "operator": "answered", "effect": "show" }
                    ]
                },
                {
                    "id": "q-b",
                    "type": "short-text",
                    "label": "B",
                    "conditions": [
                        { "source": "q-a", "operator": "answered", "effect": "show" }
                    ]
                },
                { "id": "q-c", "type": "short-text", "label": "C" }
            ]
        }]
    }));

    let responses = answers(&[
        ("q-a", AnswerValue::from("stored")),
        ("q-b", AnswerValue::from("stored")),
    ]);
    let visibility = resolve_visibility(&spec, &responses);
    assert_eq!(visibility.get("q-a"), Some(&false));
    assert_eq!(visibility.get("q-b"), Some(&false));
    assert_eq!(visibility.get("q-c"), Some(&true));
}

#[test]
fn require_wins_over_relax_in_the_same_pass() {
    let spec = parse(json!({
        "id": "tug-of-war",
        "name": "Tug of war",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "trigger", "type": "yes-no", "label": "Trigger" },
                {
                    "id": "target",
                    "type": "short-text",
                    "label": "Target",
                    "conditions": [
                        { "source": "trigger", "operator": "equals", "value": "yes", "effect": "require" },
                        { "source": "trigger", "operator": "equals", "value": "yes", "effect": "relax" }
                    ]
                }
            ]
        }]
    }));

    let question = spec.question("target").unwrap();

    let both_fire = answers(&[("trigger", AnswerValue::Bool(true))]);
    assert!(effective_required(question, &both_fire));

    let neither_fires = answers(&[("trigger", AnswerValue::Bool(false))]);
    assert!(!effective_required(question, &neither_fires));
}

#[test]
fn relax_rule_downgrades_a_required_question() {
    let spec = fixture();
    let question = spec.question("respondent-email").unwrap();

    let unrepresented = answers(&[("respondent-represented", AnswerValue::Bool(false))]);
    assert!(effective_required(question, &unrepresented));

    let represented = answers(&[("respondent-represented", AnswerValue::Bool(true))]);
    assert!(!effective_required(question, &represented));
}
