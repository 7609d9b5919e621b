use serde_json::json;

use decree_spec::{AnswerValue, QuestionnaireSpec, ResponseMap, next_question, progress};

fn fixture() -> QuestionnaireSpec {
    QuestionnaireSpec::load_json(include_str!("fixtures/uncontested_divorce.json"))
        .expect("fixture questionnaire loads")
}

fn parse(value: serde_json::Value) -> QuestionnaireSpec {
    serde_json::from_value(value).expect("inline questionnaire parses")
}

fn four_question_spec() -> QuestionnaireSpec {
    parse(json!({
        "id": "four",
        "name": "Four",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "first", "type": "yes-no", "label": "First", "required": true },
                { "id": "second", "type": "short-text", "label": "Second", "required": true },
                {
                    "id": "third",
                    "type": "number",
                    "label": "Third",
                    "required": true,
                    "conditions": [
                        { "source": "first", "operator": "equals", "value": "yes", "effect": "show" }
                    ]
                },
                { "id": "fourth", "type": "long-text", "label": "Fourth" }
            ]
        }]
    }))
}

#[test]
fn denominator_is_visible_required_questions() {
    let spec = four_question_spec();

    let mut responses = ResponseMap::new();
    assert_eq!(progress(&spec, &responses).percent, 0);

    responses.insert("first".to_string(), AnswerValue::Bool(false));
    assert_eq!(progress(&spec, &responses).percent, 50);

    responses.insert("second".to_string(), AnswerValue::from("done"));
    assert_eq!(progress(&spec, &responses).percent, 100);

    // Flipping the trigger reveals a third required question.
    responses.insert("first".to_string(), AnswerValue::Bool(true));
    assert_eq!(progress(&spec, &responses).percent, 67);

    responses.insert("third".to_string(), AnswerValue::Number(2.0));
    assert_eq!(progress(&spec, &responses).percent, 100);
}

#[test]
fn optional_questions_do_not_move_the_needle() {
    let spec = four_question_spec();
    let mut responses = ResponseMap::new();
    responses.insert("fourth".to_string(), AnswerValue::from("notes"));
    assert_eq!(progress(&spec, &responses).percent, 0);
}

#[test]
fn all_optional_means_complete() {
    let spec = parse(json!({
        "id": "optional",
        "name": "Optional",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "a", "type": "short-text", "label": "A" },
                { "id": "b", "type": "short-text", "label": "B" }
            ]
        }]
    }));

    let snapshot = progress(&spec, &ResponseMap::new());
    assert_eq!(snapshot.percent, 100);
    assert!(snapshot.sections.iter().all(|section| section.complete));
}

#[test]
fn percent_rounds_to_nearest() {
    let spec = parse(json!({
        "id": "thirds",
        "name": "Thirds",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "a", "type": "short-text", "label": "A", "required": true },
                { "id": "b", "type": "short-text", "label": "B", "required": true },
                { "id": "c", "type": "short-text", "label": "C", "required": true }
            ]
        }]
    }));

    let mut responses = ResponseMap::new();
    responses.insert("a".to_string(), AnswerValue::from("yes"));
    assert_eq!(progress(&spec, &responses).percent, 33);
    responses.insert("b".to_string(), AnswerValue::from("yes"));
    assert_eq!(progress(&spec, &responses).percent, 67);
}

#[test]
fn answering_in_order_never_loses_ground() {
    let spec = fixture();
    let script: Vec<(&str, AnswerValue)> = vec![
        ("filing-county", AnswerValue::from("jefferson")),
        ("residency-months", AnswerValue::Number(24.0)),
        ("marriage-date", AnswerValue::from("2015-06-01")),
        ("marriage-city", AnswerValue::from("Madison")),
        ("marriage-state", AnswerValue::from("Ohio")),
        ("separation-date", AnswerValue::from("2024-11-02")),
        ("reconciliation-possible", AnswerValue::Bool(false)),
        ("has-minor-children", AnswerValue::Bool(false)),
        ("petitioner-full-name", AnswerValue::from("Jane Quinn Doe")),
        (
            "petitioner-address",
            AnswerValue::from("12 Oak Street\nMadison, OH 43001"),
        ),
        ("petitioner-phone", AnswerValue::from("(614) 555-0114")),
        ("petitioner-restore-name", AnswerValue::Bool(false)),
        ("respondent-full-name", AnswerValue::from("John R. Doe")),
        (
            "respondent-address",
            AnswerValue::from("48 Elm Avenue\nMadison, OH 43001"),
        ),
        ("respondent-represented", AnswerValue::Bool(false)),
        ("respondent-email", AnswerValue::from("john@example.com")),
        ("owns-marital-home", AnswerValue::Bool(false)),
        ("debt-division", AnswerValue::from("each-own")),
        ("petitioner-monthly-income", AnswerValue::Number(4200.0)),
        ("respondent-monthly-income", AnswerValue::Number(3900.0)),
        ("spousal-support", AnswerValue::from("waived")),
        ("agreement-complete", AnswerValue::Bool(true)),
        ("signature-city", AnswerValue::from("Madison")),
    ];

    let mut responses = ResponseMap::new();
    let mut last = progress(&spec, &responses).percent;
    for (id, value) in script {
        responses.insert(id.to_string(), value);
        let now = progress(&spec, &responses).percent;
        assert!(
            now >= last,
            "progress regressed from {last} to {now} after answering {id}"
        );
        last = now;
    }
    assert_eq!(last, 100);
}

#[test]
fn hidden_sections_read_as_complete() {
    let spec = fixture();
    let snapshot = progress(&spec, &ResponseMap::new());

    let children = snapshot
        .sections
        .iter()
        .find(|section| section.section_id == "children")
        .expect("children section is listed");
    assert!(children.complete);

    let filing = snapshot
        .sections
        .iter()
        .find(|section| section.section_id == "filing")
        .expect("filing section is listed");
    assert!(!filing.complete);
}

#[test]
fn next_question_walks_required_first_in_schema_order() {
    let spec = fixture();

    let empty = ResponseMap::new();
    let next = next_question(&spec, &empty).expect("an unanswered question exists");
    assert_eq!(next.id, "filing-county");

    let mut responses = ResponseMap::new();
    responses.insert("filing-county".to_string(), AnswerValue::from("jefferson"));
    let next = next_question(&spec, &responses).expect("an unanswered question exists");
    // filing-date is optional, so the walk skips it while required
    // questions remain.
    assert_eq!(next.id, "residency-months");
}

#[test]
fn next_question_falls_back_to_optional_then_none() {
    let spec = four_question_spec();

    let mut responses = ResponseMap::new();
    responses.insert("first".to_string(), AnswerValue::Bool(false));
    responses.insert("second".to_string(), AnswerValue::from("done"));

    let next = next_question(&spec, &responses).expect("the optional question remains");
    assert_eq!(next.id, "fourth");

    responses.insert("fourth".to_string(), AnswerValue::from("notes"));
    assert!(next_question(&spec, &responses).is_none());
}
