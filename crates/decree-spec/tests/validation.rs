use serde_json::json;

use decree_spec::{
    AnswerValue, QuestionnaireSpec, ResponseMap, progress, validate_all, validate_question,
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

/// Every answer a petitioner without children, home, or support obligations
/// would give. Optional questions are left blank on purpose.
fn happy_path() -> ResponseMap {
    answers(&[
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
    ])
}

#[test]
fn empty_responses_block_on_the_first_required_question() {
    let spec = fixture();
    let result = validate_all(&spec, &ResponseMap::new());

    assert!(!result.valid);
    assert_eq!(result.first_failing.as_deref(), Some("filing-county"));
    assert!(result.missing_required.contains(&"filing-county".to_string()));
    assert!(
        result
            .missing_required
            .contains(&"residency-months".to_string())
    );
    // Hidden conditional questions never appear, even though they are
    // required when shown.
    assert!(
        !result
            .missing_required
            .contains(&"children-count".to_string())
    );
    assert!(
        !result
            .missing_required
            .contains(&"petitioner-former-name".to_string())
    );
}

#[test]
fn complete_happy_path_passes() {
    let spec = fixture();
    let responses = happy_path();

    let result = validate_all(&spec, &responses);
    assert!(result.valid, "unexpected errors: {:?}", result.errors_by_question);
    assert!(result.errors_by_question.is_empty());
    assert!(result.missing_required.is_empty());
    assert_eq!(result.first_failing, None);

    assert_eq!(progress(&spec, &responses).percent, 100);
}

#[test]
fn hidden_questions_never_block_even_with_stale_answers() {
    let spec = parse(json!({
        "id": "stale",
        "name": "Stale",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "trigger", "type": "yes-no", "label": "Trigger", "required": true },
                {
                    "id": "detail",
                    "type": "number",
                    "label": "Detail",
                    "required": true,
                    "conditions": [
                        { "source": "trigger", "operator": "equals", "value": "yes", "effect": "show" }
                    ]
                }
            ]
        }]
    }));

    // The detail answer is garbage, but the question is hidden now.
    let responses = answers(&[
        ("trigger", AnswerValue::Bool(false)),
        ("detail", AnswerValue::from("not a number")),
    ]);
    let result = validate_all(&spec, &responses);
    assert!(result.valid);
}

#[test]
fn zero_is_an_answer_blank_text_is_not() {
    let spec = parse(json!({
        "id": "zero",
        "name": "Zero",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                { "id": "amount", "type": "number", "label": "Amount", "required": true },
                { "id": "note", "type": "short-text", "label": "Note", "required": true }
            ]
        }]
    }));

    let responses = answers(&[
        ("amount", AnswerValue::Number(0.0)),
        ("note", AnswerValue::from("   ")),
    ]);
    let result = validate_all(&spec, &responses);
    assert!(!result.valid);
    assert_eq!(result.missing_required, vec!["note".to_string()]);
}

#[test]
fn min_rule_uses_the_authored_message() {
    let spec = fixture();
    let question = spec.question("residency-months").unwrap();

    let issues = validate_question(question, Some(&AnswerValue::Number(3.0)), &ResponseMap::new());
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].message,
        "You must have lived in the state for at least 6 months to file here."
    );
    assert_eq!(issues[0].code, "min");

    let issues = validate_question(question, Some(&AnswerValue::Number(6.0)), &ResponseMap::new());
    assert!(issues.is_empty());
}

#[test]
fn min_and_max_measure_by_question_kind() {
    let spec = parse(json!({
        "id": "measures",
        "name": "Measures",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                {
                    "id": "name",
                    "type": "short-text",
                    "label": "Name",
                    "rules": [{ "kind": "min", "threshold": 2 }]
                },
                {
                    "id": "assets",
                    "type": "multi-choice",
                    "label": "Assets",
                    "options": [
                        { "value": "home", "label": "Home" },
                        { "value": "car", "label": "Car" },
                        { "value": "savings", "label": "Savings" }
                    ],
                    "rules": [{ "kind": "min", "threshold": 2 }]
                },
                {
                    "id": "count",
                    "type": "number",
                    "label": "Count",
                    "rules": [{ "kind": "max", "threshold": 10 }]
                }
            ]
        }]
    }));
    let empty = ResponseMap::new();

    let name = spec.question("name").unwrap();
    let issues = validate_question(name, Some(&AnswerValue::from("x")), &empty);
    assert_eq!(issues[0].message, "Must be at least 2 characters.");

    let assets = spec.question("assets").unwrap();
    let one = AnswerValue::Many(vec!["home".to_string()]);
    let issues = validate_question(assets, Some(&one), &empty);
    assert_eq!(issues[0].message, "Select at least 2 options.");

    let count = spec.question("count").unwrap();
    let issues = validate_question(count, Some(&AnswerValue::Number(11.0)), &empty);
    assert_eq!(issues[0].message, "Value must be at most 10.");
    let issues = validate_question(count, Some(&AnswerValue::Number(10.0)), &empty);
    assert!(issues.is_empty());
}

#[test]
fn pattern_rule_flags_bad_input() {
    let spec = fixture();
    let question = spec.question("petitioner-phone").unwrap();

    let issues = validate_question(question, Some(&AnswerValue::from("abc")), &ResponseMap::new());
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].message,
        "Enter a phone number with at least 7 digits."
    );

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("(614) 555-0114")),
        &ResponseMap::new(),
    );
    assert!(issues.is_empty());
}

#[test]
fn single_choice_rejects_values_off_the_list() {
    let spec = fixture();
    let question = spec.question("filing-county").unwrap();

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("nowhere")),
        &ResponseMap::new(),
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, "options");

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("hamilton")),
        &ResponseMap::new(),
    );
    assert!(issues.is_empty());
}

#[test]
fn dates_must_be_iso_formatted() {
    let spec = fixture();
    let question = spec.question("marriage-date").unwrap();

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("June 1, 2015")),
        &ResponseMap::new(),
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "Enter a valid date (YYYY-MM-DD).");

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("2015-06-01")),
        &ResponseMap::new(),
    );
    assert!(issues.is_empty());
}

#[test]
fn wrong_shape_is_reported_once_as_a_type_issue() {
    let spec = parse(json!({
        "id": "shapes",
        "name": "Shapes",
        "version": "1.0.0",
        "sections": [{
            "id": "only",
            "title": "Only",
            "questions": [
                {
                    "id": "amount",
                    "type": "number",
                    "label": "Amount",
                    "rules": [{ "kind": "min", "threshold": 5 }]
                }
            ]
        }]
    }));
    let question = spec.question("amount").unwrap();

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("plenty")),
        &ResponseMap::new(),
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, "type");
    assert_eq!(issues[0].message, "Enter a number.");
}

#[test]
fn currency_text_coerces_for_number_questions() {
    let spec = fixture();
    let question = spec.question("petitioner-monthly-income").unwrap();

    let issues = validate_question(
        question,
        Some(&AnswerValue::from("$4,200.50")),
        &ResponseMap::new(),
    );
    assert!(issues.is_empty());
}

#[test]
fn conditional_require_fires_on_zero_support() {
    let spec = fixture();
    let question = spec.question("deviation-reason").unwrap();

    let zero = answers(&[("child-support-monthly", AnswerValue::Number(0.0))]);
    let issues = validate_question(question, None, &zero);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, "required");

    // Non-zero support hides the question entirely.
    let paid = answers(&[("child-support-monthly", AnswerValue::Number(500.0))]);
    let issues = validate_question(question, None, &paid);
    assert!(issues.is_empty());
}

#[test]
fn revealed_questions_start_blocking_once_visible() {
    let spec = fixture();

    let mut responses = happy_path();
    responses.insert(
        "petitioner-restore-name".to_string(),
        AnswerValue::Bool(true),
    );
    let result = validate_all(&spec, &responses);
    assert!(!result.valid);
    assert_eq!(
        result.missing_required,
        vec!["petitioner-former-name".to_string()]
    );

    responses.insert(
        "petitioner-former-name".to_string(),
        AnswerValue::from("Jane Quinn Harper"),
    );
    let result = validate_all(&spec, &responses);
    assert!(result.valid);
}
