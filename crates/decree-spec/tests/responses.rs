use serde_json::{Value, json};

use decree_spec::{
    AnswerValue, Meta, QuestionnaireSpec, ResponseMap, ResponseSet, resolve_visibility,
    response_schema, sample_responses,
};

fn fixture() -> QuestionnaireSpec {
    QuestionnaireSpec::load_json(include_str!("fixtures/uncontested_divorce.json"))
        .expect("fixture questionnaire loads")
}

#[test]
fn answer_values_parse_from_plain_json_shapes() {
    let parsed: ResponseMap = serde_json::from_value(json!({
        "agreed": true,
        "count": 2,
        "name": "Jane",
        "assets": ["home", "car"],
        "cleared": null
    }))
    .unwrap();

    assert_eq!(parsed["agreed"], AnswerValue::Bool(true));
    assert_eq!(parsed["count"], AnswerValue::Number(2.0));
    assert_eq!(parsed["name"], AnswerValue::Text("Jane".into()));
    assert_eq!(
        parsed["assets"],
        AnswerValue::Many(vec!["home".into(), "car".into()])
    );
    assert_eq!(parsed["cleared"], AnswerValue::Empty);
}

#[test]
fn response_set_round_trips_through_cbor() {
    let mut responses = ResponseMap::new();
    responses.insert("filing-county".into(), AnswerValue::from("jefferson"));
    responses.insert("residency-months".into(), AnswerValue::Number(24.0));
    responses.insert("reconciliation-possible".into(), AnswerValue::Bool(false));
    responses.insert(
        "assets".into(),
        AnswerValue::Many(vec!["home".into(), "car".into()]),
    );
    responses.insert("cleared".into(), AnswerValue::Empty);

    let set = ResponseSet {
        questionnaire_id: "uncontested-divorce".into(),
        spec_version: "1.4.0".into(),
        responses,
        meta: Some(Meta {
            saved_at: Some("2025-03-18T09:30:00Z".into()),
            current_section: Some(2),
        }),
    };

    let bytes = set.to_cbor().unwrap();
    let back = ResponseSet::from_cbor(&bytes).unwrap();
    assert_eq!(back, set);
}

#[test]
fn response_set_round_trips_through_json() {
    let mut responses = ResponseMap::new();
    responses.insert("signature-city".into(), AnswerValue::from("Madison"));

    let set = ResponseSet {
        questionnaire_id: "uncontested-divorce".into(),
        spec_version: "1.4.0".into(),
        responses,
        meta: None,
    };

    let text = set.to_json_pretty().unwrap();
    let back = ResponseSet::from_json(&text).unwrap();
    assert_eq!(back, set);

    // Absent meta stays absent on the wire.
    assert!(!text.contains("\"meta\""));
}

#[test]
fn display_string_is_stable_for_documents() {
    assert_eq!(AnswerValue::from("Jane").display_string(), "Jane");
    assert_eq!(AnswerValue::Number(3.0).display_string(), "3");
    assert_eq!(AnswerValue::Number(2.5).display_string(), "2.5");
    assert_eq!(AnswerValue::Bool(true).display_string(), "true");
    assert_eq!(
        AnswerValue::Many(vec!["home".into(), "car".into()]).display_string(),
        "home, car"
    );
    assert_eq!(AnswerValue::Empty.display_string(), "");
}

#[test]
fn schema_covers_only_visible_questions() {
    let spec = fixture();
    let responses = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &responses);
    let schema = response_schema(&spec, &visibility, &responses);

    let properties = schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("filing-county"));
    assert!(!properties.contains_key("children-count"));
    assert!(!properties.contains_key("petitioner-former-name"));

    assert_eq!(schema["additionalProperties"], Value::Bool(false));
    let required = schema["required"].as_array().unwrap();
    assert!(required.iter().any(|id| id == "residency-months"));
    assert!(!required.iter().any(|id| id == "filing-date"));
}

#[test]
fn schema_encodes_kind_specific_shapes() {
    let spec = fixture();
    let responses = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &responses);
    let schema = response_schema(&spec, &visibility, &responses);
    let properties = schema["properties"].as_object().unwrap();

    assert_eq!(properties["residency-months"]["type"], "number");
    assert_eq!(properties["marriage-date"]["format"], "date");
    assert_eq!(properties["reconciliation-possible"]["type"], "boolean");
    let counties = properties["filing-county"]["enum"].as_array().unwrap();
    assert_eq!(counties.len(), 4);
    assert!(counties.iter().any(|county| county == "jefferson"));
}

#[test]
fn sample_responses_cover_visible_questions_with_legal_values() {
    let spec = fixture();
    let responses = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &responses);
    let samples = sample_responses(&spec, &visibility);

    assert_eq!(samples["filing-county"], Value::String("jefferson".into()));
    assert_eq!(samples["reconciliation-possible"], Value::Bool(false));
    assert_eq!(samples["marriage-date"], Value::String("2020-01-01".into()));
    assert_eq!(
        samples["petitioner-full-name"],
        Value::String("Jane Q. Doe".into())
    );
    assert!(samples.get("children-count").is_none());
}
