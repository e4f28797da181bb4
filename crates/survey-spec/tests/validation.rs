use serde_json::json;

use survey_spec::{
    AnswerType, Catalog, GroupDraft, IssueCode, QuestionDraft, Scope, Survey, SurveySnapshot,
    validate,
};

fn snapshot(value: serde_json::Value) -> SurveySnapshot {
    serde_json::from_value(value).expect("deserialize snapshot")
}

fn option_code(report: &survey_spec::ValidationReport, key: &str) -> Option<IssueCode> {
    report
        .question_errors
        .get(key)
        .and_then(|issues| issues.options.as_ref())
        .map(|issue| issue.code)
}

#[test]
fn choice_without_options_is_flagged() {
    for answer_type in ["single_choice", "multiple_choice"] {
        let report = validate(
            &snapshot(json!({
                "title": "Visit",
                "questions": [{ "text": "Pick", "answerType": answer_type, "options": [], "order": 1 }]
            })),
            &Catalog::english(),
        );
        assert_eq!(
            option_code(&report, "question_0"),
            Some(IssueCode::OptionsRequired),
            "{answer_type}"
        );
        assert!(report.is_blocking());
    }
}

#[test]
fn blank_option_is_flagged() {
    let report = validate(
        &snapshot(json!({
            "title": "Visit",
            "questions": [{ "text": "Pick", "answerType": "single_choice", "options": ["a", ""], "order": 1 }]
        })),
        &Catalog::english(),
    );
    assert_eq!(
        option_code(&report, "question_0"),
        Some(IssueCode::OptionBlank)
    );
}

#[test]
fn empty_group_needs_a_question() {
    let report = validate(
        &snapshot(json!({
            "title": "Visit",
            "groups": [{ "title": "Service", "questions": [], "order": 1 }]
        })),
        &Catalog::english(),
    );
    let group = report.group_errors.get("group_0").expect("group_0 issues");
    assert_eq!(
        group.questions.as_ref().map(|issue| issue.code),
        Some(IssueCode::GroupQuestionsRequired)
    );
    assert!(group.title.is_none());
    assert!(report.survey_errors.content.is_none());
}

#[test]
fn empty_survey_needs_content() {
    let report = validate(&snapshot(json!({ "title": "Visit" })), &Catalog::english());
    assert_eq!(
        report.survey_errors.content.as_ref().map(|issue| issue.code),
        Some(IssueCode::SurveyContentRequired)
    );
    assert!(report.question_errors.is_empty());
    assert!(report.group_errors.is_empty());
}

#[test]
fn nested_questions_use_group_scoped_keys() {
    let mut survey = Survey::new("Visit");
    survey
        .add_question(Scope::Root, QuestionDraft::new("Name", AnswerType::Text))
        .expect("add");
    survey.add_group(GroupDraft::new("Contact").with_question(QuestionDraft::new(
        "Email",
        AnswerType::Text,
    )));
    survey.add_group(
        GroupDraft::new("Service")
            .with_question(QuestionDraft::new("Staff", AnswerType::Rating))
            .with_question(QuestionDraft::new("", AnswerType::MultipleChoice)),
    );

    let report = validate(&survey.to_snapshot(), &Catalog::english());
    let keys: Vec<_> = report.question_errors.keys().cloned().collect();
    assert_eq!(keys, vec!["group_1_question_1".to_string()]);

    let issues = &report.question_errors["group_1_question_1"];
    assert_eq!(
        issues.text.as_ref().map(|issue| issue.code),
        Some(IssueCode::QuestionTextRequired)
    );
    assert_eq!(
        issues.options.as_ref().map(|issue| issue.code),
        Some(IssueCode::OptionsRequired)
    );
}

#[test]
fn maps_are_reported_independently() {
    let report = validate(
        &snapshot(json!({
            "title": " ",
            "questions": [{ "text": "", "answerType": "text", "order": 1 }],
            "groups": [{ "title": "", "questions": [], "order": 2 }]
        })),
        &Catalog::english(),
    );
    assert!(report.question_errors.contains_key("question_0"));
    assert!(report.group_errors.contains_key("group_0"));
    assert_eq!(
        report.survey_errors.title.as_ref().map(|issue| issue.code),
        Some(IssueCode::SurveyTitleRequired)
    );
    assert!(report.survey_errors.content.is_none());
    assert_eq!(report.issues().len(), 4);
}

#[test]
fn nested_keys_follow_host_array_positions() {
    let snapshot = snapshot(json!({
        "title": "Visit",
        "groups": [{
            "title": "Service",
            "order": 1,
            "questions": [
                { "text": "", "order": 2 },
                { "text": "Wait time", "order": 1 }
            ]
        }]
    }));
    let nested: Vec<_> = snapshot.groups[0]
        .questions
        .iter()
        .map(|question| (question.text.as_str(), question.order))
        .collect();
    assert_eq!(nested, vec![("", 2), ("Wait time", 1)]);

    let report = validate(&snapshot, &Catalog::english());
    let keys: Vec<_> = report.question_errors.keys().cloned().collect();
    assert_eq!(keys, vec!["group_0_question_0".to_string()]);
}

#[test]
fn clean_survey_does_not_block() {
    let survey = Survey::from_snapshot(
        serde_json::from_str(include_str!("fixtures/feedback_survey.json")).expect("fixture"),
    );
    let report = validate(&survey.to_snapshot(), &Catalog::english());
    assert!(!report.is_blocking(), "{report:?}");
}

#[test]
fn messages_follow_catalog_locale() {
    let report = validate(&snapshot(json!({ "title": "" })), &Catalog::for_locale("mn"));
    let content = report.survey_errors.content.expect("content issue");
    assert_eq!(content.message, "Дор хаяж нэг асуулт эсвэл бүлэг нэмнэ үү");
    assert_eq!(content.code, IssueCode::SurveyContentRequired);
}

#[test]
fn report_shape_is_stable() {
    let report = validate(
        &snapshot(json!({
            "title": "Visit",
            "questions": [{ "text": "", "answerType": "single_choice", "options": ["a", ""], "order": 1 }],
            "groups": [{ "title": "", "questions": [], "order": 2 }]
        })),
        &Catalog::english(),
    );
    insta::assert_json_snapshot!(report, @r#"
    {
      "question_errors": {
        "question_0": {
          "text": {
            "code": "question_text_required",
            "message": "Question text is required"
          },
          "options": {
            "code": "option_blank",
            "message": "Options cannot be empty"
          }
        }
      },
      "group_errors": {
        "group_0": {
          "title": {
            "code": "group_title_required",
            "message": "Group title is required"
          },
          "questions": {
            "code": "group_questions_required",
            "message": "A group needs at least one question"
          }
        }
      }
    }
    "#);
}
