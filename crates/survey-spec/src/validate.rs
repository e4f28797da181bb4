use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::i18n::Catalog;
use crate::spec::{Question, SurveySnapshot};

/// Stable identifier for each validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    QuestionTextRequired,
    OptionsRequired,
    OptionBlank,
    GroupTitleRequired,
    GroupQuestionsRequired,
    SurveyTitleRequired,
    SurveyContentRequired,
}

impl IssueCode {
    pub fn message_key(self) -> &'static str {
        match self {
            IssueCode::QuestionTextRequired => "validation.question.text_required",
            IssueCode::OptionsRequired => "validation.question.options_required",
            IssueCode::OptionBlank => "validation.question.option_blank",
            IssueCode::GroupTitleRequired => "validation.group.title_required",
            IssueCode::GroupQuestionsRequired => "validation.group.questions_required",
            IssueCode::SurveyTitleRequired => "validation.survey.title_required",
            IssueCode::SurveyContentRequired => "validation.survey.content_required",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    fn new(code: IssueCode, catalog: &Catalog) -> Self {
        Self {
            code,
            message: catalog.message(code.message_key()),
        }
    }
}

/// Field-level problems for one question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct QuestionIssues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Issue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Issue>,
}

impl QuestionIssues {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.options.is_none()
    }
}

/// Group-level problems.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GroupIssues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Issue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Issue>,
}

impl GroupIssues {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.questions.is_none()
    }
}

/// Survey-wide problems.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SurveyIssues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Issue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Issue>,
}

impl SurveyIssues {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// The three independent error maps produced on submit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub question_errors: BTreeMap<String, QuestionIssues>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub group_errors: BTreeMap<String, GroupIssues>,
    #[serde(default, skip_serializing_if = "SurveyIssues::is_empty")]
    pub survey_errors: SurveyIssues,
}

impl ValidationReport {
    /// Any problem at all blocks submission.
    pub fn is_blocking(&self) -> bool {
        !self.question_errors.is_empty()
            || !self.group_errors.is_empty()
            || !self.survey_errors.is_empty()
    }

    /// Every issue with the key it is filed under.
    pub fn issues(&self) -> Vec<(String, &Issue)> {
        let mut out = Vec::new();
        if let Some(issue) = &self.survey_errors.title {
            out.push(("survey.title".to_string(), issue));
        }
        if let Some(issue) = &self.survey_errors.content {
            out.push(("survey.content".to_string(), issue));
        }
        for (key, issues) in &self.group_errors {
            if let Some(issue) = &issues.title {
                out.push((format!("{key}.title"), issue));
            }
            if let Some(issue) = &issues.questions {
                out.push((format!("{key}.questions"), issue));
            }
        }
        for (key, issues) in &self.question_errors {
            if let Some(issue) = &issues.text {
                out.push((format!("{key}.text"), issue));
            }
            if let Some(issue) = &issues.options {
                out.push((format!("{key}.options"), issue));
            }
        }
        out
    }
}

pub fn question_key(index: usize) -> String {
    format!("question_{index}")
}

pub fn group_key(group_index: usize) -> String {
    format!("group_{group_index}")
}

pub fn nested_question_key(group_index: usize, question_index: usize) -> String {
    format!("group_{group_index}_question_{question_index}")
}

/// Walks every question and group of `snapshot`. Keys use positions in the
/// snapshot's origin arrays.
pub fn validate(snapshot: &SurveySnapshot, catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (index, question) in snapshot.questions.iter().enumerate() {
        let issues = validate_question(question, catalog);
        if !issues.is_empty() {
            report.question_errors.insert(question_key(index), issues);
        }
    }

    for (group_index, group) in snapshot.groups.iter().enumerate() {
        for (question_index, question) in group.questions.iter().enumerate() {
            let issues = validate_question(question, catalog);
            if !issues.is_empty() {
                report
                    .question_errors
                    .insert(nested_question_key(group_index, question_index), issues);
            }
        }

        let mut issues = GroupIssues::default();
        if is_blank(&group.title) {
            issues.title = Some(Issue::new(IssueCode::GroupTitleRequired, catalog));
        }
        if group.questions.is_empty() {
            issues.questions = Some(Issue::new(IssueCode::GroupQuestionsRequired, catalog));
        }
        if !issues.is_empty() {
            report.group_errors.insert(group_key(group_index), issues);
        }
    }

    if is_blank(&snapshot.title) {
        report.survey_errors.title = Some(Issue::new(IssueCode::SurveyTitleRequired, catalog));
    }
    if snapshot.is_empty() {
        report.survey_errors.content = Some(Issue::new(IssueCode::SurveyContentRequired, catalog));
    }

    report
}

fn validate_question(question: &Question, catalog: &Catalog) -> QuestionIssues {
    let mut issues = QuestionIssues::default();
    if is_blank(&question.text) {
        issues.text = Some(Issue::new(IssueCode::QuestionTextRequired, catalog));
    }
    if question.answer_type.is_choice() {
        let options = question.options.as_deref().unwrap_or_default();
        if options.is_empty() {
            issues.options = Some(Issue::new(IssueCode::OptionsRequired, catalog));
        } else if options.iter().any(|option| is_blank(option)) {
            issues.options = Some(Issue::new(IssueCode::OptionBlank, catalog));
        }
    }
    issues
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
