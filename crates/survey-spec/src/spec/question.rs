use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::outline::Ordered;
use crate::spec::id::EntryId;

/// Supported answer widgets for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    #[default]
    Text,
    Textarea,
    SingleChoice,
    MultipleChoice,
    Rating,
    Date,
}

impl AnswerType {
    pub const ALL: [AnswerType; 6] = [
        AnswerType::Text,
        AnswerType::Textarea,
        AnswerType::SingleChoice,
        AnswerType::MultipleChoice,
        AnswerType::Rating,
        AnswerType::Date,
    ];

    /// Choice answers must carry a non-empty option list.
    pub fn is_choice(self) -> bool {
        matches!(self, AnswerType::SingleChoice | AnswerType::MultipleChoice)
    }

    /// Wire name, as used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerType::Text => "text",
            AnswerType::Textarea => "textarea",
            AnswerType::SingleChoice => "single_choice",
            AnswerType::MultipleChoice => "multiple_choice",
            AnswerType::Rating => "rating",
            AnswerType::Date => "date",
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerType {
    type Err = String;

    /// Accepts the wire name; dashes are read as underscores.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase().replace('-', "_");
        AnswerType::ALL
            .into_iter()
            .find(|answer_type| answer_type.as_str() == wanted)
            .ok_or_else(|| format!("unknown answer type '{raw}'"))
    }
}

/// A single question, either standalone or nested inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub answer_type: AnswerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_required: bool,
}

impl Question {
    /// Builds a question from editor input. The order is assigned by the owning list.
    pub fn from_draft(draft: QuestionDraft) -> Self {
        let mut question = Self {
            id: EntryId::generate(),
            text: draft.text,
            description: non_blank(draft.description),
            answer_type: draft.answer_type,
            options: draft.options,
            order: 0,
            is_required: draft.is_required,
        };
        question.normalize_options();
        question
    }

    /// Merges a partial update. `order` is never touched.
    pub fn apply_patch(&mut self, patch: QuestionPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(description) = patch.description {
            self.description = non_blank(Some(description));
        }
        if let Some(options) = patch.options {
            self.options = Some(options);
        }
        if let Some(answer_type) = patch.answer_type {
            self.answer_type = answer_type;
        }
        if let Some(is_required) = patch.is_required {
            self.is_required = is_required;
        }
        self.normalize_options();
    }

    fn normalize_options(&mut self) {
        if self.answer_type.is_choice() {
            self.options.get_or_insert_with(Vec::new);
        } else {
            self.options = None;
        }
    }
}

impl Ordered for Question {
    fn id(&self) -> EntryId {
        self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Editor input for a new question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub answer_type: AnswerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub is_required: bool,
}

impl QuestionDraft {
    pub fn new(text: impl Into<String>, answer_type: AnswerType) -> Self {
        Self {
            text: text.into(),
            answer_type,
            ..Self::default()
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// Partial update for a question. `None` keeps the current value; an empty
/// `description` clears it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_type: Option<AnswerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
