use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::outline::{Ordered, OrderedList};
use crate::spec::id::EntryId;
use crate::spec::question::{Question, QuestionDraft, non_blank};

/// A titled block of questions. Its own `order` ranks it among top-level
/// entries; its questions are ranked independently inside the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Group {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: OrderedList<Question>,
    #[serde(default)]
    pub order: u32,
}

impl Group {
    pub fn from_draft(draft: GroupDraft) -> Self {
        let mut questions = OrderedList::new();
        for question in draft.questions {
            questions.push(Question::from_draft(question));
        }
        Self {
            id: EntryId::generate(),
            title: draft.title,
            description: non_blank(draft.description),
            questions,
            order: 0,
        }
    }

    pub fn apply_patch(&mut self, patch: GroupPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = non_blank(Some(description));
        }
    }
}

impl Ordered for Group {
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

/// Editor input for a new group, optionally seeded with questions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GroupDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<QuestionDraft>,
}

impl GroupDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_question(mut self, question: QuestionDraft) -> Self {
        self.questions.push(question);
        self
    }
}

/// Partial update for group-level fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
