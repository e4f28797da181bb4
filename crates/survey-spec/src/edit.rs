use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::{EntryId, GroupDraft, GroupPatch, QuestionDraft, QuestionPatch, SurveySnapshot};
use crate::survey::{OutlineError, Removed, Scope, Survey};

/// A single user action against a survey, as a host would ship it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    UpdateDetails {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    AddQuestion {
        #[serde(default)]
        scope: Scope,
        question: QuestionDraft,
    },
    AddGroup {
        group: GroupDraft,
    },
    UpdateQuestion {
        #[serde(default)]
        scope: Scope,
        id: EntryId,
        patch: QuestionPatch,
    },
    UpdateGroup {
        id: EntryId,
        patch: GroupPatch,
    },
    Remove {
        #[serde(default)]
        scope: Scope,
        id: EntryId,
    },
    RemoveAt {
        #[serde(default)]
        scope: Scope,
        position: usize,
    },
}

/// Outcome of a successfully applied [`Edit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Added(EntryId),
    Updated,
    Removed(Removed),
}

impl Survey {
    pub fn apply(&mut self, edit: Edit) -> Result<Applied, OutlineError> {
        match edit {
            Edit::UpdateDetails { title, description } => {
                self.set_details(title, description);
                Ok(Applied::Updated)
            }
            Edit::AddQuestion { scope, question } => {
                self.add_question(scope, question).map(Applied::Added)
            }
            Edit::AddGroup { group } => Ok(Applied::Added(self.add_group(group))),
            Edit::UpdateQuestion { scope, id, patch } => self
                .update_question(scope, id, patch)
                .map(|_| Applied::Updated),
            Edit::UpdateGroup { id, patch } => {
                self.update_group(id, patch).map(|_| Applied::Updated)
            }
            Edit::Remove { scope, id } => self.remove(scope, id).map(Applied::Removed),
            Edit::RemoveAt { scope, position } => {
                self.remove_at(scope, position).map(Applied::Removed)
            }
        }
    }
}

/// Receives the full replacement snapshot after every successful edit.
pub trait SnapshotSink {
    fn replace(&mut self, snapshot: SurveySnapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(SurveySnapshot),
{
    fn replace(&mut self, snapshot: SurveySnapshot) {
        self(snapshot)
    }
}

/// Binds a survey to the host setter that stores its snapshots.
pub struct SurveyEditor<S> {
    survey: Survey,
    sink: S,
}

impl<S: SnapshotSink> SurveyEditor<S> {
    pub fn new(survey: Survey, sink: S) -> Self {
        Self { survey, sink }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Applies `edit` and publishes the resulting snapshot. A failed edit
    /// leaves the survey as it was and publishes nothing.
    pub fn apply(&mut self, edit: Edit) -> Result<Applied, OutlineError> {
        let applied = self.survey.apply(edit)?;
        self.sink.replace(self.survey.to_snapshot());
        Ok(applied)
    }

    pub fn into_parts(self) -> (Survey, S) {
        (self.survey, self.sink)
    }
}
