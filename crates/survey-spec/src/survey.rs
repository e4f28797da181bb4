use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::outline::{Ordered, OrderedList};
use crate::spec::question::non_blank;
use crate::spec::{
    EntryId, Group, GroupDraft, GroupPatch, Question, QuestionDraft, QuestionPatch,
    SurveySnapshot,
};
use crate::view::{EntryKind, EntryRef, MergedEntry, detect_order_conflicts, merged_view};

/// A top-level survey entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Question(Question),
    Group(Group),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Question(_) => EntryKind::Item,
            Entry::Group(_) => EntryKind::Group,
        }
    }

    pub fn as_entry_ref(&self) -> EntryRef<'_> {
        match self {
            Entry::Question(question) => EntryRef::Item(question),
            Entry::Group(group) => EntryRef::Group(group),
        }
    }
}

impl Ordered for Entry {
    fn id(&self) -> EntryId {
        match self {
            Entry::Question(question) => question.id,
            Entry::Group(group) => group.id,
        }
    }

    fn order(&self) -> u32 {
        match self {
            Entry::Question(question) => question.order,
            Entry::Group(group) => group.order,
        }
    }

    fn set_order(&mut self, order: u32) {
        match self {
            Entry::Question(question) => question.order = order,
            Entry::Group(group) => group.order = order,
        }
    }
}

/// Where an operation applies: the top-level sequence or one group's questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Root,
    Group(EntryId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Root => f.write_str("top level"),
            Scope::Group(id) => write!(f, "group {id}"),
        }
    }
}

/// What a removal took out of the survey.
#[derive(Debug, Clone, PartialEq)]
pub enum Removed {
    Question(Question),
    Group(Group),
}

impl Removed {
    pub fn id(&self) -> EntryId {
        match self {
            Removed::Question(question) => question.id,
            Removed::Group(group) => group.id,
        }
    }
}

impl From<Entry> for Removed {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Question(question) => Removed::Question(question),
            Entry::Group(group) => Removed::Group(group),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("no entry '{id}' in {scope}")]
    UnknownEntry { scope: Scope, id: EntryId },
    #[error("no group '{id}'")]
    UnknownGroup { id: EntryId },
    #[error("entry '{id}' is a question, not a group")]
    NotAGroup { id: EntryId },
    #[error("entry '{id}' is a group, not a question")]
    NotAQuestion { id: EntryId },
    #[error("position {position} is out of range for {scope} ({len} entries)")]
    PositionOutOfRange {
        scope: Scope,
        position: usize,
        len: usize,
    },
}

/// Editing model for a survey: one ordered sequence of questions and groups.
///
/// Converts to and from [`SurveySnapshot`], the two-array shape hosts store.
/// Every mutation leaves each scope densely ranked `1..=N`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SurveySnapshot", into = "SurveySnapshot")]
pub struct Survey {
    pub title: String,
    pub description: Option<String>,
    entries: OrderedList<Entry>,
}

impl Survey {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Ingests a host snapshot: every scope is sorted by `order` with gaps
    /// closed, and any id seen earlier in the snapshot is replaced.
    pub fn from_snapshot(snapshot: SurveySnapshot) -> Self {
        let conflicts =
            detect_order_conflicts(&merged_view(&snapshot.questions, &snapshot.groups));
        if !conflicts.is_empty() {
            warn!(?conflicts, "snapshot has duplicate order values; renumbering");
        }

        let mut seen = HashSet::new();
        let mut questions = snapshot.questions;
        for question in &mut questions {
            claim_id(&mut seen, &mut question.id);
        }
        let mut groups = snapshot.groups;
        for group in &mut groups {
            claim_id(&mut seen, &mut group.id);
            for question in group.questions.iter_mut() {
                claim_id(&mut seen, &mut question.id);
            }
            group.questions.normalize();
        }

        let entries = questions
            .into_iter()
            .map(Entry::Question)
            .chain(groups.into_iter().map(Entry::Group))
            .collect();
        Self {
            title: snapshot.title,
            description: snapshot.description,
            entries: OrderedList::from_unordered(entries),
        }
    }

    /// Full replacement snapshot; both arrays come out in rank order.
    pub fn to_snapshot(&self) -> SurveySnapshot {
        let mut questions = Vec::new();
        let mut groups = Vec::new();
        for entry in &self.entries {
            match entry {
                Entry::Question(question) => questions.push(question.clone()),
                Entry::Group(group) => groups.push(group.clone()),
            }
        }
        SurveySnapshot {
            title: self.title.clone(),
            description: self.description.clone(),
            questions,
            groups,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        self.entries.as_slice()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merged view with origin indices matching [`Survey::to_snapshot`].
    pub fn merged(&self) -> Vec<MergedEntry<'_>> {
        let mut next_question = 0;
        let mut next_group = 0;
        self.entries
            .iter()
            .map(|entry| {
                let counter = match entry {
                    Entry::Question(_) => &mut next_question,
                    Entry::Group(_) => &mut next_group,
                };
                let original_index = *counter;
                *counter += 1;
                MergedEntry {
                    kind: entry.kind(),
                    payload: entry.as_entry_ref(),
                    original_index,
                }
            })
            .collect()
    }

    pub fn group(&self, id: EntryId) -> Option<&Group> {
        match self.entries.find(id) {
            Some(Entry::Group(group)) => Some(group),
            _ => None,
        }
    }

    pub fn question(&self, scope: Scope, id: EntryId) -> Option<&Question> {
        match scope {
            Scope::Root => match self.entries.find(id) {
                Some(Entry::Question(question)) => Some(question),
                _ => None,
            },
            Scope::Group(group_id) => self.group(group_id)?.questions.find(id),
        }
    }

    pub fn set_details(&mut self, title: Option<String>, description: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = non_blank(Some(description));
        }
    }

    /// Appends a question to the end of `scope`.
    pub fn add_question(
        &mut self,
        scope: Scope,
        draft: QuestionDraft,
    ) -> Result<EntryId, OutlineError> {
        let question = Question::from_draft(draft);
        let id = question.id;
        let order = match scope {
            Scope::Root => self.entries.push(Entry::Question(question)),
            Scope::Group(group_id) => self.group_mut(group_id)?.questions.push(question),
        };
        debug!(%scope, %id, order, "added question");
        Ok(id)
    }

    /// Appends a group to the end of the top-level sequence.
    pub fn add_group(&mut self, draft: GroupDraft) -> EntryId {
        let group = Group::from_draft(draft);
        let id = group.id;
        let order = self.entries.push(Entry::Group(group));
        debug!(%id, order, "added group");
        id
    }

    pub fn update_question(
        &mut self,
        scope: Scope,
        id: EntryId,
        patch: QuestionPatch,
    ) -> Result<(), OutlineError> {
        let question = match scope {
            Scope::Root => match self.entries.find_mut(id) {
                Some(Entry::Question(question)) => question,
                Some(Entry::Group(_)) => return Err(OutlineError::NotAQuestion { id }),
                None => return Err(OutlineError::UnknownEntry { scope, id }),
            },
            Scope::Group(group_id) => self
                .group_mut(group_id)?
                .questions
                .find_mut(id)
                .ok_or(OutlineError::UnknownEntry { scope, id })?,
        };
        question.apply_patch(patch);
        debug!(%scope, %id, "updated question");
        Ok(())
    }

    pub fn update_group(&mut self, id: EntryId, patch: GroupPatch) -> Result<(), OutlineError> {
        self.group_mut(id)?.apply_patch(patch);
        debug!(%id, "updated group");
        Ok(())
    }

    /// Removes the entry keyed by `id` from `scope` and renumbers that scope.
    pub fn remove(&mut self, scope: Scope, id: EntryId) -> Result<Removed, OutlineError> {
        let removed = match scope {
            Scope::Root => self.entries.remove(id).map(Removed::from),
            Scope::Group(group_id) => self
                .group_mut(group_id)?
                .questions
                .remove(id)
                .map(Removed::Question),
        }
        .ok_or(OutlineError::UnknownEntry { scope, id })?;
        debug!(%scope, %id, remaining = self.scope_len(scope), "removed entry");
        Ok(removed)
    }

    /// Removes the entry at a 0-based position of the rendered sequence for
    /// `scope` and renumbers that scope.
    pub fn remove_at(&mut self, scope: Scope, position: usize) -> Result<Removed, OutlineError> {
        let len = self.scope_len(scope);
        let removed = match scope {
            Scope::Root => self.entries.remove_at(position).map(Removed::from),
            Scope::Group(group_id) => self
                .group_mut(group_id)?
                .questions
                .remove_at(position)
                .map(Removed::Question),
        }
        .ok_or(OutlineError::PositionOutOfRange {
            scope,
            position,
            len,
        })?;
        debug!(%scope, position, id = %removed.id(), "removed entry at position");
        Ok(removed)
    }

    fn scope_len(&self, scope: Scope) -> usize {
        match scope {
            Scope::Root => self.entries.len(),
            Scope::Group(group_id) => self
                .group(group_id)
                .map_or(0, |group| group.questions.len()),
        }
    }

    fn group_mut(&mut self, id: EntryId) -> Result<&mut Group, OutlineError> {
        match self.entries.find_mut(id) {
            Some(Entry::Group(group)) => Ok(group),
            Some(Entry::Question(_)) => Err(OutlineError::NotAGroup { id }),
            None => Err(OutlineError::UnknownGroup { id }),
        }
    }
}

/// Keeps ids unique across the whole survey so every entry stays addressable.
fn claim_id(seen: &mut HashSet<EntryId>, id: &mut EntryId) {
    if seen.insert(*id) {
        return;
    }
    let fresh = EntryId::generate();
    warn!(duplicate = %id, %fresh, "duplicate id in snapshot; assigned a fresh one");
    seen.insert(fresh);
    *id = fresh;
}

impl From<SurveySnapshot> for Survey {
    fn from(snapshot: SurveySnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

impl From<Survey> for SurveySnapshot {
    fn from(survey: Survey) -> Self {
        survey.to_snapshot()
    }
}
