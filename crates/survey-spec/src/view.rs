use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::outline::Ordered;
use crate::spec::{EntryId, Group, Question};

/// Origin of a merged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Item,
    Group,
}

/// Borrowed payload of a merged entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryRef<'a> {
    Item(&'a Question),
    Group(&'a Group),
}

impl EntryRef<'_> {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryRef::Item(_) => EntryKind::Item,
            EntryRef::Group(_) => EntryKind::Group,
        }
    }

    pub fn id(&self) -> EntryId {
        match self {
            EntryRef::Item(question) => question.id,
            EntryRef::Group(group) => group.id,
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            EntryRef::Item(question) => question.order(),
            EntryRef::Group(group) => group.order(),
        }
    }
}

/// One row of the merged view. `original_index` is the position inside the
/// origin array (`questions` or `groups`), not inside the merged view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEntry<'a> {
    pub kind: EntryKind,
    pub payload: EntryRef<'a>,
    pub original_index: usize,
}

/// Interleaves standalone questions and groups into one sequence sorted by
/// `order`. The sort is stable; ties are a caller bug and their relative
/// placement is unspecified.
pub fn merged_view<'a>(questions: &'a [Question], groups: &'a [Group]) -> Vec<MergedEntry<'a>> {
    let mut entries: Vec<MergedEntry<'a>> = questions
        .iter()
        .enumerate()
        .map(|(original_index, question)| MergedEntry {
            kind: EntryKind::Item,
            payload: EntryRef::Item(question),
            original_index,
        })
        .chain(
            groups
                .iter()
                .enumerate()
                .map(|(original_index, group)| MergedEntry {
                    kind: EntryKind::Group,
                    payload: EntryRef::Group(group),
                    original_index,
                }),
        )
        .collect();
    entries.sort_by_key(|entry| entry.payload.order());
    entries
}

/// Order values that appear more than once in a merged view.
pub fn detect_order_conflicts(entries: &[MergedEntry<'_>]) -> Vec<u32> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.payload.order()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(order, _)| order)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{AnswerType, GroupDraft, QuestionDraft};

    fn question(order: u32) -> Question {
        let mut question = Question::from_draft(QuestionDraft::new(
            format!("q{order}"),
            AnswerType::Text,
        ));
        question.order = order;
        question
    }

    fn group(order: u32) -> Group {
        let mut group = Group::from_draft(GroupDraft::new(format!("g{order}")));
        group.order = order;
        group
    }

    #[test]
    fn empty_inputs_give_empty_view() {
        assert!(merged_view(&[], &[]).is_empty());
    }

    #[test]
    fn interleaves_by_order_and_keeps_origin_index() {
        let questions = vec![question(3), question(1)];
        let groups = vec![group(2), group(4)];
        let view = merged_view(&questions, &groups);

        let layout: Vec<_> = view
            .iter()
            .map(|entry| (entry.kind, entry.original_index, entry.payload.order()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (EntryKind::Item, 1, 1),
                (EntryKind::Group, 0, 2),
                (EntryKind::Item, 0, 3),
                (EntryKind::Group, 1, 4),
            ]
        );
    }

    #[test]
    fn reports_duplicate_orders() {
        let questions = vec![question(1), question(2)];
        let groups = vec![group(2)];
        let view = merged_view(&questions, &groups);
        assert_eq!(detect_order_conflicts(&view), vec![2]);
    }
}
