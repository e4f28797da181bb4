use proptest::prelude::*;
use proptest::sample::Index;

use survey_spec::{
    AnswerType, EntryId, GroupDraft, Ordered, Question, QuestionDraft, Scope, Survey,
    SurveySnapshot, merged_view,
};

#[derive(Debug, Clone)]
enum Seed {
    Question,
    Group(usize),
}

fn seeds() -> impl Strategy<Value = Vec<Seed>> {
    prop::collection::vec(
        prop_oneof![Just(Seed::Question), (0usize..4).prop_map(Seed::Group)],
        0..12,
    )
}

fn draft(label: String) -> QuestionDraft {
    QuestionDraft::new(label, AnswerType::Text)
}

fn build(seeds: &[Seed]) -> Survey {
    let mut survey = Survey::new("Generated");
    for (idx, seed) in seeds.iter().enumerate() {
        match seed {
            Seed::Question => {
                survey
                    .add_question(Scope::Root, draft(format!("q{idx}")))
                    .expect("root insert");
            }
            Seed::Group(nested) => {
                let mut group = GroupDraft::new(format!("g{idx}"));
                for n in 0..*nested {
                    group = group.with_question(draft(format!("g{idx}.q{n}")));
                }
                survey.add_group(group);
            }
        }
    }
    survey
}

fn rows(snapshot: &SurveySnapshot) -> Vec<(EntryId, u32)> {
    merged_view(&snapshot.questions, &snapshot.groups)
        .iter()
        .map(|entry| (entry.payload.id(), entry.payload.order()))
        .collect()
}

fn dense(len: usize) -> Vec<u32> {
    (1..=len as u32).collect()
}

fn orders(questions: &[Question]) -> Vec<u32> {
    questions.iter().map(Ordered::order).collect()
}

proptest! {
    #[test]
    fn merged_view_is_dense(seeds in seeds()) {
        let snapshot = build(&seeds).to_snapshot();
        let rows = rows(&snapshot);
        prop_assert_eq!(rows.len(), seeds.len());
        let orders: Vec<u32> = rows.iter().map(|(_, order)| *order).collect();
        prop_assert_eq!(orders, dense(seeds.len()));
    }

    #[test]
    fn insertion_appends_without_touching_others(seeds in seeds(), as_group in any::<bool>()) {
        let mut survey = build(&seeds);
        let before = rows(&survey.to_snapshot());

        let id = if as_group {
            survey.add_group(GroupDraft::new("new"))
        } else {
            survey
                .add_question(Scope::Root, draft("new".into()))
                .expect("root insert")
        };

        let after = rows(&survey.to_snapshot());
        prop_assert_eq!(after.last().copied(), Some((id, before.len() as u32 + 1)));
        prop_assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn deletion_keeps_relative_sequence(
        seeds in seeds().prop_filter("needs an entry", |seeds| !seeds.is_empty()),
        pick in any::<Index>(),
    ) {
        let mut survey = build(&seeds);
        let before: Vec<EntryId> = rows(&survey.to_snapshot()).into_iter().map(|(id, _)| id).collect();
        let position = pick.index(before.len());

        let removed = survey.remove_at(Scope::Root, position).expect("position in range");
        prop_assert_eq!(removed.id(), before[position]);

        let after = rows(&survey.to_snapshot());
        let mut expected = before.clone();
        expected.remove(position);
        prop_assert_eq!(after.iter().map(|(id, _)| *id).collect::<Vec<_>>(), expected);
        prop_assert_eq!(after.iter().map(|(_, order)| *order).collect::<Vec<_>>(), dense(before.len() - 1));
    }

    #[test]
    fn nested_deletion_is_local_to_its_group(seeds in seeds(), pick_group in any::<Index>(), pick_question in any::<Index>()) {
        let mut survey = build(&seeds);
        let before = survey.to_snapshot();
        let candidates: Vec<usize> = before
            .groups
            .iter()
            .enumerate()
            .filter(|(_, group)| !group.questions.is_empty())
            .map(|(idx, _)| idx)
            .collect();
        prop_assume!(!candidates.is_empty());

        let group_index = candidates[pick_group.index(candidates.len())];
        let group = &before.groups[group_index];
        let question_index = pick_question.index(group.questions.len());
        let question_id = group.questions.as_slice()[question_index].id;

        survey
            .remove(Scope::Group(group.id), question_id)
            .expect("nested remove");
        let after = survey.to_snapshot();

        prop_assert_eq!(orders(&after.questions), orders(&before.questions));
        for (idx, (old, new)) in before.groups.iter().zip(after.groups.iter()).enumerate() {
            prop_assert_eq!(old.order, new.order);
            if idx == group_index {
                prop_assert_eq!(orders(new.questions.as_slice()), dense(old.questions.len() - 1));
            } else {
                prop_assert_eq!(orders(new.questions.as_slice()), orders(old.questions.as_slice()));
            }
        }
    }

    #[test]
    fn loading_renumbers_arbitrary_orders(raw in prop::collection::vec(1u32..50, 0..10)) {
        let questions: Vec<Question> = raw
            .iter()
            .enumerate()
            .map(|(idx, order)| {
                let mut question = Question::from_draft(draft(format!("q{idx}")));
                question.order = *order;
                question
            })
            .collect();
        let mut expected = questions.clone();
        expected.sort_by_key(|question| question.order);

        let survey = Survey::from_snapshot(SurveySnapshot {
            title: "Loaded".into(),
            questions,
            ..SurveySnapshot::default()
        });
        let loaded = survey.to_snapshot();

        prop_assert_eq!(orders(&loaded.questions), dense(raw.len()));
        let ids: Vec<EntryId> = loaded.questions.iter().map(|question| question.id).collect();
        let expected_ids: Vec<EntryId> = expected.iter().map(|question| question.id).collect();
        prop_assert_eq!(ids, expected_ids);
    }
}
