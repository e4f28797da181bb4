use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{ArgGroup, Args};
use survey_spec::{
    AnswerType, Applied, Edit, EntryId, GroupDraft, QuestionDraft, Scope, SubmitGate,
    SurveyEditor, SurveySnapshot,
};
use tracing::info;

use crate::cmd::Context;
use crate::document;

/// Survey file an edit reads from and where the result goes.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Survey snapshot to edit
    #[arg(value_name = "survey.json")]
    pub survey: PathBuf,
    /// Write the result here instead of replacing the input
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl TargetArgs {
    fn destination(&self) -> &PathBuf {
        self.out.as_ref().unwrap_or(&self.survey)
    }
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["edit", "edit_file"])))]
pub struct EditArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Edit operation as JSON, e.g. {"op":"add_group","group":{"title":"Intro"}}
    #[arg(long = "edit", value_name = "JSON")]
    pub edit: Option<String>,
    /// Read the edit operation from a file
    #[arg(long = "edit-file", value_name = "edit.json")]
    pub edit_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AddQuestionArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long = "text")]
    pub text: String,
    #[arg(long = "answer-type", value_name = "TYPE", default_value_t = AnswerType::Text)]
    pub answer_type: AnswerType,
    /// Choice option; repeat for each option
    #[arg(long = "option", value_name = "LABEL")]
    pub options: Vec<String>,
    #[arg(long = "required", default_value_t = false)]
    pub required: bool,
    #[arg(long = "description")]
    pub description: Option<String>,
    /// Add inside this group instead of at the top level
    #[arg(long = "group", value_name = "GROUP_ID")]
    pub group: Option<EntryId>,
}

#[derive(Args, Debug, Clone)]
pub struct AddGroupArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long = "title")]
    pub title: String,
    #[arg(long = "description")]
    pub description: Option<String>,
    /// Seed a text question inside the group; repeatable
    #[arg(long = "question", value_name = "TEXT")]
    pub questions: Vec<String>,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("which").required(true).args(["id", "position"])))]
pub struct RemoveArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long = "id", value_name = "ENTRY_ID")]
    pub id: Option<EntryId>,
    /// 1-based position as shown by `view`
    #[arg(long = "position", value_name = "N")]
    pub position: Option<NonZeroUsize>,
    /// Remove from this group's questions
    #[arg(long = "group", value_name = "GROUP_ID")]
    pub group: Option<EntryId>,
}

pub fn run(args: &EditArgs, ctx: &Context) -> Result<()> {
    let raw = match (&args.edit, &args.edit_file) {
        (Some(raw), _) => raw.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read edit {}", path.display()))?,
        (None, None) => bail!("pass --edit or --edit-file"),
    };
    let edit: Edit = serde_json::from_str(&raw).context("invalid edit JSON")?;
    apply_to_file(&args.target, edit, ctx)
}

pub fn add_question(args: &AddQuestionArgs, ctx: &Context) -> Result<()> {
    let mut question = QuestionDraft::new(args.text.clone(), args.answer_type);
    if !args.options.is_empty() {
        question = question.with_options(args.options.iter().cloned());
    }
    question.is_required = args.required;
    question.description = args.description.clone();
    let edit = Edit::AddQuestion {
        scope: scope(args.group),
        question,
    };
    apply_to_file(&args.target, edit, ctx)
}

pub fn add_group(args: &AddGroupArgs, ctx: &Context) -> Result<()> {
    let mut group = GroupDraft::new(args.title.clone());
    group.description = args.description.clone();
    for text in &args.questions {
        group = group.with_question(QuestionDraft::new(text.clone(), AnswerType::Text));
    }
    apply_to_file(&args.target, Edit::AddGroup { group }, ctx)
}

pub fn remove(args: &RemoveArgs, ctx: &Context) -> Result<()> {
    let scope = scope(args.group);
    let edit = match (args.id, args.position) {
        (Some(id), _) => Edit::Remove { scope, id },
        (None, Some(position)) => Edit::RemoveAt {
            scope,
            position: position.get() - 1,
        },
        (None, None) => bail!("pass --id or --position"),
    };
    apply_to_file(&args.target, edit, ctx)
}

fn scope(group: Option<EntryId>) -> Scope {
    group.map_or(Scope::Root, Scope::Group)
}

/// Loads the target survey, applies one edit, and writes the published
/// snapshot. Nothing is written when the edit is rejected.
pub fn apply_to_file(target: &TargetArgs, edit: Edit, ctx: &Context) -> Result<()> {
    let survey = document::load(&target.survey)?;
    let mut published: Option<SurveySnapshot> = None;
    let mut editor = SurveyEditor::new(survey, |snapshot: SurveySnapshot| {
        published = Some(snapshot);
    });
    let applied = editor
        .apply(edit)
        .with_context(|| format!("cannot edit {}", target.survey.display()))?;
    let (survey, sink) = editor.into_parts();
    drop(sink);

    if let Some(snapshot) = published {
        document::save(target.destination(), &snapshot, ctx.config.pretty)?;
        info!(path = %target.destination().display(), "survey updated");
    }

    match applied {
        Applied::Added(id) => println!("{id}"),
        Applied::Removed(removed) => println!("{}", removed.id()),
        Applied::Updated => {}
    }

    let gate = SubmitGate::new(ctx.config.inline_validation);
    if let Some(report) = gate.inline_errors(&survey, &ctx.catalog) {
        for (key, issue) in report.issues() {
            eprintln!("{key}: {}", issue.message);
        }
    }
    Ok(())
}
