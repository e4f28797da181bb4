use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use survey_spec::{Catalog, EntryRef, Group, Question, Survey};

use crate::cmd::Context;
use crate::document;

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Survey snapshot to show
    #[arg(value_name = "survey.json")]
    pub survey: PathBuf,
    /// Print the merged view as JSON
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ViewArgs, ctx: &Context) -> Result<()> {
    let survey = document::load(&args.survey)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&survey.merged())?);
    } else {
        print!("{}", render(&survey, &ctx.catalog));
    }
    Ok(())
}

/// Numbered outline of the survey, groups expanded in place.
pub fn render(survey: &Survey, catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", survey.title);
    if let Some(description) = &survey.description {
        let _ = writeln!(out, "{description}");
    }
    out.push('\n');
    if survey.is_empty() {
        let _ = writeln!(out, "{}", catalog.message("view.empty"));
        return out;
    }
    for entry in survey.merged() {
        match entry.payload {
            EntryRef::Item(question) => {
                render_question(&mut out, catalog, question, "");
            }
            EntryRef::Group(group) => render_group(&mut out, catalog, group),
        }
    }
    out
}

fn render_group(out: &mut String, catalog: &Catalog, group: &Group) {
    let _ = writeln!(
        out,
        "{}. [{}] {}  <{}>",
        group.order,
        catalog.message("view.group"),
        group.title,
        group.id
    );
    if let Some(description) = &group.description {
        let _ = writeln!(out, "     {description}");
    }
    for question in &group.questions {
        render_question(out, catalog, question, "   ");
    }
}

fn render_question(out: &mut String, catalog: &Catalog, question: &Question, indent: &str) {
    let mut traits = vec![question.answer_type.to_string()];
    if question.is_required {
        traits.push(catalog.message("view.required"));
    }
    let _ = writeln!(
        out,
        "{indent}{}. [{}] {} ({})  <{}>",
        question.order,
        catalog.message("view.question"),
        question.text,
        traits.join(", "),
        question.id
    );
    if let Some(options) = &question.options {
        let _ = writeln!(
            out,
            "{indent}     {}: {}",
            catalog.message("view.options"),
            options.join(", ")
        );
    }
}
