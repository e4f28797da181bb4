use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::cmd::{
    self, Context,
    edit::{AddGroupArgs, AddQuestionArgs, EditArgs, RemoveArgs},
    normalize::NormalizeArgs,
    schema::SchemaArgs,
    validate::ValidateArgs,
    view::ViewArgs,
};
use crate::config::BuilderConfig;
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "survey-builder",
    about = "Author survey definitions made of questions and question groups",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long = "locale", value_name = "LOCALE", global = true)]
    locale: Option<String>,

    /// Config file to use instead of the per-user one
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity; RUST_LOG overrides it
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the survey outline in display order
    View(ViewArgs),
    /// Apply one JSON edit operation
    Edit(EditArgs),
    /// Append a question at the top level or inside a group
    AddQuestion(AddQuestionArgs),
    /// Append a question group
    AddGroup(AddGroupArgs),
    /// Remove a question or group by id or position
    Remove(RemoveArgs),
    /// Check the survey the way a submit would
    Validate(ValidateArgs),
    /// Fill in ids and renumber every order sequence
    Normalize(NormalizeArgs),
    /// Print a JSON schema
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = BuilderConfig::load(cli.config.as_deref())?;
    let locale = cmd::i18n::select_locale(cli.locale.as_deref(), config.locale.as_deref());
    debug!(%locale, "selected locale");
    let catalog = config.catalog(&locale)?;
    let ctx = Context::new(config, catalog);

    match cli.command {
        Commands::View(args) => cmd::view::run(&args, &ctx),
        Commands::Edit(args) => cmd::edit::run(&args, &ctx),
        Commands::AddQuestion(args) => cmd::edit::add_question(&args, &ctx),
        Commands::AddGroup(args) => cmd::edit::add_group(&args, &ctx),
        Commands::Remove(args) => cmd::edit::remove(&args, &ctx),
        Commands::Validate(args) => cmd::validate::run(&args, &ctx),
        Commands::Normalize(args) => cmd::normalize::run(&args, &ctx),
        Commands::Schema(args) => cmd::schema::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_spec::AnswerType;

    #[test]
    fn parses_add_question_subcommand() {
        let cli = Cli::try_parse_from([
            "survey-builder",
            "--locale",
            "mn",
            "add-question",
            "survey.json",
            "--text",
            "Favourite colour?",
            "--answer-type",
            "single-choice",
            "--option",
            "Red",
            "--option",
            "Blue",
            "--required",
        ])
        .expect("expected CLI to parse");
        assert_eq!(cli.locale.as_deref(), Some("mn"));
        match cli.command {
            Commands::AddQuestion(args) => {
                assert_eq!(args.target.survey, PathBuf::from("survey.json"));
                assert_eq!(args.answer_type, AnswerType::SingleChoice);
                assert_eq!(args.options, vec!["Red", "Blue"]);
                assert!(args.required);
                assert!(args.group.is_none());
            }
            _ => panic!("expected add-question args"),
        }
    }

    #[test]
    fn remove_requires_id_or_position() {
        let err = Cli::try_parse_from(["survey-builder", "remove", "survey.json"])
            .expect_err("missing selector");
        assert!(err.to_string().contains("--id"));
    }

    #[test]
    fn remove_position_is_one_based() {
        assert!(
            Cli::try_parse_from(["survey-builder", "remove", "s.json", "--position", "0"]).is_err()
        );
        let cli = Cli::try_parse_from(["survey-builder", "remove", "s.json", "--position", "2"])
            .expect("expected CLI to parse");
        match cli.command {
            Commands::Remove(args) => assert_eq!(args.position.map(|p| p.get()), Some(2)),
            _ => panic!("expected remove args"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "survey-builder",
            "validate",
            "survey.json",
            "-vv",
            "--config",
            "custom.toml",
        ])
        .expect("expected CLI to parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn bad_answer_type_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "survey-builder",
                "add-question",
                "s.json",
                "--text",
                "Q",
                "--answer-type",
                "slider",
            ])
            .is_err()
        );
    }
}
