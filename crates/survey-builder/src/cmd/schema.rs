use anyhow::Result;
use clap::{Args, ValueEnum};
use schemars::schema_for;
use survey_spec::{Edit, SurveySnapshot, ValidationReport};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaTarget {
    /// Survey snapshot exchanged with the host form
    #[default]
    Snapshot,
    /// Edit operations accepted by `edit`
    Edit,
    /// Error maps printed by `validate --json`
    Report,
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value_t = SchemaTarget::Snapshot)]
    pub target: SchemaTarget,
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    println!("{}", render(args.target)?);
    Ok(())
}

pub fn render(target: SchemaTarget) -> Result<String> {
    let schema = match target {
        SchemaTarget::Snapshot => schema_for!(SurveySnapshot),
        SchemaTarget::Edit => schema_for!(Edit),
        SchemaTarget::Report => schema_for!(ValidationReport),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}
