use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::cmd::Context;
use crate::document;

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Survey snapshot to renumber
    #[arg(value_name = "survey.json")]
    pub survey: PathBuf,
    /// Write the result here instead of replacing the input
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Rewrites a snapshot with ids filled in and every order sequence dense.
pub fn run(args: &NormalizeArgs, ctx: &Context) -> Result<()> {
    let survey = document::load(&args.survey)?;
    let destination = args.out.as_ref().unwrap_or(&args.survey);
    document::save(destination, &survey.to_snapshot(), ctx.config.pretty)?;
    info!(path = %destination.display(), entries = survey.len(), "survey normalized");
    Ok(())
}
