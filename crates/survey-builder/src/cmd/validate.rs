use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use survey_spec::{SubmitGate, ValidationReport};

use crate::cmd::Context;
use crate::document;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Survey snapshot to check
    #[arg(value_name = "survey.json")]
    pub survey: PathBuf,
    /// Print the error maps as JSON
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

/// Runs a submit attempt. Exits non-zero while anything blocks submission.
pub fn run(args: &ValidateArgs, ctx: &Context) -> Result<()> {
    let survey = document::load(&args.survey)?;
    let mut gate = SubmitGate::new(ctx.config.inline_validation);
    let report = match gate.attempt(&survey, &ctx.catalog) {
        Ok(_) => ValidationReport::default(),
        Err(report) => report,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !report.is_blocking() {
        println!("{}", ctx.catalog.message("submit.ready"));
    } else {
        for (key, issue) in report.issues() {
            println!("{key}: {}", issue.message);
        }
    }

    if report.is_blocking() {
        let count = report.issues().len().to_string();
        bail!(ctx.catalog.format("submit.blocked", &[("count", count.as_str())]));
    }
    Ok(())
}
