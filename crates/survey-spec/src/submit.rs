use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::i18n::Catalog;
use crate::spec::SurveySnapshot;
use crate::survey::Survey;
use crate::validate::{ValidationReport, validate};

/// When inline validation errors become visible to the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InlineValidation {
    /// Stay quiet during initial entry; show errors once a submit was tried.
    #[default]
    AfterFirstSubmit,
    /// Show errors from the first edit on.
    Always,
}

/// Tracks submit attempts and decides whether errors are shown inline.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    policy: InlineValidation,
    attempted: bool,
}

impl SubmitGate {
    pub fn new(policy: InlineValidation) -> Self {
        Self {
            policy,
            attempted: false,
        }
    }

    pub fn policy(&self) -> InlineValidation {
        self.policy
    }

    pub fn attempted(&self) -> bool {
        self.attempted
    }

    /// Errors to render next to fields, or `None` while the gate is closed or
    /// nothing is wrong.
    pub fn inline_errors(&self, survey: &Survey, catalog: &Catalog) -> Option<ValidationReport> {
        let open = self.attempted || self.policy == InlineValidation::Always;
        if !open {
            return None;
        }
        let report = validate(&survey.to_snapshot(), catalog);
        report.is_blocking().then_some(report)
    }

    /// Records a submit attempt. Yields the snapshot to send when nothing
    /// blocks, otherwise the report.
    pub fn attempt(
        &mut self,
        survey: &Survey,
        catalog: &Catalog,
    ) -> Result<SurveySnapshot, ValidationReport> {
        self.attempted = true;
        let snapshot = survey.to_snapshot();
        let report = validate(&snapshot, catalog);
        if report.is_blocking() {
            debug!(issues = report.issues().len(), "submit blocked");
            return Err(report);
        }
        Ok(snapshot)
    }
}
