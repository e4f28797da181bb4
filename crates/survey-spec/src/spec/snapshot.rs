use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::group::Group;
use crate::spec::question::Question;

/// Wire shape exchanged with the host form: standalone questions and groups
/// kept in two arrays that share one `order` sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SurveySnapshot {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl SurveySnapshot {
    /// Total number of top-level entries (standalone questions plus groups).
    pub fn len(&self) -> usize {
        self.questions.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() && self.groups.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
