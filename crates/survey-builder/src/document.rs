use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use survey_spec::{Survey, SurveySnapshot};
use tracing::debug;

/// Reads a snapshot file into the editing model.
pub fn load(path: &Path) -> Result<Survey> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read survey {}", path.display()))?;
    let snapshot: SurveySnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("invalid survey JSON in {}", path.display()))?;
    debug!(path = %path.display(), entries = snapshot.len(), "loaded survey");
    Ok(Survey::from_snapshot(snapshot))
}

/// Writes `snapshot` through a sibling temp file so a failed write leaves the
/// previous file intact.
pub fn save(path: &Path, snapshot: &SurveySnapshot, pretty: bool) -> Result<()> {
    let mut body = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    body.push('\n');

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body).with_context(|| format!("failed to write {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("failed to replace {}", path.display()));
    }
    debug!(path = %path.display(), entries = snapshot.len(), "saved survey");
    Ok(())
}
