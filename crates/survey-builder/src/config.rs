use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use survey_spec::{Catalog, InlineValidation};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "survey-builder.toml";

/// Settings read from `survey-builder.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Preferred message locale; the `--locale` flag wins over it.
    pub locale: Option<String>,
    pub inline_validation: InlineValidation,
    /// Pretty-print snapshots written back to disk.
    pub pretty: bool,
    /// Extra `key -> message` JSON layered over the embedded catalog.
    pub catalog: Option<PathBuf>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            locale: None,
            inline_validation: InlineValidation::default(),
            pretty: true,
            catalog: None,
        }
    }
}

impl BuilderConfig {
    /// Loads `explicit` when given (it must exist), otherwise the per-user
    /// config file if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn catalog(&self, locale: &str) -> Result<Catalog> {
        let Some(path) = &self.catalog else {
            return Ok(Catalog::for_locale(locale));
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Ok(Catalog::from_json(locale, &raw)?)
    }
}

pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "survey-builder").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: BuilderConfig = toml::from_str("").expect("parse");
        assert_eq!(config, BuilderConfig::default());
        assert!(config.pretty);
    }

    #[test]
    fn reads_policy_and_locale() {
        let config: BuilderConfig = toml::from_str(
            r#"
locale = "mn"
inline_validation = "always"
pretty = false
"#,
        )
        .expect("parse");
        assert_eq!(config.locale.as_deref(), Some("mn"));
        assert_eq!(config.inline_validation, InlineValidation::Always);
        assert!(!config.pretty);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<BuilderConfig>("colour = true").is_err());
    }
}
