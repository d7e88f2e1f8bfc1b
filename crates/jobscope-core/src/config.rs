//! View configuration: defaults, an optional YAML file, then environment overrides.

use std::path::Path;

use serde::Deserialize;

use crate::app::{HintPolicy, RefreshInterval};
use crate::error::JobscopeError;

pub const ENV_REFRESH: &str = "JOBSCOPE_REFRESH";
pub const ENV_CONFLICT_THRESHOLD: &str = "JOBSCOPE_CONFLICT_THRESHOLD";
pub const ENV_SHOW_DIAGNOSTICS: &str = "JOBSCOPE_SHOW_DIAGNOSTICS";

/// Settings for the job view.
///
/// ```yaml
/// refresh: 30
/// conflict_threshold: 3
/// show_diagnostics: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub refresh: RefreshInterval,

    /// Resource-conflict retries at which a waiting job is flagged.
    pub conflict_threshold: u32,

    /// Print raw exit diagnostics below the hints.
    pub show_diagnostics: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            refresh: RefreshInterval::default(),
            conflict_threshold: HintPolicy::default().conflict_threshold,
            show_diagnostics: true,
        }
    }
}

impl ViewConfig {
    /// Load from `path` (if given) and the process environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, JobscopeError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`ViewConfig::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self, JobscopeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        config.validate()?;
        tracing::debug!(?config, "view config loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, JobscopeError> {
        let content = std::fs::read_to_string(path).map_err(|source| JobscopeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self, JobscopeError> {
        // An empty file is treated as "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| JobscopeError::ConfigParse {
            origin: origin.to_string(),
            source,
        })
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), JobscopeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env(ENV_REFRESH) {
            self.refresh = value.parse()?;
        }
        if let Some(value) = env(ENV_CONFLICT_THRESHOLD) {
            self.conflict_threshold = value.trim().parse().map_err(|_| {
                JobscopeError::InvalidConfig {
                    key: "conflict_threshold",
                    message: format!("{ENV_CONFLICT_THRESHOLD} is not a number: {value}"),
                }
            })?;
        }
        if let Some(value) = env(ENV_SHOW_DIAGNOSTICS) {
            self.show_diagnostics = parse_bool(&value).ok_or_else(|| {
                JobscopeError::InvalidConfig {
                    key: "show_diagnostics",
                    message: format!("{ENV_SHOW_DIAGNOSTICS} is not a boolean: {value}"),
                }
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), JobscopeError> {
        if self.conflict_threshold == 0 {
            return Err(JobscopeError::InvalidConfig {
                key: "conflict_threshold",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn hint_policy(&self) -> HintPolicy {
        HintPolicy {
            conflict_threshold: self.conflict_threshold,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
