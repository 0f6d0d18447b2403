use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wasteland_core::errors::{ErrorInfo, WastelandError};
use wasteland_walk::WalkOpts;

/// YAML-configurable parameters for a run. CLI flags override these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Label the single walker starts from.
    #[serde(default = "default_start_label")]
    pub start_label: String,
    /// Label the single walker must reach.
    #[serde(default = "default_end_label")]
    pub end_label: String,
    /// Last character marking multi-walker start labels.
    #[serde(default = "default_start_suffix")]
    pub start_suffix: String,
    /// Last character marking terminal labels.
    #[serde(default = "default_terminal_suffix")]
    pub terminal_suffix: String,
    /// Traversal options shared by both parts.
    #[serde(default)]
    pub walk: WalkOpts,
}

fn default_start_label() -> String {
    "AAA".into()
}

fn default_end_label() -> String {
    "ZZZ".into()
}

fn default_start_suffix() -> String {
    "A".into()
}

fn default_terminal_suffix() -> String {
    "Z".into()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_label: default_start_label(),
            end_label: default_end_label(),
            start_suffix: default_start_suffix(),
            terminal_suffix: default_terminal_suffix(),
            walk: WalkOpts::default(),
        }
    }
}

impl RunConfig {
    /// Loads a configuration file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, WastelandError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|err| {
            WastelandError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        let config: RunConfig = serde_yaml::from_str(&text).map_err(|err| {
            WastelandError::Config(
                ErrorInfo::new("config-parse", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        config.suffixes()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Returns the validated `(start, terminal)` suffix characters.
    pub fn suffixes(&self) -> Result<(char, char), WastelandError> {
        Ok((
            parse_suffix("start_suffix", &self.start_suffix)?,
            parse_suffix("terminal_suffix", &self.terminal_suffix)?,
        ))
    }
}

fn parse_suffix(field: &str, value: &str) -> Result<char, WastelandError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(WastelandError::Config(
            ErrorInfo::new("invalid-suffix", "suffix must be exactly one character")
                .with_context("field", field)
                .with_context("value", value)
                .with_hint("use a single character such as 'Z'"),
        )),
    }
}
