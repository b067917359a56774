//! Run configuration: CLI flags layered with `ECC_*` environment overrides.
//!
//! Nothing is read from disk. Precedence is flag > environment > default, and
//! [`Config::validate`] performs the startup directory check before any scan.

#![allow(missing_docs)]

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::errors::{EccError, Result};

/// Environment variable selecting the output format (`human`, `json`, `auto`).
pub const ENV_OUTPUT_FORMAT: &str = "ECC_OUTPUT_FORMAT";
/// Environment variable enabling [`TraversalPolicy::KeepGoing`].
pub const ENV_KEEP_GOING: &str = "ECC_KEEP_GOING";
/// De-facto standard opt-out for colored output.
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// How results are rendered on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Human,
    Json,
}

/// What the scanner does when a directory cannot be listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalPolicy {
    /// Abort the whole scan on the first unreadable directory.
    #[default]
    FailFast,
    /// Record the failure, skip that subtree, and keep walking.
    KeepGoing,
}

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub root: PathBuf,
    pub verbose: bool,
    pub output_mode: OutputMode,
    pub color: bool,
    pub policy: TraversalPolicy,
    /// Treat the confirmation prompt as answered with `y`.
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            verbose: false,
            output_mode: OutputMode::Human,
            color: true,
            policy: TraversalPolicy::FailFast,
            assume_yes: false,
        }
    }
}

impl Config {
    /// Apply environment overrides from the process environment, then validate.
    pub fn load(mut self) -> Result<Self> {
        self.apply_env_overrides_from(env_var)?;
        self.validate()?;
        Ok(self)
    }

    /// Layer environment overrides on top of flag values.
    ///
    /// Flags that were switched on are never switched back off by the
    /// environment.
    pub(crate) fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let env_mode = lookup(ENV_OUTPUT_FORMAT);
        self.output_mode = resolve_output_mode(
            self.output_mode == OutputMode::Json,
            env_mode.as_deref(),
        )?;

        if let Some(raw) = lookup(ENV_KEEP_GOING)
            && parse_env_bool(ENV_KEEP_GOING, &raw)?
        {
            self.policy = TraversalPolicy::KeepGoing;
        }

        if lookup(ENV_NO_COLOR).is_some() {
            self.color = false;
        }

        Ok(())
    }

    /// The scan root must exist and be a directory.
    pub fn validate(&self) -> Result<()> {
        validate_root(&self.root)
    }
}

/// Check that `root` names an existing directory.
pub fn validate_root(root: &Path) -> Result<()> {
    match root.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(EccError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(_) => Err(EccError::MissingDirectory {
            path: root.to_path_buf(),
        }),
    }
}

/// `--json` wins over the environment; `auto` and unset fall back to human.
pub fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>) -> Result<OutputMode> {
    if json_flag {
        return Ok(OutputMode::Json);
    }

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => Ok(OutputMode::Json),
        Some("human" | "auto") | None => Ok(OutputMode::Human),
        Some(other) => Err(EccError::InvalidConfig {
            details: format!("{ENV_OUTPUT_FORMAT}={other:?}: expected human, json or auto"),
        }),
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(EccError::InvalidConfig {
            details: format!("{name}={raw:?}: expected true/false"),
        }),
    }
}
