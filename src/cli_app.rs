//! Top-level CLI definition and orchestration.
//!
//! Validate -> Scan -> Report -> (Confirm -> Remove | Abort).

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use colored::control;
use thiserror::Error;

use edit_conflict_cleaner::core::config::{Config, OutputMode, TraversalPolicy};
use edit_conflict_cleaner::core::errors::EccError;
use edit_conflict_cleaner::report::{HumanReporter, JsonReporter, ReportError, Reporter};
use edit_conflict_cleaner::scanner::deletion::{Remover, candidate_sizes, format_size};
use edit_conflict_cleaner::scanner::pattern::ConflictPattern;
use edit_conflict_cleaner::scanner::walker::ConflictScanner;

/// The only answer that proceeds with removal.
const AFFIRMATIVE: &str = "y";

/// Find and remove cloud-sync edit conflict files.
#[derive(Debug, Parser)]
#[command(
    name = "ecc",
    author,
    version,
    about = "Find and remove cloud-sync \"edit conflict\" files",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output (one line per file visited).
    #[arg(short, long)]
    verbose: bool,
    /// Directory to search for conflict files. Defaults to current directory.
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    dir: PathBuf,
    /// Emit line-delimited JSON instead of human output.
    #[arg(long)]
    json: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Report unreadable directories and keep scanning instead of aborting.
    #[arg(long)]
    keep_going: bool,
    /// Skip the confirmation prompt and remove everything found.
    #[arg(short, long)]
    yes: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            root: self.dir.clone(),
            verbose: self.verbose,
            output_mode: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Human
            },
            color: !self.no_color,
            policy: if self.keep_going {
                TraversalPolicy::KeepGoing
            } else {
                TraversalPolicy::FailFast
            },
            assume_yes: self.yes,
        }
    }
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (bad directory, bad environment value).
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

impl From<EccError> for CliError {
    fn from(err: EccError) -> Self {
        match err {
            EccError::InvalidConfig { .. }
            | EccError::NotADirectory { .. }
            | EccError::MissingDirectory { .. } => Self::User(err.to_string()),
            EccError::Walk { .. }
            | EccError::PermissionDenied { .. }
            | EccError::Io { .. }
            | EccError::Prompt { .. } => Self::Runtime(err.to_string()),
        }
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Io(source) => Self::Io(source),
            ReportError::Json(source) => Self::Json(source),
        }
    }
}

/// How a run ended. Every variant maps to exit code 0, including a removal
/// in which some files failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunOutcome {
    NothingFound,
    Aborted,
    Removed,
}

/// Parse-time flags -> effective config -> run against stdio.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.to_config().load()?;
    if !config.color {
        control::set_override(false);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    match config.output_mode {
        OutputMode::Human => execute(&config, &mut HumanReporter::stdio(), &mut input)?,
        OutputMode::Json => execute(&config, &mut JsonReporter::stdio(), &mut input)?,
    };
    Ok(())
}

fn execute<R, I>(config: &Config, reporter: &mut R, input: &mut I) -> Result<RunOutcome, CliError>
where
    R: Reporter,
    I: BufRead,
{
    let pattern = ConflictPattern::new().map_err(|e| CliError::Internal(e.to_string()))?;

    reporter.scan_started(&config.root);
    let scanned = ConflictScanner::new(pattern, config.policy)
        .with_observer(|event| reporter.scan_event(event))
        .find(&config.root, config.verbose);
    reporter.scan_finished();
    let outcome = scanned?;

    let sizes = candidate_sizes(&outcome.matches);
    reporter.scan_summary(&outcome, &sizes)?;

    if outcome.matches.is_empty() {
        return Ok(RunOutcome::NothingFound);
    }

    if !config.assume_yes {
        reporter.prompt(outcome.matches.len(), &format_size(sizes.total_bytes))?;
        if !read_confirmation(input)? {
            reporter.aborted()?;
            return Ok(RunOutcome::Aborted);
        }
    }

    let report = Remover::new()
        .with_observer(|event| reporter.removal_event(event))
        .remove(&outcome.matches);
    reporter.removal_summary(&report)?;

    Ok(RunOutcome::Removed)
}

/// Read one line; only an exact `y` (trailing newline aside) confirms.
/// End of input counts as a refusal.
fn read_confirmation<I: BufRead>(input: &mut I) -> Result<bool, EccError> {
    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| EccError::Prompt {
        details: e.to_string(),
    })?;

    let answer = line
        .strip_suffix('\n')
        .map_or(line.as_str(), |rest| rest.strip_suffix('\r').unwrap_or(rest));
    Ok(answer == AFFIRMATIVE)
}
