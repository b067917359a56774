//! Console rendering for scan and removal results.
//!
//! The scanner and remover only return data and raise events; everything a
//! person (or a script) sees goes through a [`Reporter`].

pub mod human;
pub mod json;

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::scanner::deletion::{RemovalEvent, RemovalReport, SizeSummary};
use crate::scanner::walker::{ScanEvent, ScanOutcome};

pub use human::HumanReporter;
pub use json::JsonReporter;

/// Failure to write a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output stream rejected a write.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    /// A payload could not be serialized.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a summary-level [`Reporter`] call.
pub type ReportResult = std::result::Result<(), ReportError>;

/// Sink for everything the run wants to tell the user.
///
/// Event methods are called from inside the walk and removal loops and
/// swallow write failures; summary methods propagate them.
pub trait Reporter {
    /// A walk of `root` is starting.
    fn scan_started(&mut self, root: &Path);
    /// Forwarded [`ScanEvent`] from the walker.
    fn scan_event(&mut self, event: ScanEvent<'_>);
    /// The walk ended, successfully or not.
    fn scan_finished(&mut self) {}
    /// Count, candidate list, combined size, and any unreadable directories.
    fn scan_summary(&mut self, outcome: &ScanOutcome, sizes: &SizeSummary) -> ReportResult;
    /// Ask whether to remove `count` files totalling `size`.
    fn prompt(&mut self, count: usize, size: &str) -> ReportResult;
    /// Forwarded [`RemovalEvent`] from the remover.
    fn removal_event(&mut self, event: RemovalEvent<'_>);
    /// Removal finished.
    fn removal_summary(&mut self, report: &RemovalReport) -> ReportResult;
    /// The user declined; nothing was removed.
    fn aborted(&mut self) -> ReportResult;
}
