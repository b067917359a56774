//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use edit_conflict_cleaner::prelude::*;
//! ```

// Core
pub use crate::core::config::{Config, OutputMode, TraversalPolicy};
pub use crate::core::errors::{EccError, Result};

// Scanner
pub use crate::scanner::deletion::{
    RemovalEvent, RemovalReport, Remover, SizeSummary, candidate_sizes, format_size,
};
pub use crate::scanner::pattern::ConflictPattern;
pub use crate::scanner::walker::{ConflictScanner, ScanEvent, ScanOutcome};

// Reporting
#[cfg(feature = "cli")]
pub use crate::report::{HumanReporter, JsonReporter, ReportError, ReportResult, Reporter};
