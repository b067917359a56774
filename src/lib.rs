#![forbid(unsafe_code)]

//! Edit Conflict Cleaner (ecc): finds and removes the duplicate copies a cloud
//! sync client leaves behind when two devices edit the same file at once.
//!
//! Such copies carry a marker like `# Edit conflict 2024-01-15 laptop #` in
//! their file name. A run is two-phase:
//! 1. **Scan**: walk a directory tree and collect every conflict file
//! 2. **Remove**: after the user confirms, delete the collected files one by one
//!
//! # Library usage
//!
//! ```rust,no_run
//! use edit_conflict_cleaner::prelude::*;
//!
//! # fn main() -> edit_conflict_cleaner::core::errors::Result<()> {
//! let mut scanner = ConflictScanner::new(ConflictPattern::new()?, TraversalPolicy::FailFast);
//! let outcome = scanner.find(std::path::Path::new("."), false)?;
//! let report = Remover::new().remove(&outcome.matches);
//! println!("removed {}", report.removed.len());
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod core;
#[cfg(feature = "cli")]
pub mod report;
pub mod scanner;
