//! Edit-conflict filename pattern.
//!
//! Sync clients rename the losing copy of a concurrently edited file to
//! something like `report # Edit conflict 2024-01-15 v2 #.docx`. The match is an
//! unanchored substring search over the file name only, and the date is checked
//! for shape (`dddd-dd-dd`), not calendar validity.

use std::path::Path;

use regex::Regex;

use crate::core::errors::{EccError, Result};

/// Regex source for the conflict marker.
pub const CONFLICT_PATTERN: &str = r"# Edit conflict \d{4}-\d{2}-\d{2} .* #";

/// Compiled conflict-marker matcher.
#[derive(Debug, Clone)]
pub struct ConflictPattern {
    regex: Regex,
}

impl ConflictPattern {
    /// Compile [`CONFLICT_PATTERN`].
    pub fn new() -> Result<Self> {
        let regex = Regex::new(CONFLICT_PATTERN).map_err(|err| EccError::InvalidConfig {
            details: format!("conflict pattern {CONFLICT_PATTERN:?}: {err}"),
        })?;
        Ok(Self { regex })
    }

    /// True when `file_name` contains a conflict marker anywhere in it.
    #[must_use]
    pub fn is_match(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    /// Test only the final component of `path`; directories in the path are
    /// ignored. Non-UTF-8 names are compared lossily.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.is_match(&name.to_string_lossy()))
    }
}
