//! Removal of scanned conflict files.
//!
//! Pipeline: matched paths (scan order) -> `remove_file` each -> per-file
//! outcome to the observer -> [`RemovalReport`].
//!
//! Every path is attempted exactly once. A failure is recorded and the batch
//! moves on; there is no retry, rollback, or dry-run.

#![allow(missing_docs)]
#![allow(clippy::cast_precision_loss)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::errors::EccError;

// ──────────────────── report types ────────────────────

/// A single removal failure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub error: String,
    pub error_code: String,
}

/// Summary after a removal batch completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalReport {
    /// Removed paths in the order they were attempted.
    pub removed: Vec<PathBuf>,
    pub failed: Vec<RemovalFailure>,
}

impl RemovalReport {
    /// Number of paths attempted.
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failed.len()
    }
}

/// Per-file outcome delivered to the observer as it happens.
#[derive(Debug, Clone, Copy)]
pub enum RemovalEvent<'a> {
    Removed(&'a Path),
    Failed {
        path: &'a Path,
        error: &'a EccError,
    },
}

// ──────────────────── remover ────────────────────

type Observer<'a> = Box<dyn FnMut(RemovalEvent<'_>) + 'a>;

/// Deletes files one at a time, in input order.
#[derive(Default)]
pub struct Remover<'a> {
    observer: Option<Observer<'a>>,
}

impl<'a> Remover<'a> {
    pub fn new() -> Self {
        Self { observer: None }
    }

    /// Set a callback that receives a [`RemovalEvent`] per path.
    #[must_use]
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(RemovalEvent<'_>) + 'a,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Attempt to delete every path. An empty slice touches nothing.
    ///
    /// Directories are not removed: `remove_file` refuses them and the refusal
    /// is reported like any other per-file failure.
    pub fn remove(&mut self, paths: &[PathBuf]) -> RemovalReport {
        let mut report = RemovalReport::default();

        for path in paths {
            match fs::remove_file(path) {
                Ok(()) => {
                    self.emit(RemovalEvent::Removed(path));
                    report.removed.push(path.clone());
                }
                Err(source) => {
                    let error = EccError::io(path, source);
                    self.emit(RemovalEvent::Failed {
                        path,
                        error: &error,
                    });
                    report.failed.push(RemovalFailure {
                        path: path.clone(),
                        error: error.to_string(),
                        error_code: error.code().to_string(),
                    });
                }
            }
        }

        report
    }

    fn emit(&mut self, event: RemovalEvent<'_>) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}

// ──────────────────── sizing ────────────────────

/// Combined size of a candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeSummary {
    pub total_bytes: u64,
    /// Paths whose metadata could not be read; they count as zero bytes.
    pub unreadable: usize,
}

/// Stat each path (following symlinks) and sum the sizes.
pub fn candidate_sizes(paths: &[PathBuf]) -> SizeSummary {
    paths
        .iter()
        .fold(SizeSummary::default(), |mut summary, path| {
            match fs::metadata(path) {
                Ok(meta) => summary.total_bytes = summary.total_bytes.saturating_add(meta.len()),
                Err(_) => summary.unreadable += 1,
            }
            summary
        })
}

/// Human size for the confirmation prompt: megabytes above 1 MiB, else kilobytes.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;

    if bytes > MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    }
}

// ──────────────────── tests ────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_files(dir: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let p = dir.join(format!("f{i} # Edit conflict 2024-01-15 v{i} #.txt"));
                fs::write(&p, format!("data {i}")).unwrap();
                p
            })
            .collect()
    }

    #[test]
    fn removes_all_paths_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths = make_files(dir.path(), 3);

        let mut seen = Vec::new();
        let report = Remover::new()
            .with_observer(|event| {
                if let RemovalEvent::Removed(path) = event {
                    seen.push(path.to_path_buf());
                }
            })
            .remove(&paths);

        assert_eq!(report.removed, paths);
        assert!(report.failed.is_empty());
        assert_eq!(seen, paths);
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let keep = dir.path().join("keep.txt");
        fs::write(&keep, "x").unwrap();

        let mut events = 0usize;
        let report = Remover::new()
            .with_observer(|_| events += 1)
            .remove(&[]);

        assert_eq!(report, RemovalReport::default());
        assert_eq!(report.attempted(), 0);
        assert_eq!(events, 0);
        assert!(keep.exists());
    }

    #[test]
    fn one_failure_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let paths = make_files(dir.path(), 5);
        // Make the middle path vanish before removal.
        fs::remove_file(&paths[2]).unwrap();

        let mut failures = Vec::new();
        let report = Remover::new()
            .with_observer(|event| {
                if let RemovalEvent::Failed { path, error } = event {
                    failures.push((path.to_path_buf(), error.code()));
                }
            })
            .remove(&paths);

        assert_eq!(report.attempted(), 5);
        assert_eq!(report.removed.len(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, paths[2]);
        assert_eq!(report.failed[0].error_code, "ECC-3002");
        assert_eq!(failures, vec![(paths[2].clone(), "ECC-3002")]);
    }

    #[test]
    fn directory_path_is_reported_not_removed() {
        let dir = tempfile::tempdir().unwrap();
        let subdir = dir.path().join("d # Edit conflict 2024-01-15 v2 #");
        fs::create_dir(&subdir).unwrap();

        let report = Remover::new().remove(std::slice::from_ref(&subdir));

        assert!(report.removed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].error.contains(&*subdir.to_string_lossy()));
        assert!(subdir.exists());
    }

    #[test]
    fn removing_twice_reports_second_attempt_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let paths = make_files(dir.path(), 1);

        let first = Remover::new().remove(&paths);
        let second = Remover::new().remove(&paths);

        assert_eq!(first.removed.len(), 1);
        assert_eq!(second.failed.len(), 1);
    }

    #[test]
    fn sizes_are_summed_and_missing_paths_counted() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, vec![0u8; 500 * 1024]).unwrap();
        fs::write(&b, vec![0u8; 600 * 1024]).unwrap();

        let summary = candidate_sizes(&[a, b, dir.path().join("gone")]);

        assert_eq!(summary.total_bytes, 1_100 * 1024);
        assert_eq!(summary.unreadable, 1);
        assert_eq!(format_size(summary.total_bytes), "1.07 MB");
    }

    #[test]
    fn format_size_switches_above_one_mebibyte() {
        assert_eq!(format_size(0), "0.00 KB");
        assert_eq!(format_size(512), "0.50 KB");
        assert_eq!(format_size(1024 * 1024), "1024.00 KB");
        assert_eq!(format_size(1024 * 1024 + 1), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
