//! Directory walker that collects edit-conflict files under a root.
//!
//! The walk is single-threaded and depth-first. It only reads directory
//! listings; nothing is opened or modified. Per-file decisions and progress
//! are handed to an optional observer instead of being printed, so the caller
//! decides how (and whether) to render them.

#![allow(missing_docs)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::config::TraversalPolicy;
use crate::core::errors::{EccError, Result};
use crate::scanner::pattern::ConflictPattern;

/// Something the walker noticed, delivered to the observer as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent<'a> {
    /// A directory is about to be listed. Always emitted; used for progress.
    DirectoryEntered { path: &'a Path, dirs_visited: usize },
    /// A file matched the conflict pattern. Emitted in verbose mode only.
    Matched(&'a Path),
    /// A file did not match. Emitted in verbose mode only.
    Skipped(&'a Path),
}

/// A directory that could not be listed under [`TraversalPolicy::KeepGoing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkError {
    pub path: PathBuf,
    pub message: String,
}

/// Result of a completed walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Matching files in discovery order.
    pub matches: Vec<PathBuf>,
    pub dirs_visited: usize,
    pub files_visited: usize,
    /// Unreadable directories; always empty under [`TraversalPolicy::FailFast`].
    pub errors: Vec<WalkError>,
}

type Observer<'a> = Box<dyn FnMut(ScanEvent<'_>) + 'a>;

/// Finds files whose names carry the edit-conflict marker.
///
/// Invariants:
/// - Only non-directory entries are matched; directories are recursed into.
/// - Symlinked directories are neither followed nor matched.
/// - Each path is visited once, so `matches` holds no duplicates.
pub struct ConflictScanner<'a> {
    pattern: ConflictPattern,
    policy: TraversalPolicy,
    observer: Option<Observer<'a>>,
}

impl<'a> ConflictScanner<'a> {
    pub fn new(pattern: ConflictPattern, policy: TraversalPolicy) -> Self {
        Self {
            pattern,
            policy,
            observer: None,
        }
    }

    /// Set a callback that receives [`ScanEvent`]s during the walk.
    #[must_use]
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(ScanEvent<'_>) + 'a,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Walk `root` and return every conflict file beneath it.
    ///
    /// `root` is expected to be an existing directory; the caller checks this.
    /// When `verbose` is set, every visited file is reported to the observer as
    /// matched or skipped.
    pub fn find(&mut self, root: &Path, verbose: bool) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();
        let mut stack = vec![root.to_path_buf()];

        while let Some(dir) = stack.pop() {
            outcome.dirs_visited += 1;
            self.emit(ScanEvent::DirectoryEntered {
                path: &dir,
                dirs_visited: outcome.dirs_visited,
            });

            let mut subdirs = Vec::new();
            let listed = self.list_directory(&dir, verbose, &mut outcome, &mut subdirs);

            // Subdirectories found before a listing error are still walked.
            // Reverse so the first listed subdirectory is walked first.
            stack.extend(subdirs.into_iter().rev());

            if let Err(source) = listed {
                match self.policy {
                    TraversalPolicy::FailFast => return Err(EccError::walk(&dir, source)),
                    TraversalPolicy::KeepGoing => outcome.errors.push(WalkError {
                        path: dir,
                        message: source.to_string(),
                    }),
                }
            }
        }

        Ok(outcome)
    }

    /// List one directory: classify files, collect subdirectories to descend into.
    ///
    /// An error part-way through the listing keeps everything already matched
    /// or collected from this directory; the remaining entries are abandoned.
    fn list_directory(
        &mut self,
        dir: &Path,
        verbose: bool,
        outcome: &mut ScanOutcome,
        subdirs: &mut Vec<PathBuf>,
    ) -> io::Result<()> {
        let entries = fs::read_dir(dir)?.map(|entry| -> io::Result<(PathBuf, EntryKind)> {
            let entry = entry?;
            let kind = entry_kind(&entry)?;
            Ok((entry.path(), kind))
        });
        self.classify_entries(entries, verbose, outcome, subdirs)
    }

    fn classify_entries<I>(
        &mut self,
        entries: I,
        verbose: bool,
        outcome: &mut ScanOutcome,
        subdirs: &mut Vec<PathBuf>,
    ) -> io::Result<()>
    where
        I: IntoIterator<Item = io::Result<(PathBuf, EntryKind)>>,
    {
        for entry in entries {
            let (path, kind) = entry?;
            match kind {
                EntryKind::Directory => {
                    subdirs.push(path);
                    continue;
                }
                EntryKind::LinkedDirectory => continue,
                EntryKind::File => {}
            }

            outcome.files_visited += 1;
            if self.pattern.matches_path(&path) {
                if verbose {
                    self.emit(ScanEvent::Matched(&path));
                }
                outcome.matches.push(path);
            } else if verbose {
                self.emit(ScanEvent::Skipped(&path));
            }
        }

        Ok(())
    }

    fn emit(&mut self, event: ScanEvent<'_>) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    LinkedDirectory,
    File,
}

/// Classify without following symlinks, except to learn whether a link points
/// at a directory. Dangling links count as files.
fn entry_kind(entry: &fs::DirEntry) -> io::Result<EntryKind> {
    let ft = entry.file_type()?;
    if ft.is_dir() {
        return Ok(EntryKind::Directory);
    }
    if ft.is_symlink() && fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir()) {
        return Ok(EntryKind::LinkedDirectory);
    }
    Ok(EntryKind::File)
}
