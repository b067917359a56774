//! Colored, line-oriented output for interactive use.
//!
//! Progress is a single self-overwriting line on stderr, drawn with
//! `crossterm` only when stderr is a terminal.

#![allow(missing_docs)]

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::report::{ReportResult, Reporter};
use crate::scanner::deletion::{RemovalEvent, RemovalReport, SizeSummary, format_size};
use crate::scanner::walker::{ScanEvent, ScanOutcome};

/// Redraw the progress line every this many directories.
const PROGRESS_EVERY: usize = 32;

const LIST_PREFIX: &str = " - ";

pub struct HumanReporter<W: Write, E: Write> {
    out: W,
    err: E,
    progress: bool,
    progress_drawn: bool,
    root: PathBuf,
}

impl HumanReporter<io::Stdout, io::Stderr> {
    /// Report to stdout; draw progress on stderr if it is a terminal.
    pub fn stdio() -> Self {
        let err = io::stderr();
        let progress = err.is_terminal();
        Self::new(io::stdout(), err, progress)
    }
}

impl<W: Write, E: Write> HumanReporter<W, E> {
    pub fn new(out: W, err: E, progress: bool) -> Self {
        Self {
            out,
            err,
            progress,
            progress_drawn: false,
            root: PathBuf::new(),
        }
    }

    /// Consume the reporter and hand back its writers.
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn draw_progress(&mut self, dirs_visited: usize) {
        let line = format!(
            "Searching '{}': {dirs_visited} dir{}",
            self.root.display(),
            if dirs_visited == 1 { "" } else { "s" }
        );
        let _ = queue!(
            self.err,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line.green())
        );
        let _ = self.err.flush();
        self.progress_drawn = true;
    }

    fn clear_progress(&mut self) {
        if self.progress_drawn {
            let _ = queue!(self.err, MoveToColumn(0), Clear(ClearType::CurrentLine));
            let _ = self.err.flush();
            self.progress_drawn = false;
        }
    }

    /// Verbose lines share the terminal with the progress line.
    fn file_line(&mut self, label: colored::ColoredString, path: &Path) {
        self.clear_progress();
        let _ = writeln!(self.out, "{label} {}", path.display());
    }
}

impl<W: Write, E: Write> Reporter for HumanReporter<W, E> {
    fn scan_started(&mut self, root: &Path) {
        self.root = root.to_path_buf();
    }

    fn scan_event(&mut self, event: ScanEvent<'_>) {
        match event {
            ScanEvent::DirectoryEntered { dirs_visited, .. } => {
                if self.progress && (dirs_visited == 1 || dirs_visited % PROGRESS_EVERY == 0) {
                    self.draw_progress(dirs_visited);
                }
            }
            ScanEvent::Matched(path) => self.file_line("Found conflict file:".red(), path),
            ScanEvent::Skipped(path) => self.file_line("Skipping file:".green(), path),
        }
    }

    fn scan_finished(&mut self) {
        self.clear_progress();
    }

    fn scan_summary(&mut self, outcome: &ScanOutcome, sizes: &SizeSummary) -> ReportResult {
        writeln!(self.out, "Found {} conflict files", outcome.matches.len())?;
        for path in &outcome.matches {
            writeln!(self.out, "{LIST_PREFIX}{}", path.display())?;
        }
        if !outcome.matches.is_empty() {
            writeln!(self.out, "Total size: {}", format_size(sizes.total_bytes))?;
        }
        if sizes.unreadable > 0 {
            writeln!(
                self.out,
                "{} size unknown for {} file(s); counted as 0 bytes",
                "Warning:".yellow(),
                sizes.unreadable
            )?;
        }
        for error in &outcome.errors {
            writeln!(
                self.out,
                "{} {} - {}",
                "Could not read directory:".yellow(),
                error.path.display(),
                error.message
            )?;
        }
        Ok(())
    }

    fn prompt(&mut self, count: usize, size: &str) -> ReportResult {
        write!(
            self.out,
            "Do you want to remove these {count} ({size}) files? (y/n): "
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn removal_event(&mut self, event: RemovalEvent<'_>) {
        let _ = match event {
            RemovalEvent::Removed(path) => {
                writeln!(self.out, "{} {}", "Removed file:".green(), path.display())
            }
            RemovalEvent::Failed { path, error } => writeln!(
                self.out,
                "{} {} - {error}",
                "Error removing file:".red(),
                path.display()
            ),
        };
    }

    fn removal_summary(&mut self, report: &RemovalReport) -> ReportResult {
        writeln!(
            self.out,
            "Removed {} of {} files",
            report.removed.len(),
            report.attempted()
        )?;
        if !report.failed.is_empty() {
            writeln!(self.out, "  Failed: {} files", report.failed.len())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn aborted(&mut self) -> ReportResult {
        writeln!(self.out, "{}", "Aborting file removal.".red())?;
        self.out.flush()?;
        Ok(())
    }
}
