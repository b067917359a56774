//! Line-delimited JSON output for scripts.
//!
//! stdout carries one JSON object per line; the confirmation prompt goes to
//! stderr so it never corrupts the stream. Paths are rendered lossily, so a
//! file name that is not valid UTF-8 still gets a record.

#![allow(missing_docs)]

use std::io::{self, Write};
use std::path::Path;

use serde_json::{Value, json};

use crate::report::{ReportResult, Reporter};
use crate::scanner::deletion::{RemovalEvent, RemovalReport, SizeSummary, format_size};
use crate::scanner::walker::{ScanEvent, ScanOutcome};

pub struct JsonReporter<W: Write, E: Write> {
    out: W,
    err: E,
    root: String,
}

impl JsonReporter<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> JsonReporter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out,
            err,
            root: String::new(),
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write_json_line(&mut self, payload: &Value) -> ReportResult {
        serde_json::to_writer(&mut self.out, payload)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

fn lossy(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

impl<W: Write, E: Write> Reporter for JsonReporter<W, E> {
    fn scan_started(&mut self, root: &Path) {
        self.root = root.to_string_lossy().into_owned();
    }

    fn scan_event(&mut self, event: ScanEvent<'_>) {
        let payload = match event {
            ScanEvent::DirectoryEntered { .. } => return,
            ScanEvent::Matched(path) => json!({ "event": "match", "path": lossy(path) }),
            ScanEvent::Skipped(path) => json!({ "event": "skip", "path": lossy(path) }),
        };
        let _ = self.write_json_line(&payload);
    }

    fn scan_summary(&mut self, outcome: &ScanOutcome, sizes: &SizeSummary) -> ReportResult {
        let conflicts: Vec<Value> = outcome.matches.iter().map(|p| lossy(p)).collect();
        let errors: Vec<Value> = outcome
            .errors
            .iter()
            .map(|e| json!({ "path": lossy(&e.path), "message": e.message }))
            .collect();
        let payload = json!({
            "command": "scan",
            "root": self.root,
            "dirs_visited": outcome.dirs_visited,
            "files_visited": outcome.files_visited,
            "conflicts_count": conflicts.len(),
            "total_bytes": sizes.total_bytes,
            "total_size": format_size(sizes.total_bytes),
            "unreadable_sizes": sizes.unreadable,
            "conflicts": conflicts,
            "errors": errors,
        });
        self.write_json_line(&payload)
    }

    fn prompt(&mut self, count: usize, size: &str) -> ReportResult {
        write!(
            self.err,
            "Do you want to remove these {count} ({size}) files? (y/n): "
        )?;
        self.err.flush()?;
        Ok(())
    }

    fn removal_event(&mut self, _event: RemovalEvent<'_>) {
        // Per-file outcomes are part of the removal summary line.
    }

    fn removal_summary(&mut self, report: &RemovalReport) -> ReportResult {
        let removed: Vec<Value> = report.removed.iter().map(|p| lossy(p)).collect();
        let failed: Vec<Value> = report
            .failed
            .iter()
            .map(|f| {
                json!({
                    "path": lossy(&f.path),
                    "error": f.error,
                    "error_code": f.error_code,
                })
            })
            .collect();
        let payload = json!({
            "command": "remove",
            "aborted": false,
            "removed_count": removed.len(),
            "failed_count": failed.len(),
            "removed": removed,
            "failed": failed,
        });
        self.write_json_line(&payload)
    }

    fn aborted(&mut self) -> ReportResult {
        self.write_json_line(&json!({ "command": "remove", "aborted": true }))
    }
}
