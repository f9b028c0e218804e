use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

use crate::analysis::ChangeItem;
use crate::commands::check::{FileOutcome, FileReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub skipped: usize,
    pub clean: usize,
    pub dirty: usize,
    pub fixed: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Summary {
            files: reports.len(),
            ..Summary::default()
        };
        for report in reports {
            match report.outcome {
                FileOutcome::Skip => summary.skipped += 1,
                FileOutcome::Clean => summary.clean += 1,
                FileOutcome::Dirty { .. } => summary.dirty += 1,
                FileOutcome::Fixed { .. } => summary.fixed += 1,
                FileOutcome::Error { .. } => summary.errors += 1,
            }
        }
        summary
    }
}

/// Human-readable status block for one file.
pub fn render_text(report: &FileReport, trigger: &str) -> String {
    let name = report.path.display();
    let mut out = String::new();
    match &report.outcome {
        FileOutcome::Skip => {
            let _ = write!(out, "skipping {} (no {} found)", name, trigger);
        }
        FileOutcome::Clean => {
            let _ = write!(
                out,
                "{}: all imports OK, no changes needed ({} lines)",
                name, report.lines
            );
        }
        FileOutcome::Dirty {
            changes,
            added,
            uncommented,
        } => {
            let _ = writeln!(
                out,
                "{}: found imports that can be fixed ({} lines)",
                name, report.lines
            );
            push_counts(
                &mut out,
                ("missing imports", *added),
                ("commented imports to uncomment", *uncommented),
            );
            push_changes(&mut out, changes);
            out.push_str("  run with --auto to fix these issues");
        }
        FileOutcome::Fixed {
            changes,
            added,
            uncommented,
        } => {
            let _ = writeln!(out, "{}: auto-fix applied ({} lines)", name, report.lines);
            push_counts(
                &mut out,
                ("added imports", *added),
                ("uncommented imports", *uncommented),
            );
            push_changes(&mut out, changes);
            let trimmed = out.trim_end().len();
            out.truncate(trimmed);
        }
        FileOutcome::Error { message } => {
            let _ = write!(out, "{}: {}", name, message);
        }
    }
    out
}

fn push_counts(out: &mut String, added: (&str, usize), uncommented: (&str, usize)) {
    for (label, count) in [added, uncommented] {
        if count > 0 {
            let _ = writeln!(out, "  {}: {}", label, count);
        }
    }
}

fn push_changes(out: &mut String, changes: &[ChangeItem]) {
    for change in changes {
        let marker = match change {
            ChangeItem::AddImport(_) => '+',
            ChangeItem::UncommentImport(_) => '~',
        };
        let _ = writeln!(out, "    {} {}", marker, change.statement());
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

pub fn render_json(reports: &[FileReport]) -> Result<String> {
    let doc = JsonReport {
        files: reports,
        summary: Summary::from_reports(reports),
    };
    serde_json::to_string_pretty(&doc).context("failed to serialize report")
}
