//! # Grade Report Rendering
//!
//! Turns a finished [`GradeReport`] into the documents a student sees:
//!
//! - [`render_console`]: the plain-text report printed to stdout.
//! - [`render_markdown`]: the job-summary document, total score first.
//! - [`render_json`]: the report as JSON, for other tooling.
//!
//! Rendering is deterministic and never fails on missing optional text; an
//! empty reason or an empty note list simply drops that part of a section.
//!
//! ## Console layout
//!
//! ```text
//! ==============================================
//!  SWE 363 - Lab 7-2 RESTful APIs: Grade Report
//! ==============================================
//!
//! Submission (20 marks)
//! ---------------------
//! Score: 20 / 20 (on time)
//! Note: ...
//!
//! Implementation (80 marks)
//! ...
//! ```

use crate::error::MarkerError;
use crate::traits::sink::SummarySink;
use crate::types::GradeReport;
use std::fs;
use std::path::PathBuf;

pub const LAB_TITLE: &str = "SWE 363 - Lab 7-2 RESTful APIs";

/// Renders the plain-text console report.
pub fn render_console(report: &GradeReport) -> String {
    let submission = &report.submission;
    let task_count = report.tasks.len();
    let mut lines: Vec<String> = Vec::new();

    lines.push("==============================================".into());
    lines.push(format!(" {LAB_TITLE}: Grade Report"));
    lines.push("==============================================".into());
    lines.push(String::new());

    lines.push(format!("Submission ({} marks)", submission.max_score));
    lines.push("---------------------".into());
    lines.push(format!(
        "Score: {} / {} {}",
        submission.score,
        submission.max_score,
        if submission.on_time { "(on time)" } else { "(late)" }
    ));
    if !submission.reason.is_empty() {
        lines.push(format!("Note: {}", submission.reason));
    }
    lines.push(String::new());

    lines.push(format!("Implementation ({} marks)", report.implementation_max));
    lines.push("-------------------------".into());
    lines.push(format!(
        "Raw implementation score:      {} / {}",
        report.implementation_raw, report.implementation_max
    ));
    let flexible = if report.implementation_raw != report.implementation_adjusted {
        " (flexible rules applied)"
    } else {
        ""
    };
    lines.push(format!(
        "Adjusted implementation score: {} / {}{flexible}",
        report.implementation_adjusted, report.implementation_max
    ));
    lines.push(format!("Tasks attempted: {} / {task_count}", report.attempted_tasks));
    lines.push(format!(
        "Tasks fully correct: {} / {task_count}",
        report.fully_correct_tasks
    ));
    lines.push(String::new());

    for task in &report.tasks {
        lines.push(format!("Task {}: {}", task.id, task.label));
        lines.push(format!(
            "  Score: {} / {} (Completeness: {}, Correctness: {}, Quality: {})",
            task.score, task.max_score, task.completeness, task.correctness, task.quality
        ));
        if !task.notes.is_empty() {
            lines.push("  Details:".into());
            lines.extend(task.notes.iter().map(|n| format!("    - {n}")));
        }
        lines.push(String::new());
    }

    lines.push("Overall Result".into());
    lines.push("--------------".into());
    lines.push(format!(
        "Total score: {} / {} (Submission: {}, Implementation: {})",
        report.total, report.total_max, submission.score, report.implementation_adjusted
    ));
    lines.push(String::new());

    lines.join("\n")
}

/// Renders the markdown job summary. The total comes first.
pub fn render_markdown(report: &GradeReport) -> String {
    let submission = &report.submission;
    let mut md: Vec<String> = Vec::new();

    md.push(format!("# {LAB_TITLE} - Auto Grade Report"));
    md.push(String::new());
    md.push(format!(
        "## **Total score: `{} / {}`**",
        report.total, report.total_max
    ));
    md.push(String::new());

    md.push(format!("## Submission ({} marks)", submission.max_score));
    md.push(format!(
        "- **Score:** {} / {}",
        submission.score, submission.max_score
    ));
    if !submission.reason.is_empty() {
        md.push(format!("- {}", submission.reason));
    }
    md.push(String::new());

    md.push(format!("## Implementation ({} marks)", report.implementation_max));
    md.push(format!(
        "- **Score:** {} / {}",
        report.implementation_adjusted, report.implementation_max
    ));
    md.push(String::new());

    md.push("## Task Breakdown".into());
    for task in &report.tasks {
        md.push(format!("### Task {}: {}", task.id, task.label));
        md.push(format!(
            "**Score:** {} / {} (C: {}, Corr: {}, Q: {})",
            task.score, task.max_score, task.completeness, task.correctness, task.quality
        ));
        if !task.notes.is_empty() {
            md.push("**Details:**".into());
            md.extend(task.notes.iter().map(|n| format!("- {n}")));
        }
        md.push(String::new());
    }

    md.join("\n")
}

/// Serialises the report as pretty JSON with camelCase keys.
pub fn render_json(report: &GradeReport) -> Result<String, MarkerError> {
    serde_json::to_string_pretty(report).map_err(|e| MarkerError::InvalidJson(e.to_string()))
}

/// Writes the summary to a file, overwriting previous content.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SummarySink for FileSink {
    fn write_summary(&self, document: &str) -> Result<(), MarkerError> {
        fs::write(&self.path, document)
            .map_err(|e| MarkerError::SinkError(format!("{}: {e}", self.path.display())))
    }
}

/// Hands the markdown summary to `sink` if one is configured.
///
/// A missing sink is not an error, and a failing sink is only logged.
/// Returns whether the summary was written.
pub fn publish_summary(report: &GradeReport, sink: Option<&dyn SummarySink>) -> bool {
    let Some(sink) = sink else {
        tracing::debug!("no summary sink configured; skipping job summary");
        return false;
    };

    match sink.write_summary(&render_markdown(report)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("could not write job summary: {e}");
            false
        }
    }
}
