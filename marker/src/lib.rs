//! # Marker Library
//!
//! Static autograder for the Lab 7-2 RESTful API assignment. Given a checked-out
//! lab directory it inspects the student's server sources, scores six
//! implementation tasks and the submission timeliness, and produces a
//! [`GradeReport`](crate::types::GradeReport) that can be rendered for the
//! console, a CI job summary, or as JSON.
//!
//! ## Key Concepts
//! - **GradingJob**: One grading run over a lab directory.
//! - **Detectors**: One rule set per task, see [`detectors`].
//! - **Signatures**: The textual patterns detectors look for, see [`signatures`].
//! - **Scorer**: Totals the tasks and applies the flexible rounding rules.
//! - **Reports**: Console, markdown and JSON renderers, see [`report`].
//!
//! A grading run never fails. Missing files, unreadable models and malformed
//! event data all end up as zero scores or notes inside the report.

pub mod detectors;
pub mod error;
pub mod parsers;
pub mod report;
pub mod scorer;
pub mod signatures;
pub mod submission;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::submission::event::resolve_submission_time;
use crate::submission::timeliness::score_submission;
use crate::traits::detector::TaskDetector;
use crate::types::{GradeReport, SubmissionResult};
use crate::utilities::file_loader::LabSources;
use std::path::PathBuf;
use tracing::info;
use util::config::GraderConfig;
use util::paths::LabPaths;

/// A grading run for a single lab checkout.
///
/// # Example
///
/// ```no_run
/// use marker::GradingJob;
/// use util::paths::LabPaths;
///
/// let report = GradingJob::new(LabPaths::new("."))
///     .with_due_date("2025-11-20T23:59:59Z")
///     .run();
/// println!("{} / {}", report.total, report.total_max);
/// ```
pub struct GradingJob {
    paths: LabPaths,
    due_date: Option<String>,
    event_path: Option<PathBuf>,
    detectors: Vec<Box<dyn TaskDetector>>,
}

impl GradingJob {
    /// Create a job for the lab at `paths` using the six lab detectors.
    pub fn new(paths: LabPaths) -> Self {
        Self {
            paths,
            due_date: None,
            event_path: None,
            detectors: detectors::lab_detectors(),
        }
    }

    /// Create a job from resolved grader configuration.
    pub fn from_config(config: &GraderConfig) -> Self {
        let mut job = Self::new(LabPaths::new(config.lab_root.clone()));
        job.due_date = config.due_date.clone();
        job.event_path = config.event_path.clone();
        job
    }

    /// Set the due date the submission time is compared against.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Use the CI event descriptor at `path` to determine the submission time.
    pub fn with_event_descriptor(mut self, path: impl Into<PathBuf>) -> Self {
        self.event_path = Some(path.into());
        self
    }

    /// Replace the task detectors.
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn TaskDetector>>) -> Self {
        self.detectors = detectors;
        self
    }

    /// Lab layout this job grades.
    pub fn paths(&self) -> &LabPaths {
        &self.paths
    }

    /// Run the job: load the sources, grade every task and aggregate.
    pub fn run(&self) -> GradeReport {
        info!(root = %self.paths.root().display(), "grading lab");

        let sources = LabSources::load(&self.paths);
        let submitted_at = resolve_submission_time(self.event_path.as_deref());
        let submission = score_submission(self.due_date.as_deref(), submitted_at);

        grade_sources(&sources, submission, &self.detectors)
    }
}

/// Grades already loaded sources with the given detectors.
///
/// Tasks are reported in ascending id order regardless of detector order.
pub fn grade_sources(
    sources: &LabSources,
    submission: SubmissionResult,
    detectors: &[Box<dyn TaskDetector>],
) -> GradeReport {
    let mut tasks: Vec<_> = detectors.iter().map(|d| d.grade(sources)).collect();
    tasks.sort_by_key(|t| t.id);
    scorer::aggregate(submission, tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{render_console, render_markdown};
    use crate::types::{ScoreLimits, TaskResult};
    use std::fs;
    use tempfile::TempDir;

    fn fixture(name: &str) -> LabPaths {
        LabPaths::new(format!("src/test_files/lab/{name}"))
    }

    #[test]
    fn complete_lab_scores_full_marks() {
        let report = GradingJob::new(fixture("complete")).run();

        for task in &report.tasks {
            assert!(
                task.is_fully_correct(),
                "task {} scored {} / {}: {:?}",
                task.id,
                task.score,
                task.max_score,
                task.notes
            );
        }
        assert_eq!(report.implementation_raw, 80);
        assert_eq!(report.implementation_adjusted, 80);
        assert_eq!(report.fully_correct_tasks, 6);
        assert_eq!(report.submission.score, 20);
        assert_eq!(report.total, 100);
    }

    #[test]
    fn empty_lab_scores_only_submission() {
        let tmp = TempDir::new().unwrap();
        let report = GradingJob::new(LabPaths::new(tmp.path())).run();

        assert!(report.tasks.iter().all(|t| t.score == 0));
        assert_eq!(report.attempted_tasks, 0);
        assert_eq!(report.implementation_adjusted, 0);
        assert_eq!(report.total, report.submission.score);

        let schema = &report.tasks[1];
        assert!(schema.notes.iter().any(|n| n.contains("song.model.js not found")));
    }

    #[test]
    fn partial_lab_is_lifted_to_floor() {
        let report = GradingJob::new(fixture("partial")).run();

        assert_eq!(report.tasks[0].score, 2);
        assert_eq!(report.tasks[2].score, 5);
        assert_eq!(report.implementation_raw, 7);
        assert_eq!(report.attempted_tasks, 2);
        assert_eq!(report.implementation_adjusted, 50);
        assert_eq!(report.total, 70);
    }

    #[test]
    fn event_descriptor_decides_timeliness() {
        let on_time = GradingJob::new(fixture("complete"))
            .with_due_date("2025-11-20T23:59:59Z")
            .with_event_descriptor("src/test_files/lab/push_event.json")
            .run();
        assert!(on_time.submission.on_time);
        assert_eq!(on_time.total, 100);

        let late = GradingJob::new(fixture("complete"))
            .with_due_date("2025-11-20T23:00:00Z")
            .with_event_descriptor("src/test_files/lab/push_event.json")
            .run();
        assert!(!late.submission.on_time);
        assert_eq!(late.submission.score, 10);
        assert_eq!(late.total, 90);
    }

    #[test]
    fn missing_event_descriptor_awards_full_submission() {
        let report = GradingJob::new(fixture("complete"))
            .with_due_date("2025-11-20T23:59:59Z")
            .with_event_descriptor("src/test_files/lab/no_such_event.json")
            .run();
        assert_eq!(report.submission.score, 20);
        assert!(report.submission.reason.starts_with("Unable to determine"));
    }

    #[test]
    fn from_config_reads_lab_root_and_due_date() {
        let config = GraderConfig::default()
            .with_lab_root("src/test_files/lab/partial")
            .with_due_date("2025-11-20");
        let job = GradingJob::from_config(&config);

        assert_eq!(job.paths().root(), std::path::Path::new("src/test_files/lab/partial"));
        assert_eq!(job.due_date.as_deref(), Some("2025-11-20"));
    }

    struct FixedDetector(u32);

    impl TaskDetector for FixedDetector {
        fn id(&self) -> u32 {
            self.0
        }

        fn grade(&self, _sources: &LabSources) -> TaskResult {
            TaskResult::new(self.0, format!("task {}", self.0), 14, ScoreLimits::STANDARD)
                .finish(5, 5, 4)
        }
    }

    #[test]
    fn tasks_are_reported_in_id_order() {
        let sources = LabSources::from_text("", "", None);
        let detectors: Vec<Box<dyn TaskDetector>> =
            vec![Box::new(FixedDetector(3)), Box::new(FixedDetector(1))];
        let submission = score_submission(None, None);

        let report = grade_sources(&sources, submission, &detectors);
        let ids: Vec<u32> = report.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn rendering_the_same_lab_twice_is_identical() {
        let tmp = TempDir::new().unwrap();
        let server = tmp.path().join("server");
        fs::create_dir_all(&server).unwrap();
        fs::write(server.join(".env"), "MONGO_URL=mongodb://localhost/songs\n").unwrap();

        let first = GradingJob::new(LabPaths::new(tmp.path())).run();
        let second = GradingJob::new(LabPaths::new(tmp.path())).run();
        assert_eq!(render_console(&first), render_console(&second));
        assert_eq!(render_markdown(&first), render_markdown(&second));
    }
}
