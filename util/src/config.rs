//! Grader configuration.
//!
//! `GraderConfig` collects the handful of runtime settings the grader needs from
//! environment variables. Every value is optional: a missing due date disables
//! lateness penalties, a missing event path leaves the submission time
//! unresolved, and missing output paths simply skip those outputs.
//!
//! A `grader.env` file in the working directory is loaded first when present.
//! The student's own `.env` is never loaded here; it is graded, not trusted.

use std::env;
use std::path::PathBuf;

/// Name of the optional dotenv file holding grader settings.
pub const GRADER_ENV_FILE: &str = "grader.env";

/// Runtime configuration for a single grading run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraderConfig {
    /// Directory containing the lab (`server/` lives underneath it).
    pub lab_root: PathBuf,
    /// Raw due-date string, parsed later by the timeliness scorer.
    pub due_date: Option<String>,
    /// Path to the CI event descriptor JSON.
    pub event_path: Option<PathBuf>,
    /// Path of the job-summary sink for the markdown report.
    pub summary_path: Option<PathBuf>,
    /// Path for the JSON serialisation of the grade report.
    pub json_report_path: Option<PathBuf>,
    /// Filter directive for the log subscriber.
    pub log_level: String,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            lab_root: PathBuf::from("."),
            due_date: None,
            event_path: None,
            summary_path: None,
            json_report_path: None,
            log_level: "warn".into(),
        }
    }
}

impl GraderConfig {
    /// Loads `grader.env` (if present) and then reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::from_filename(GRADER_ENV_FILE).ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let config = Self {
            lab_root: get("LAB_ROOT").map(PathBuf::from).unwrap_or(defaults.lab_root),
            due_date: get("LAB_DUE_DATE"),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            summary_path: get("GITHUB_STEP_SUMMARY").map(PathBuf::from),
            json_report_path: get("GRADE_REPORT_JSON").map(PathBuf::from),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        tracing::debug!(?config, "grader configuration loaded");
        config
    }

    // --- Builder-style overrides, used for command-line flags ---

    pub fn with_lab_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.lab_root = root.into();
        self
    }

    pub fn with_due_date(mut self, due: impl Into<String>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    pub fn with_summary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_path = Some(path.into());
        self
    }

    pub fn with_json_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_report_path = Some(path.into());
        self
    }
}
