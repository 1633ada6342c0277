//! # Types Module
//!
//! Core data structures shared by the detectors, the aggregator and the
//! renderers. Everything here is created fresh for a grading run and only read
//! after the detectors finish.

use serde::Serialize;

/// Per-dimension point ceilings for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLimits {
    pub completeness: u32,
    pub correctness: u32,
    pub quality: u32,
}

impl ScoreLimits {
    /// Ceilings used by tasks 1 to 5 (5 / 5 / 4).
    pub const STANDARD: ScoreLimits = ScoreLimits {
        completeness: 5,
        correctness: 5,
        quality: 4,
    };

    /// Ceilings used by the delete task (4 / 3 / 3).
    pub const COMPACT: ScoreLimits = ScoreLimits {
        completeness: 4,
        correctness: 3,
        quality: 3,
    };

    pub fn total(&self) -> u32 {
        self.completeness + self.correctness + self.quality
    }
}

/// The outcome of one task detector.
///
/// `score` always equals the clamped sum of the three sub-scores, each of which
/// is clamped to its own ceiling first. Use [`TaskResult::finish`] to set them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub id: u32,
    pub label: String,
    pub max_score: u32,
    #[serde(skip)]
    pub limits: ScoreLimits,
    pub completeness: u32,
    pub correctness: u32,
    pub quality: u32,
    pub score: u32,
    /// Observations in detection order.
    pub notes: Vec<String>,
}

impl TaskResult {
    pub fn new(id: u32, label: impl Into<String>, max_score: u32, limits: ScoreLimits) -> Self {
        Self {
            id,
            label: label.into(),
            max_score,
            limits,
            completeness: 0,
            correctness: 0,
            quality: 0,
            score: 0,
            notes: Vec::new(),
        }
    }

    /// Append an observation.
    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    /// Record the three sub-scores, clamping each and then the total.
    pub fn finish(mut self, completeness: u32, correctness: u32, quality: u32) -> Self {
        self.completeness = completeness.min(self.limits.completeness);
        self.correctness = correctness.min(self.limits.correctness);
        self.quality = quality.min(self.limits.quality);
        self.score = (self.completeness + self.correctness + self.quality).min(self.max_score);
        tracing::info!(
            task = self.id,
            score = self.score,
            max = self.max_score,
            "task graded"
        );
        self
    }

    pub fn is_attempted(&self) -> bool {
        self.score > 0
    }

    pub fn is_fully_correct(&self) -> bool {
        self.score == self.max_score
    }
}

/// Timeliness outcome for the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub score: u32,
    pub max_score: u32,
    pub on_time: bool,
    pub reason: String,
}

/// The aggregate root of a grading run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub submission: SubmissionResult,
    pub tasks: Vec<TaskResult>,
    pub implementation_raw: u32,
    pub implementation_adjusted: u32,
    pub implementation_max: u32,
    pub attempted_tasks: u32,
    pub fully_correct_tasks: u32,
    pub total: u32,
    pub total_max: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_clamps_each_dimension_before_summing() {
        let task = TaskResult::new(1, "T", 14, ScoreLimits::STANDARD).finish(9, 7, 6);
        assert_eq!(task.completeness, 5);
        assert_eq!(task.correctness, 5);
        assert_eq!(task.quality, 4);
        assert_eq!(task.score, 14);
        assert!(task.is_fully_correct());
    }

    #[test]
    fn finish_clamps_total_to_max_score() {
        // A ceiling set larger than the task maximum still cannot exceed it.
        let limits = ScoreLimits {
            completeness: 10,
            correctness: 10,
            quality: 10,
        };
        let task = TaskResult::new(6, "T", 10, limits).finish(8, 8, 8);
        assert_eq!(task.score, 10);
    }

    #[test]
    fn zero_scores_are_not_attempted() {
        let task = TaskResult::new(3, "T", 14, ScoreLimits::STANDARD).finish(0, 0, 0);
        assert!(!task.is_attempted());
        assert!(!task.is_fully_correct());
    }

    #[test]
    fn limits_sum_to_task_maxima() {
        assert_eq!(ScoreLimits::STANDARD.total(), 14);
        assert_eq!(ScoreLimits::COMPACT.total(), 10);
    }

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let mut task = TaskResult::new(2, "Schema", 14, ScoreLimits::STANDARD);
        task.note("Found 'title' field in Song schema.");
        let task = task.finish(2, 0, 0);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["maxScore"], 14);
        assert_eq!(value["score"], 2);
        assert_eq!(value["notes"][0], "Found 'title' field in Song schema.");
        assert!(value.get("limits").is_none());
    }
}
