//! # Scorer Module
//!
//! Aggregates the six task results and the submission result into a
//! [`GradeReport`], applying the lab's "flexible rounding" rules to the
//! implementation part:
//!
//! 1. No task attempted (every score 0): 0.
//! 2. Every task fully correct: the full 80, whatever the raw sum.
//! 3. Raw sum below 50: raised to 50.
//! 4. Otherwise the raw sum, unchanged.
//!
//! The result is finally clamped to `[0, 80]`.
//!
//! The floor applies to any attempt at all, even a single point.

use crate::types::{GradeReport, SubmissionResult, TaskResult};

/// Ceiling of the implementation part.
pub const IMPLEMENTATION_MAX: u32 = 80;
/// Minimum implementation score once anything has been attempted.
pub const ATTEMPT_FLOOR: u32 = 50;
/// Ceiling of the whole grade.
pub const TOTAL_MAX: u32 = 100;

/// Applies the flexible-rounding rules to a raw implementation score.
///
/// # Example
///
/// ```
/// use marker::scorer::apply_flexible_rounding;
///
/// assert_eq!(apply_flexible_rounding(0, 0, 0, 6), 0);
/// assert_eq!(apply_flexible_rounding(1, 1, 0, 6), 50);
/// assert_eq!(apply_flexible_rounding(62, 5, 3, 6), 62);
/// assert_eq!(apply_flexible_rounding(78, 6, 6, 6), 80);
/// ```
pub fn apply_flexible_rounding(
    raw: u32,
    attempted: u32,
    fully_correct: u32,
    task_count: u32,
) -> u32 {
    let adjusted = if attempted == 0 {
        0
    } else if fully_correct == task_count {
        IMPLEMENTATION_MAX
    } else if raw < ATTEMPT_FLOOR {
        ATTEMPT_FLOOR
    } else {
        raw
    };

    adjusted.min(IMPLEMENTATION_MAX)
}

/// Builds the final report from the submission result and the task results.
///
/// `tasks` is expected in task order; it is stored as given.
pub fn aggregate(submission: SubmissionResult, tasks: Vec<TaskResult>) -> GradeReport {
    let implementation_raw: u32 = tasks.iter().map(|t| t.score).sum();
    let attempted_tasks = tasks.iter().filter(|t| t.is_attempted()).count() as u32;
    let fully_correct_tasks = tasks.iter().filter(|t| t.is_fully_correct()).count() as u32;

    let implementation_adjusted = apply_flexible_rounding(
        implementation_raw,
        attempted_tasks,
        fully_correct_tasks,
        tasks.len() as u32,
    );
    let total = submission.score + implementation_adjusted;

    tracing::info!(
        raw = implementation_raw,
        adjusted = implementation_adjusted,
        attempted = attempted_tasks,
        fully_correct = fully_correct_tasks,
        total,
        "grade aggregated"
    );

    GradeReport {
        submission,
        tasks,
        implementation_raw,
        implementation_adjusted,
        implementation_max: IMPLEMENTATION_MAX,
        attempted_tasks,
        fully_correct_tasks,
        total,
        total_max: TOTAL_MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreLimits;

    fn on_time() -> SubmissionResult {
        SubmissionResult {
            score: 20,
            max_score: 20,
            on_time: true,
            reason: String::new(),
        }
    }

    fn task(id: u32, max: u32, c: u32, r: u32, q: u32) -> TaskResult {
        let limits = if max == 10 {
            ScoreLimits::COMPACT
        } else {
            ScoreLimits::STANDARD
        };
        TaskResult::new(id, format!("Task {id}"), max, limits).finish(c, r, q)
    }

    fn zero_tasks() -> Vec<TaskResult> {
        (1..=5)
            .map(|id| task(id, 14, 0, 0, 0))
            .chain(std::iter::once(task(6, 10, 0, 0, 0)))
            .collect()
    }

    fn perfect_tasks() -> Vec<TaskResult> {
        (1..=5)
            .map(|id| task(id, 14, 5, 5, 4))
            .chain(std::iter::once(task(6, 10, 4, 3, 3)))
            .collect()
    }

    #[test]
    fn nothing_attempted_scores_zero() {
        let report = aggregate(on_time(), zero_tasks());
        assert_eq!(report.implementation_raw, 0);
        assert_eq!(report.implementation_adjusted, 0);
        assert_eq!(report.attempted_tasks, 0);
        assert_eq!(report.total, 20);
    }

    #[test]
    fn single_point_is_raised_to_floor() {
        let mut tasks = zero_tasks();
        tasks[5] = task(6, 10, 0, 0, 1);
        let report = aggregate(on_time(), tasks);
        assert_eq!(report.implementation_raw, 1);
        assert_eq!(report.attempted_tasks, 1);
        assert_eq!(report.implementation_adjusted, 50);
        assert_eq!(report.total, 70);
    }

    #[test]
    fn raw_at_or_above_floor_is_unchanged() {
        // 14 + 14 + 14 + 10 + 10 + 0 = 62, four tasks short of full marks.
        let tasks = vec![
            task(1, 14, 5, 5, 4),
            task(2, 14, 5, 5, 4),
            task(3, 14, 5, 5, 4),
            task(4, 14, 5, 5, 0),
            task(5, 14, 5, 5, 0),
            task(6, 10, 0, 0, 0),
        ];
        let report = aggregate(on_time(), tasks);
        assert_eq!(report.implementation_raw, 62);
        assert_eq!(report.fully_correct_tasks, 3);
        assert_eq!(report.implementation_adjusted, 62);
    }

    #[test]
    fn exactly_fifty_is_unchanged() {
        assert_eq!(apply_flexible_rounding(50, 4, 2, 6), 50);
        assert_eq!(apply_flexible_rounding(49, 4, 2, 6), 50);
    }

    #[test]
    fn all_fully_correct_earns_full_marks() {
        let report = aggregate(on_time(), perfect_tasks());
        assert_eq!(report.implementation_raw, 80);
        assert_eq!(report.fully_correct_tasks, 6);
        assert_eq!(report.implementation_adjusted, 80);
        assert_eq!(report.total, 100);
        assert_eq!(report.total_max, 100);
    }

    #[test]
    fn full_correctness_overrides_raw_arithmetic() {
        assert_eq!(apply_flexible_rounding(70, 6, 6, 6), 80);
    }

    #[test]
    fn adjusted_never_exceeds_ceiling() {
        for raw in [0, 1, 49, 50, 79, 80, 200] {
            for attempted in 0..=6 {
                for fully_correct in 0..=attempted {
                    let adjusted = apply_flexible_rounding(raw, attempted, fully_correct, 6);
                    assert!(adjusted <= IMPLEMENTATION_MAX);
                }
            }
        }
    }

    #[test]
    fn late_submission_adds_half_marks() {
        let late = SubmissionResult {
            score: 10,
            max_score: 20,
            on_time: false,
            reason: "late".into(),
        };
        let report = aggregate(late, zero_tasks());
        assert_eq!(report.total, 10);
    }
}
