//! Submission Timeliness Scorer
//!
//! Compares the resolved submission instant with the configured due date.
//! Whenever lateness cannot be established the student gets the benefit of
//! the doubt: only a submission that is provably after the due instant loses
//! marks.

use super::event::{format_instant, parse_instant};
use crate::types::SubmissionResult;
use chrono::{DateTime, Utc};

/// Marks for an on-time (or undeterminable) submission.
pub const SUBMISSION_MAX: u32 = 20;
/// Marks for a late submission.
pub const LATE_SCORE: u32 = 10;

/// Scores submission timing. Pure: the decision depends only on its inputs.
///
/// | due date | submission instant | score |
/// |---|---|---|
/// | unset | any | 20 |
/// | unparsable, or instant unresolved | any | 20 |
/// | set | `<= due` | 20 |
/// | set | `> due` | 10 |
pub fn score_submission(
    due_date: Option<&str>,
    submitted_at: Option<DateTime<Utc>>,
) -> SubmissionResult {
    let on_time = |reason: String| SubmissionResult {
        score: SUBMISSION_MAX,
        max_score: SUBMISSION_MAX,
        on_time: true,
        reason,
    };

    let Some(due_raw) = due_date else {
        return on_time(
            "LAB_DUE_DATE not configured - awarding full 20/20 submission marks by default."
                .to_string(),
        );
    };

    let (Some(due), Some(submitted)) = (parse_instant(due_raw), submitted_at) else {
        return on_time(
            "Unable to determine submission time or parse due date - awarding full 20/20 submission marks."
                .to_string(),
        );
    };

    if submitted <= due {
        on_time(format!(
            "Submission time ({}) is on or before due date ({}).",
            format_instant(&submitted),
            format_instant(&due)
        ))
    } else {
        tracing::info!(%submitted, %due, "late submission");
        SubmissionResult {
            score: LATE_SCORE,
            max_score: SUBMISSION_MAX,
            on_time: false,
            reason: format!(
                "Submission time ({}) is AFTER due date ({}) - late submission penalty applied.",
                format_instant(&submitted),
                format_instant(&due)
            ),
        }
    }
}
