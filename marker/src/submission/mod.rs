//! # Submission timing
//!
//! - [`event`]: Resolves the submission instant from a CI event descriptor.
//! - [`timeliness`]: Scores the submission against the configured due date.

pub mod event;
pub mod timeliness;
