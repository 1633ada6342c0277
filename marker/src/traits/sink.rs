//! Summary sink trait.
//!
//! The rendered markdown summary is handed to a [`SummarySink`]. The grader
//! writes it to the CI job-summary file, but tests and other front ends can
//! capture it anywhere.

use crate::error::MarkerError;

/// Destination for the structured summary document.
pub trait SummarySink {
    /// Store `document`, replacing anything written before.
    fn write_summary(&self, document: &str) -> Result<(), MarkerError>;
}
