//! Task detector trait.
//!
//! A detector inspects the loaded lab sources for the constructs one task
//! requires and returns a fully scored [`TaskResult`]. Detectors share no
//! state, so the order they run in does not matter.

use crate::types::TaskResult;
use crate::utilities::file_loader::LabSources;

/// A self-contained rule set for one required task.
pub trait TaskDetector {
    /// Stable task identifier (1..=6), used for ordering.
    fn id(&self) -> u32;

    /// Grade the task. Must not fail: missing inputs score zero with notes.
    fn grade(&self, sources: &LabSources) -> TaskResult;
}
