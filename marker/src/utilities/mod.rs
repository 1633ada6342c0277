//! # Utilities
//!
//! Helpers shared across the `marker` crate.
//!
//! - [`file_loader`]: Reads the student's lab files into a [`file_loader::LabSources`]
//!   snapshot, degrading unreadable inputs to absence.

pub mod file_loader;
