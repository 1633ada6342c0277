//!
//! Traits Module
//!
//! Core traits used throughout the marker at its extension seams.
//!
//! - [`detector`]: One rule set that grades a single required task.
//! - [`parser`]: Generic trait for turning raw input into typed structures.
//! - [`sink`]: Destination for the rendered summary document.

pub mod detector;
pub mod parser;
pub mod sink;
