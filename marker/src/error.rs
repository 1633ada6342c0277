//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which covers the ways a grading
//! step can fail: unreadable inputs, malformed JSON, a model file that cannot be
//! inspected, and output sinks that refuse writes.
//!
//! None of these ever escape a grading run. Each is converted into data (an
//! absent input, a zero score with a note, or a skipped output) by the caller.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn require_schema(source: &str) -> Result<(), MarkerError> {
//!     if !source.contains("Schema(") {
//!         return Err(MarkerError::ParseSchemaError("no Schema(...) call".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_schema("const x = 1;").is_err());
//! ```

use std::fmt;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    /// I/O error (file not found, unreadable, etc.).
    IoError(String),
    /// JSON is malformed or does not match expected shape.
    InvalidJson(String),
    /// A required field is missing from input.
    MissingField(String),
    /// A date or timestamp string could not be parsed.
    InvalidTimestamp(String),
    /// The data-model source could not be statically inspected.
    ParseSchemaError(String),
    /// Writing an output document failed.
    SinkError(String),
}

impl fmt::Display for MarkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerError::IoError(msg) => write!(f, "I/O error: {msg}"),
            MarkerError::InvalidJson(msg) => write!(f, "invalid JSON: {msg}"),
            MarkerError::MissingField(msg) => write!(f, "missing field: {msg}"),
            MarkerError::InvalidTimestamp(msg) => write!(f, "invalid timestamp: {msg}"),
            MarkerError::ParseSchemaError(msg) => write!(f, "schema inspection failed: {msg}"),
            MarkerError::SinkError(msg) => write!(f, "output sink failed: {msg}"),
        }
    }
}

impl std::error::Error for MarkerError {}
