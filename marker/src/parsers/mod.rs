//! # Parsers
//!
//! Parsers that turn raw student artefacts into typed structures.
//!
//! - [`schema_parser`]: Static inspection of a Mongoose model file, yielding
//!   the declared fields, their primitive kinds and validation options.

pub mod schema_parser;
