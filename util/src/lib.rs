//! Shared configuration and filesystem layout helpers for the lab grader.

pub mod config;
pub mod paths;
