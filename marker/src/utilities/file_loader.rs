//!
//! File Loader Utility
//!
//! Loads the three student inputs a grading run inspects: the server `.env`,
//! the route file `index.js`, and the Song model. Unlike most loaders, nothing
//! here fails outright. A missing or unreadable text file becomes empty text,
//! and a model that cannot be inspected is kept as the [`MarkerError`] that
//! explains why, so the schema task can report it to the student.

use crate::error::MarkerError;
use crate::parsers::schema_parser::{ModelSchema, ModelSchemaParser};
use crate::traits::parser::Parser;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use util::paths::LabPaths;

/// Name the model must be registered under.
pub const MODEL_NAME: &str = "Song";

/// Maximum size of a student source file that will be read.
const MAX_SOURCE_SIZE: u64 = 2 * 1024 * 1024; // 2MB

/// Snapshot of the student's lab inputs.
#[derive(Debug, Clone)]
pub struct LabSources {
    /// Contents of `server/.env`, empty when absent.
    pub env: String,
    /// Contents of `server/index.js`, empty when absent.
    pub server: String,
    /// Inspected Song model, or why inspection failed.
    pub model: Result<ModelSchema, MarkerError>,
    /// Text inputs that exist on disk but were graded as empty, one message each.
    pub unreadable: Vec<String>,
}

impl LabSources {
    /// Build sources from in-memory text. `model_source` of `None` means the
    /// model file does not exist.
    pub fn from_text(env: &str, server: &str, model_source: Option<&str>) -> Self {
        let model = match model_source {
            Some(source) => ModelSchemaParser::new(MODEL_NAME).parse(source),
            None => Err(MarkerError::IoError(
                "song.model.js not found at server/models/song.model.js.".to_string(),
            )),
        };

        Self {
            env: env.to_string(),
            server: server.to_string(),
            model,
            unreadable: Vec::new(),
        }
    }

    /// Read every input from the lab directory.
    pub fn load(paths: &LabPaths) -> Self {
        let mut unreadable = Vec::new();
        let env = read_or_empty(paths, &paths.env_file(), &mut unreadable);
        let server = read_or_empty(paths, &paths.index_file(), &mut unreadable);

        let model_path = paths.model_file();
        let model = read_source(&model_path).and_then(|source| {
            ModelSchemaParser::new(MODEL_NAME).parse(source.as_str())
        });
        let model = model.map_err(|e| match e {
            MarkerError::IoError(_) => MarkerError::IoError(format!(
                "{} not found or unreadable at {}.",
                model_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                paths.display_relative(&model_path)
            )),
            other => other,
        });

        if let Err(e) = &model {
            warn!("model inspection failed: {e}");
        }

        Self {
            env,
            server,
            model,
            unreadable,
        }
    }
}

/// Reads a text input, falling back to empty text.
///
/// A missing file is plain absence. A file that exists but cannot be read
/// (oversized, a directory, permission denied) is recorded in `unreadable`.
fn read_or_empty(paths: &LabPaths, path: &Path, unreadable: &mut Vec<String>) -> String {
    match read_source(path) {
        Ok(text) => text,
        Err(e) => {
            if path.exists() {
                warn!("{e}");
                unreadable.push(format!(
                    "{} could not be read and was graded as empty ({e}).",
                    paths.display_relative(path)
                ));
            }
            String::new()
        }
    }
}

/// Checks that a file exists, is a regular file and is not oversized.
///
/// # Errors
///
/// Returns [`MarkerError::IoError`] if the file is missing, not a file, unreadable, or too large.
fn check_file(path: &Path) -> Result<(), MarkerError> {
    if !path.exists() {
        return Err(MarkerError::IoError(format!("File not found: {}", path.display())));
    }

    if !path.is_file() {
        return Err(MarkerError::IoError(format!("Not a file: {}", path.display())));
    }

    let metadata = fs::metadata(path)
        .map_err(|_| MarkerError::IoError(format!("File unreadable: {}", path.display())))?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(MarkerError::IoError(format!(
            "File too large: {} ({} bytes)",
            path.display(),
            metadata.len()
        )));
    }

    Ok(())
}

/// Reads a student source file as UTF-8 (lossily).
pub fn read_source(path: &Path) -> Result<String, MarkerError> {
    check_file(path).inspect_err(|e| debug!("{e}"))?;
    let bytes = fs::read(path)
        .map_err(|e| MarkerError::IoError(format!("{}: {}", path.display(), e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
