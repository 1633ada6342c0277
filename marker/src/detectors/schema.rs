//! Task 2: the Song schema and model.
//!
//! Works on the statically inspected [`ModelSchema`] rather than on raw text.
//! When the model could not be inspected at all the task scores zero, with the
//! reason as a note; no partial credit is guessed from an unreadable file.

use crate::parsers::schema_parser::{FieldKind, FieldSpec, ModelSchema};
use crate::traits::detector::TaskDetector;
use crate::types::{ScoreLimits, TaskResult};
use crate::utilities::file_loader::LabSources;

pub const LABEL: &str = "Song schema & model (\"Song\")";

pub struct SchemaDetector;

impl TaskDetector for SchemaDetector {
    fn id(&self) -> u32 {
        2
    }

    fn grade(&self, sources: &LabSources) -> TaskResult {
        let mut task = TaskResult::new(2, LABEL, 14, ScoreLimits::STANDARD);

        let schema = match &sources.model {
            Ok(schema) => schema,
            Err(e) => {
                task.note(e.to_string());
                task.note(
                    "Song model could not be inspected - schema/model might be missing or incorrectly exported.",
                );
                return task.finish(0, 0, 0);
            }
        };

        let (c, r, q) = score_schema(schema, &mut task);
        task.finish(c, r, q)
    }
}

fn is_kind(field: Option<&FieldSpec>, kind: FieldKind) -> bool {
    field.is_some_and(|f| f.kind == kind)
}

fn score_schema(schema: &ModelSchema, task: &mut TaskResult) -> (u32, u32, u32) {
    let title = schema.field("title");
    let artist = schema.field("artist");
    let year = schema.field("year");

    // Completeness
    let mut c = 0;
    for (field, name, points) in [(title, "title", 2), (artist, "artist", 2), (year, "year", 1)] {
        if field.is_some() {
            c += points;
            task.note(format!("Found '{name}' field in Song schema."));
        } else {
            task.note(format!("Missing '{name}' field in Song schema."));
        }
    }

    // Correctness
    let mut r = 0;
    if is_kind(title, FieldKind::String) && title.is_some_and(|f| f.required) {
        r += 2;
        task.note("title: String with required:true (matches specification).");
    }
    if is_kind(artist, FieldKind::String) && artist.is_some_and(|f| f.required) {
        r += 2;
        task.note("artist: String with required:true (matches specification).");
    }
    if is_kind(year, FieldKind::Number) {
        r += 1;
        task.note("year: Number (matches specification).");
    }

    // Quality
    let mut q = 0;
    if schema.timestamps {
        q += 2;
        task.note("Schema uses timestamps: true.");
    }
    if title.is_some_and(|f| f.trim) && artist.is_some_and(|f| f.trim) {
        q += 1;
        task.note("title and artist fields use trim: true.");
    }
    if year.is_some_and(|f| f.min && f.max) {
        q += 1;
        task.note("year field has min & max validators.");
    }

    (c, r, q)
}
