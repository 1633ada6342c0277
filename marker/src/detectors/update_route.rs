//! Task 5: `PUT /api/songs/:id` updates a song with validation.

use crate::signatures::{
    guarded_update, put_song_route, song_not_found_message, song_update_call, status_400,
    update_returns_validated_doc,
};
use crate::traits::detector::TaskDetector;
use crate::types::{ScoreLimits, TaskResult};
use crate::utilities::file_loader::LabSources;

pub const LABEL: &str = "PUT /api/songs/:id (update)";

pub struct UpdateRouteDetector;

impl TaskDetector for UpdateRouteDetector {
    fn id(&self) -> u32 {
        5
    }

    fn grade(&self, sources: &LabSources) -> TaskResult {
        let mut task = TaskResult::new(5, LABEL, 14, ScoreLimits::STANDARD);
        let code = sources.server.as_str();

        let has_route = put_song_route(code);
        let updates = song_update_call(code);

        let c = if has_route && updates {
            task.note("Found PUT /api/songs/:id route using Song.findByIdAndUpdate.");
            5
        } else if has_route {
            task.note("Found PUT /api/songs/:id route, but Song.findByIdAndUpdate not clearly detected.");
            3
        } else {
            0
        };

        let r = if has_route && updates && update_returns_validated_doc(code) {
            task.note("PUT /api/songs/:id uses (new:true, runValidators:true) in findByIdAndUpdate.");
            5
        } else if has_route && updates {
            task.note(
                "PUT /api/songs/:id uses findByIdAndUpdate but without full options (new:true, runValidators:true).",
            );
            3
        } else {
            0
        };

        let mut q = 0;
        if has_route && song_not_found_message(code) {
            q += 2;
            task.note("PUT /api/songs/:id returns 404 with \"Song not found\" when ID is invalid.");
        }
        if guarded_update(code) && status_400(code) {
            q += 2;
            task.note("PUT /api/songs/:id handler uses try/catch and returns 400 on validation errors.");
        }

        task.finish(c, r, q)
    }
}
