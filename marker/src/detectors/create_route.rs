//! Task 3: `POST /api/songs` creates a song.

use crate::signatures::{guarded_create, post_songs_route, song_create_call, status_201, status_400};
use crate::traits::detector::TaskDetector;
use crate::types::{ScoreLimits, TaskResult};
use crate::utilities::file_loader::LabSources;

pub const LABEL: &str = "POST /api/songs (create)";

pub struct CreateRouteDetector;

impl TaskDetector for CreateRouteDetector {
    fn id(&self) -> u32 {
        3
    }

    fn grade(&self, sources: &LabSources) -> TaskResult {
        let mut task = TaskResult::new(3, LABEL, 14, ScoreLimits::STANDARD);
        let code = sources.server.as_str();

        let has_route = post_songs_route(code);
        let creates = song_create_call(code);
        let has_201 = status_201(code);
        let has_400 = status_400(code);

        let c = match (has_route, creates) {
            (true, true) => {
                task.note("Found POST /api/songs route using Song.create(...) (good).");
                5
            }
            (true, false) => {
                task.note("Found POST /api/songs route, but Song.create(...) not clearly detected.");
                3
            }
            (false, true) => {
                task.note("Found Song.create(...) but POST /api/songs route not clearly detected.");
                2
            }
            (false, false) => 0,
        };

        let r = if has_route && creates && has_201 {
            task.note("POST /api/songs sends 201 status when creating a song.");
            5
        } else if has_route && creates {
            task.note("POST /api/songs uses Song.create but 201 status code not clearly detected.");
            3
        } else {
            0
        };
        if has_400 {
            task.note("Found 400 status usage (validation/error handling).");
        }

        let q = if guarded_create(code) && has_400 {
            task.note("POST handler wraps Song.create in try/catch and returns 400 on errors.");
            4
        } else if has_route {
            task.note("POST handler exists but error handling could be more robust.");
            2
        } else {
            0
        };

        task.finish(c, r, q)
    }
}
