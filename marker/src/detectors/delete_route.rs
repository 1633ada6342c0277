//! Task 6: `DELETE /api/songs/:id` removes a song.

use crate::signatures::{delete_song_route, song_delete_call, song_not_found_message, status_204};
use crate::traits::detector::TaskDetector;
use crate::types::{ScoreLimits, TaskResult};
use crate::utilities::file_loader::LabSources;

pub const LABEL: &str = "DELETE /api/songs/:id (delete)";

pub struct DeleteRouteDetector;

impl TaskDetector for DeleteRouteDetector {
    fn id(&self) -> u32 {
        6
    }

    fn grade(&self, sources: &LabSources) -> TaskResult {
        let mut task = TaskResult::new(6, LABEL, 10, ScoreLimits::COMPACT);
        let code = sources.server.as_str();

        let has_route = delete_song_route(code);
        let deletes = song_delete_call(code);

        let c = if has_route && deletes {
            task.note("Found DELETE /api/songs/:id route using Song.findByIdAndDelete.");
            4
        } else if has_route {
            task.note("Found DELETE /api/songs/:id route, but Song.findByIdAndDelete not clearly detected.");
            2
        } else {
            0
        };

        let r = if has_route && deletes && status_204(code) {
            task.note("DELETE /api/songs/:id returns 204 No Content on successful deletion.");
            3
        } else if has_route && deletes {
            task.note("DELETE /api/songs/:id uses Song.findByIdAndDelete but 204 status not clearly detected.");
            2
        } else {
            0
        };

        let mut q = 0;
        if has_route && song_not_found_message(code) {
            q += 2;
            task.note("DELETE /api/songs/:id returns 404 with \"Song not found\" when ID is invalid.");
        }
        if has_route {
            q += 1;
            task.note("DELETE handler exists with basic error handling / response logic.");
        }

        task.finish(c, r, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(server: &str) -> TaskResult {
        DeleteRouteDetector.grade(&LabSources::from_text("", server, None))
    }

    #[test]
    fn complete_handler_scores_full_marks() {
        let server = r#"
app.delete("/api/songs/:id", async (req, res) => {
  const deleted = await Song.findByIdAndDelete(req.params.id);
  if (!deleted) return res.status(404).json({ message: "Song not found" });
  res.status(204).end();
});
"#;
        let task = grade(server);
        assert_eq!((task.completeness, task.correctness, task.quality), (4, 3, 3));
        assert_eq!(task.score, 10);
        assert!(task.is_fully_correct());
    }

    #[test]
    fn bare_route_earns_existence_points() {
        let task = grade("app.delete('/api/songs/:id', (req, res) => res.end());");
        assert_eq!((task.completeness, task.correctness, task.quality), (2, 0, 1));
    }

    #[test]
    fn no_route_no_points_even_with_message() {
        let task = grade("const msg = 'Song not found'; Song.findByIdAndDelete(id);");
        assert_eq!(task.score, 0);
        assert!(task.notes.is_empty());
    }
}
