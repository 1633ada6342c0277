//! Task 4: `GET /api/songs` (newest first) and `GET /api/songs/:id`.

use crate::signatures::{
    get_song_by_id_route, get_songs_route, song_find_by_id_call, song_find_call,
    song_not_found_message, sort_newest_first,
};
use crate::traits::detector::TaskDetector;
use crate::types::{ScoreLimits, TaskResult};
use crate::utilities::file_loader::LabSources;

pub const LABEL: &str = "GET /api/songs & GET /api/songs/:id";

pub struct ReadRoutesDetector;

impl TaskDetector for ReadRoutesDetector {
    fn id(&self) -> u32 {
        4
    }

    fn grade(&self, sources: &LabSources) -> TaskResult {
        let mut task = TaskResult::new(4, LABEL, 14, ScoreLimits::STANDARD);
        let code = sources.server.as_str();

        let has_list = get_songs_route(code);
        let finds_all = song_find_call(code);
        let sorted = sort_newest_first(code);
        let has_by_id = get_song_by_id_route(code);
        let finds_by_id = song_find_by_id_call(code);
        let not_found = song_not_found_message(code);

        let mut c = 0;
        if has_list {
            c += 3;
            task.note("Found GET /api/songs route.");
        } else {
            task.note("Missing GET /api/songs route.");
        }
        if has_by_id {
            c += 2;
            task.note("Found GET /api/songs/:id route.");
        } else {
            task.note("Missing GET /api/songs/:id route.");
        }

        let mut r = 0;
        if has_list && finds_all {
            r += 3;
            task.note("GET /api/songs uses Song.find() to get data.");
        }
        if sorted {
            r += 1;
            task.note("GET /api/songs sorts by createdAt descending.");
        }
        if has_by_id && finds_by_id && not_found {
            r += 1;
            task.note("GET /api/songs/:id uses Song.findById and returns 404 when not found.");
        }

        let mut q = 0;
        if has_list && sorted {
            q += 2;
            task.note("GET /api/songs returns newest songs first (good UX / API design).");
        }
        if has_by_id && not_found {
            q += 2;
            task.note("GET /api/songs/:id returns clear \"Song not found\" message when needed.");
        }

        task.finish(c, r, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(server: &str) -> TaskResult {
        ReadRoutesDetector.grade(&LabSources::from_text("", server, None))
    }

    #[test]
    fn both_routes_complete() {
        let server = r#"
app.get("/api/songs", async (_req, res) => {
  res.json(await Song.find().sort({ createdAt: -1 }));
});
app.get("/api/songs/:id", async (req, res) => {
  const song = await Song.findById(req.params.id);
  if (!song) return res.status(404).json({ message: "Song not found" });
  res.json(song);
});
"#;
        let task = grade(server);
        assert_eq!((task.completeness, task.correctness, task.quality), (5, 5, 4));
    }

    #[test]
    fn unsorted_list_only() {
        let task = grade("app.get('/api/songs', async (req, res) => res.json(await Song.find()));");
        assert_eq!((task.completeness, task.correctness, task.quality), (3, 3, 0));
        assert_eq!(task.notes[1], "Missing GET /api/songs/:id route.");
    }

    #[test]
    fn by_id_without_not_found_message() {
        let task = grade("app.get('/api/songs/:id', async (req, res) => res.json(await Song.findById(req.params.id)));");
        assert_eq!((task.completeness, task.correctness, task.quality), (2, 0, 0));
    }
}
