//! Signatures
//!
//! A signature is a named boolean predicate over source text that reports
//! whether one required construct is present. Detection is textual: a
//! signature sees whether the construct is written, not whether it runs. A
//! student can defeat one with a cosmetic rewrite, which is why each predicate
//! is kept narrow. Supporting a new equivalent style means widening one
//! pattern here without touching any scoring weights.
//!
//! Patterns are compiled once, on first use.

use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! signature {
    ($(#[$meta:meta])* $name:ident => $pattern:expr) => {
        $(#[$meta])*
        pub fn $name(source: &str) -> bool {
            static RE: Lazy<Regex> = Lazy::new(|| Regex::new($pattern).unwrap());
            let matched = RE.is_match(source);
            tracing::debug!(signature = stringify!($name), matched);
            matched
        }
    };
}

// Closing brace of a `try` block followed by its handler, with or without a binding.
macro_rules! guarded {
    ($call:literal) => {
        concat!(r"try\s*\{[\s\S]*", $call, r"[\s\S]*\}\s*catch\s*[({]")
    };
}

// ---------------------------- server/.env ----------------------------

signature! {
    /// `MONGO_URL=` assignment.
    env_mongo_url => r"MONGO_URL\s*="
}

signature! {
    /// `<db_username>` or `<db_password>` template placeholders left in place.
    env_placeholder => r"(?i)<\s*db_username\s*>|<\s*db_password\s*>"
}

// ------------------------- database connection -------------------------

signature! {
    /// `mongoose.connect(process.env.MONGO_URL ...` or a `connectDB` helper fed the same value.
    connect_with_env_url => r"(?:mongoose\.connect|connectDB)\s*\(\s*process\.env\.MONGO_URL"
}

signature! {
    connected_log => r"(?i)Mongo connected"
}

signature! {
    connection_error_log => r"(?i)Connection error"
}

signature! {
    /// Connect call inside `try { ... } catch`.
    guarded_connect => guarded!(r"(?:mongoose\.connect|connectDB)\s*\(")
}

// ---------------------------- status codes ----------------------------

signature! {
    status_201 => r"\.status\s*\(\s*201\s*\)"
}

signature! {
    status_204 => r"\.status\s*\(\s*204\s*\)"
}

signature! {
    status_400 => r"\.status\s*\(\s*400\s*\)"
}

signature! {
    /// The exact not-found message the lab asks for.
    song_not_found_message => r#"["']Song not found["']"#
}

// ------------------------------- create -------------------------------

signature! {
    post_songs_route => r#"app\.post\s*\(\s*["']/api/songs["']\s*,"#
}

signature! {
    song_create_call => r"Song\.create\s*\("
}

signature! {
    /// `Song.create` wrapped in try/catch somewhere after the POST route.
    guarded_create => concat!(r"app\.post[\s\S]*", guarded!(r"Song\.create"))
}

// -------------------------------- read --------------------------------

signature! {
    get_songs_route => r#"app\.get\s*\(\s*["']/api/songs["']\s*,"#
}

signature! {
    song_find_call => r"Song\.find\s*\("
}

signature! {
    /// `.sort({ createdAt: -1 })`, also accepting a quoted key or `"desc"`.
    sort_newest_first => r#"\.sort\s*\(\s*\{\s*["']?createdAt["']?\s*:\s*(?:-1|["']desc(?:ending)?["'])\s*\}\s*\)"#
}

signature! {
    get_song_by_id_route => r#"app\.get\s*\(\s*["']/api/songs/:id["']\s*,"#
}

signature! {
    song_find_by_id_call => r"Song\.findById\s*\("
}

// ------------------------------- update -------------------------------

signature! {
    put_song_route => r#"app\.put\s*\(\s*["']/api/songs/:id["']\s*,"#
}

signature! {
    song_update_call => r"Song\.findByIdAndUpdate\s*\("
}

signature! {
    /// `{ new: true, runValidators: true }` passed to `findByIdAndUpdate`, in either order.
    update_returns_validated_doc => concat!(
        r"findByIdAndUpdate\s*\([\s\S]*\{(?:",
        r"[^}]*\bnew\s*:\s*true[^}]*\brunValidators\s*:\s*true",
        "|",
        r"[^}]*\brunValidators\s*:\s*true[^}]*\bnew\s*:\s*true",
        r")[^}]*\}"
    )
}

signature! {
    /// `findByIdAndUpdate` wrapped in try/catch somewhere after the PUT route.
    guarded_update => concat!(r"app\.put[\s\S]*", guarded!(r"findByIdAndUpdate"))
}

// ------------------------------- delete -------------------------------

signature! {
    delete_song_route => r#"app\.delete\s*\(\s*["']/api/songs/:id["']\s*,"#
}

signature! {
    song_delete_call => r"Song\.findByIdAndDelete\s*\("
}
