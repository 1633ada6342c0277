//! Event Timestamp Resolver
//!
//! Extracts the submission instant from a CI event descriptor (the JSON file
//! GitHub Actions exposes through `GITHUB_EVENT_PATH`). Different event kinds
//! carry the time in different places, so the known locations are tried in
//! priority order and the first one present wins:
//!
//! 1. `head_commit.timestamp` (push)
//! 2. `pull_request.updated_at` (pull request)
//! 3. `workflow_run.created_at` (workflow run)
//! 4. `repository.pushed_at` (any event carrying the repository; may be Unix seconds)
//!
//! A location counts as present when it holds a non-empty string or a number.
//! If the first present value does not parse, the instant is unresolved; later
//! locations are not consulted.

use crate::error::MarkerError;
use crate::traits::parser::Parser;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// `(object, field)` pairs checked in priority order.
pub const TIMESTAMP_LOCATIONS: [(&str, &str); 4] = [
    ("head_commit", "timestamp"),
    ("pull_request", "updated_at"),
    ("workflow_run", "created_at"),
    ("repository", "pushed_at"),
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a calendar instant.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD[T| ]HH:MM[:SS[.fff]]` and a bare
/// `YYYY-MM-DD`. Strings without an offset are taken as UTC; a bare date means
/// midnight UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Formats an instant the way reports show it: `2025-11-20T23:59:59.000Z`.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parser from raw event-descriptor JSON text to the submission instant.
pub struct EventTimestampParser;

impl<'a> Parser<&'a str, DateTime<Utc>> for EventTimestampParser {
    /// # Errors
    ///
    /// - [`MarkerError::InvalidJson`] if the text is not a JSON object.
    /// - [`MarkerError::MissingField`] if no known location holds a timestamp.
    /// - [`MarkerError::InvalidTimestamp`] if the first timestamp found does not parse.
    fn parse(&self, raw: &'a str) -> Result<DateTime<Utc>, MarkerError> {
        let event: Value = serde_json::from_str(raw)
            .map_err(|e| MarkerError::InvalidJson(format!("event descriptor: {e}")))?;
        if !event.is_object() {
            return Err(MarkerError::InvalidJson(
                "event descriptor must be a JSON object".to_string(),
            ));
        }

        let (location, value) = TIMESTAMP_LOCATIONS
            .iter()
            .find_map(|(object, field)| {
                let value = event.get(object)?.get(field)?;
                match value {
                    Value::String(s) if !s.is_empty() => Some(((object, field), value)),
                    Value::Number(_) => Some(((object, field), value)),
                    _ => None,
                }
            })
            .ok_or_else(|| {
                MarkerError::MissingField("no recognised timestamp in event descriptor".to_string())
            })?;

        debug!("submission time taken from {}.{}", location.0, location.1);

        let parsed = match value {
            Value::String(s) => parse_instant(s),
            Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
            _ => None,
        };

        parsed.ok_or_else(|| {
            MarkerError::InvalidTimestamp(format!("{}.{} = {}", location.0, location.1, value))
        })
    }
}

/// Resolves the submission instant from the descriptor at `path`.
///
/// Never fails: a missing path, unreadable file, malformed JSON or
/// unparsable timestamp all yield `None`.
pub fn resolve_submission_time(path: Option<&Path>) -> Option<DateTime<Utc>> {
    let path = path?;
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("could not read event descriptor {}: {e}", path.display());
            return None;
        }
    };

    EventTimestampParser
        .parse(raw.as_str())
        .inspect_err(|e| warn!("submission time unresolved: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parse_instant_accepts_common_shapes() {
        let expected = utc(2025, 11, 20, 23, 59, 59);
        assert_eq!(parse_instant("2025-11-20T23:59:59Z"), Some(expected));
        assert_eq!(parse_instant("2025-11-21T02:59:59+03:00"), Some(expected));
        assert_eq!(parse_instant("2025-11-20T23:59:59"), Some(expected));
        assert_eq!(parse_instant("2025-11-20 23:59:59"), Some(expected));
        assert_eq!(parse_instant("2025-11-20T23:59:59.000"), Some(expected));
        assert_eq!(parse_instant("Thu, 20 Nov 2025 23:59:59 +0000"), Some(expected));
        assert_eq!(parse_instant("2025-11-20"), Some(utc(2025, 11, 20, 0, 0, 0)));
    }

    #[test]
    fn parse_instant_rejects_garbage() {
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("next friday"), None);
        assert_eq!(parse_instant("2025-13-40"), None);
    }

    #[test]
    fn format_uses_millisecond_utc() {
        assert_eq!(format_instant(&utc(2025, 1, 2, 3, 4, 5)), "2025-01-02T03:04:05.000Z");
    }

    #[test]
    fn head_commit_wins_over_later_locations() {
        let raw = r#"{
            "head_commit": { "timestamp": "2025-11-20T10:00:00Z" },
            "repository": { "pushed_at": 1 }
        }"#;
        assert_eq!(EventTimestampParser.parse(raw), Ok(utc(2025, 11, 20, 10, 0, 0)));
    }

    #[test]
    fn falls_through_to_pull_request_and_workflow_run() {
        let pr = r#"{ "head_commit": null, "pull_request": { "updated_at": "2025-11-19T08:30:00Z" } }"#;
        assert_eq!(EventTimestampParser.parse(pr), Ok(utc(2025, 11, 19, 8, 30, 0)));

        let run = r#"{ "workflow_run": { "created_at": "2025-11-18T00:00:00Z" } }"#;
        assert_eq!(EventTimestampParser.parse(run), Ok(utc(2025, 11, 18, 0, 0, 0)));
    }

    #[test]
    fn repository_pushed_at_may_be_unix_seconds() {
        let raw = r#"{ "repository": { "pushed_at": 1763683199 } }"#;
        assert_eq!(EventTimestampParser.parse(raw), Ok(utc(2025, 11, 20, 23, 59, 59)));
    }

    #[test]
    fn empty_string_is_not_a_timestamp() {
        let raw = r#"{ "head_commit": { "timestamp": "" }, "repository": { "pushed_at": "2025-11-20T00:00:00Z" } }"#;
        assert_eq!(EventTimestampParser.parse(raw), Ok(utc(2025, 11, 20, 0, 0, 0)));
    }

    #[test]
    fn unparsable_first_timestamp_does_not_fall_through() {
        let raw = r#"{ "head_commit": { "timestamp": "yesterday" }, "repository": { "pushed_at": "2025-11-20T00:00:00Z" } }"#;
        assert!(matches!(
            EventTimestampParser.parse(raw),
            Err(MarkerError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn malformed_and_empty_descriptors() {
        assert!(matches!(EventTimestampParser.parse("{ nope"), Err(MarkerError::InvalidJson(_))));
        assert!(matches!(EventTimestampParser.parse("[1, 2]"), Err(MarkerError::InvalidJson(_))));
        assert!(matches!(EventTimestampParser.parse("{}"), Err(MarkerError::MissingField(_))));
    }

    #[test]
    fn resolve_never_fails() {
        assert_eq!(resolve_submission_time(None), None);
        assert_eq!(resolve_submission_time(Some(Path::new("/definitely/not/here.json"))), None);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "head_commit": {{ "timestamp": "2025-11-20T10:00:00Z" }} }}"#).unwrap();
        assert_eq!(
            resolve_submission_time(Some(file.path())),
            Some(utc(2025, 11, 20, 10, 0, 0))
        );

        let mut broken = NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        assert_eq!(resolve_submission_time(Some(broken.path())), None);
    }
}
