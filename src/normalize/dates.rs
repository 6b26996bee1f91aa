//! Tolerant timestamp parsing.
//!
//! Feeds declare dates in whatever their generator felt like. The candidate
//! list below is evaluated in order, first match wins; when nothing matches
//! the date is left unset rather than failing the entry. The list is a plain
//! table so each rule stays individually visible and testable.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

type Candidate = fn(&str) -> Option<DateTime<Utc>>;

/// Ordered date-format candidates. RFC 2822 first (RSS2 `<pubDate>`), then
/// RFC 3339 (Atom `<published>`/`<updated>`), then two lenient shapes seen
/// in wild feeds.
const CANDIDATES: &[(&str, Candidate)] = &[
    ("rfc2822", rfc2822),
    ("rfc3339", rfc3339),
    ("rfc2822 without seconds", rfc2822_no_seconds),
    ("naive date-time (assumed UTC)", naive_utc),
];

/// Parses a raw timestamp, normalized to UTC. `None` when no candidate
/// format matches; the failure is logged at debug level only.
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for (name, candidate) in CANDIDATES {
        if let Some(dt) = candidate(s) {
            tracing::trace!(format = name, "matched date format");
            return Some(dt);
        }
    }
    tracing::debug!(raw = s, "no known date format matched");
    None
}

fn rfc2822(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn rfc2822_no_seconds(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s, "%a, %d %b %Y %H:%M %z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn naive_utc(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_rss2_pubdate_rfc2822() {
        let dt = parse_date("Sat, 13 Apr 2013 12:56:34 +0000").unwrap();
        assert_eq!(dt.to_rfc3339(), "2013-04-13T12:56:34+00:00");
    }

    #[test]
    fn test_rfc2822_offset_normalized_to_utc() {
        let dt = parse_date("Sat, 13 Apr 2013 14:56:34 +0200").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_atom_published_rfc3339() {
        let dt = parse_date("2013-04-12T00:00:00-04:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2013-04-12T04:00:00+00:00");
    }

    #[test]
    fn test_lenient_rfc2822_without_seconds() {
        let dt = parse_date("Mon, 01 Jan 2024 10:30 +0000").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T10:30:00+00:00");
    }

    #[test]
    fn test_naive_timestamp_assumed_utc() {
        let dt = parse_date("2024-01-01 10:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T10:30:00+00:00");
    }

    #[test]
    fn test_unknown_format_is_unset_not_error() {
        assert_eq!(parse_date("yesterday-ish"), None);
        assert_eq!(parse_date("13/04/2013"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert!(parse_date("  Sat, 13 Apr 2013 12:56:34 +0000\n").is_some());
    }
}
