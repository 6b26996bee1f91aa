//! Leaf normalization helpers shared by header and entry extraction:
//! date parsing, free-text numeric coercion, and text sanitization.

pub(crate) mod dates;
pub(crate) mod text;

pub(crate) use dates::parse_date;
pub(crate) use text::clean_text;

/// Coerces free-text numeric content (comment counts) to a number.
/// Malformed values are absent, never an error — a bad count on one entry
/// must not abort the feed.
pub(crate) fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Coerces a declared enclosure byte length. Same tolerance as
/// [`parse_count`]; a failure here voids the whole enclosure triple.
pub(crate) fn parse_length(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_accepts_plain_decimal() {
        assert_eq!(parse_count("4"), Some(4));
        assert_eq!(parse_count("  12 "), Some(12));
        assert_eq!(parse_count("0"), Some(0));
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("4 comments"), None);
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("7172109"), Some(7172109));
        assert_eq!(parse_length("unknown"), None);
    }
}
