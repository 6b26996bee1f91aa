//! Normalized output types produced by a parse call.
//!
//! All types are plain owned data: constructed once during the parse, fully
//! populated before being handed to the caller, and never touched by this
//! crate afterwards. Nothing is shared across parse calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SkippedEntry;

/// Feed-level metadata (one per parse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Feed title (e.g., "Korben").
    pub title: String,
    /// URL of the site's home page — not the feed URL itself.
    pub url: String,
    /// Language tag (e.g., "fr-FR"). RSS2 only; Atom has no header-level
    /// equivalent consumed here, so it stays `None` for Atom feeds.
    pub language: Option<String>,
    /// Feed description. RSS2 only, same as `language`.
    pub description: Option<String>,
}

/// An attached media resource.
///
/// Grouping the three fields in one struct enforces the all-or-nothing rule:
/// an article either has a complete enclosure or none at all. Partial
/// enclosure data in the source (missing or unparsable `length`/`type`) is
/// treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    /// Size in bytes, as declared by the feed.
    pub length: u64,
    /// MIME type (e.g., "video/x-flv").
    pub mime_type: String,
}

/// One normalized entry/item of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// URL of the article page.
    pub url: String,
    /// Identifier distinguishing this entry from others. Never empty: when
    /// the source has no explicit identifier (or an empty one), this is the
    /// entry's url. Two identifier-less entries sharing a url therefore
    /// collide; downstream deduplication must account for that.
    pub guid: String,
    /// Author name, if the source declares one.
    pub creator: Option<String>,
    /// Body or summary, possibly containing markup. Markup is preserved
    /// as-is; character entities are decoded exactly once during parsing.
    pub description: Option<String>,
    /// URL of the entry's comment page (RSS2 extensions only).
    pub comment_url: Option<String>,
    /// Declared number of comments (RSS2 Slash extension only).
    pub comment_count: Option<u32>,
    /// Publication instant, when the source date matched a known format.
    pub published: Option<DateTime<Utc>>,
    /// Attached media resource, complete or absent.
    pub enclosure: Option<Enclosure>,
}

/// Result of one successful parse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFeed {
    pub feed: Feed,
    /// Articles in document order — the parser never resorts them.
    /// An empty sequence is a valid outcome, not an error.
    pub articles: Vec<Article>,
    /// Entries that could not be extracted, with reasons. Advisory only.
    pub skipped: Vec<SkippedEntry>,
}
