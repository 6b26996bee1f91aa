//! Tolerant RSS 2.0 / Atom feed parsing.
//!
//! `sift` turns arbitrary — often malformed — syndication XML from the open
//! web into a uniform representation: a [`Feed`] header plus an ordered
//! sequence of [`Article`]s. It tolerates missing, duplicated and
//! format-specific fields without failing the whole ingest.
//!
//! # Pipeline
//!
//! Data flows strictly forward through four stages:
//!
//! 1. **Document tree** (`document`) — raw bytes parsed with `quick-xml`
//!    into a namespace-aware element tree; character entities are decoded
//!    exactly once here.
//! 2. **Format detection** (`detect`) — the root element picks the
//!    extraction strategy: RSS 2.0 or Atom (RSS 1.0/RDF is recognized and
//!    rejected).
//! 3. **Extraction** (`extract`) — per-format header and entry field
//!    extraction, including Dublin Core / Slash / WFW extensions.
//! 4. **Normalization** (`normalize`) — multi-format date parsing,
//!    numeric coercion, text sanitization.
//!
//! # Fault tolerance
//!
//! A document that is not well-formed XML, has an unrecognized root, or
//! lacks required header fields fails the whole parse with a typed
//! [`ParseError`]. A single unusable entry does not: it is skipped, logged
//! via `tracing`, and reported in [`ParsedFeed::skipped`]. Bad field values
//! (unparsable dates, non-numeric counts, partial enclosures) degrade to
//! unset fields.
//!
//! # Scope
//!
//! This crate performs no I/O: fetching, caching, retry, persistence and
//! cross-run deduplication belong to its callers. Parsing is synchronous
//! and side-effect-free, so independent documents can be parsed from any
//! number of threads concurrently.
//!
//! # Example
//!
//! ```
//! let xml = br#"<rss version="2.0"><channel>
//!     <title>Korben</title>
//!     <link>http://korben.info</link>
//!     <item>
//!       <title>RetroN 5</title>
//!       <link>http://korben.info/retron-5.html</link>
//!     </item>
//! </channel></rss>"#;
//!
//! let parsed = sift::parse_feed(xml)?;
//! assert_eq!(parsed.feed.title, "Korben");
//! assert_eq!(parsed.articles.len(), 1);
//! // No explicit <guid>: falls back to the entry url.
//! assert_eq!(parsed.articles[0].guid, "http://korben.info/retron-5.html");
//! # Ok::<(), sift::ParseError>(())
//! ```

mod config;
mod detect;
mod document;
mod error;
mod extract;
mod model;
mod normalize;

pub use config::ParseConfig;
pub use error::{ParseError, SkippedEntry};
pub use model::{Article, Enclosure, Feed, ParsedFeed};

/// Parses a feed document with the default [`ParseConfig`].
///
/// The input is the raw byte stream as retrieved; the document's declared
/// encoding is honored. See [`parse_feed_with`].
pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed, ParseError> {
    parse_feed_with(bytes, &ParseConfig::default())
}

/// Parses a feed document with an explicit configuration.
///
/// # Errors
///
/// - [`ParseError::MalformedDocument`] — input is not well-formed XML (or
///   exceeds the configured nesting depth). Nothing is salvaged.
/// - [`ParseError::UnsupportedFormat`] — the root element matches no
///   supported format; carries the root tag found.
/// - [`ParseError::MissingRequiredField`] — the feed header lacks a title
///   or site link.
///
/// Per-entry problems never surface as errors; see
/// [`ParsedFeed::skipped`].
pub fn parse_feed_with(bytes: &[u8], config: &ParseConfig) -> Result<ParsedFeed, ParseError> {
    let root = document::parse_tree(bytes, config)?;
    let format = detect::detect(&root)?;
    let feed = format.extract_header(&root, config)?;
    let (articles, skipped) = format.extract_entries(&root, config);
    tracing::debug!(
        format = ?format,
        title = %feed.title,
        articles = articles.len(),
        skipped = skipped.len(),
        "parsed feed document"
    );
    Ok(ParsedFeed {
        feed,
        articles,
        skipped,
    })
}
