//! Per-format field extraction.
//!
//! [`FeedFormat`] is the dispatch point: detection picks the variant once
//! per document, and `extract_header` / `extract_entries` route to the
//! format module. No format checks happen anywhere downstream of this.
//!
//! Namespaced extension elements are matched by resolved namespace URI, not
//! prefix, so feeds are free to bind whatever prefixes they like.

pub(crate) mod atom;
pub(crate) mod rss2;

use crate::config::ParseConfig;
use crate::detect::FeedFormat;
use crate::document::Element;
use crate::error::{ParseError, SkippedEntry};
use crate::model::{Article, Feed};
use crate::normalize::clean_text;

/// Dublin Core, for `dc:creator` on RSS2 items.
pub(crate) const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
/// Slash module, for the `slash:comments` count on RSS2 items.
pub(crate) const SLASH_NS: &str = "http://purl.org/rss/1.0/modules/slash/";
/// Well-Formed Web comment API, fallback comment link on RSS2 items.
pub(crate) const WFW_NS: &str = "http://wellformedweb.org/CommentAPI/";

impl FeedFormat {
    /// Reads the feed-level header. Missing title or site link is fatal for
    /// the parse; the caller decides whether to substitute a default.
    pub(crate) fn extract_header(
        self,
        root: &Element,
        config: &ParseConfig,
    ) -> Result<Feed, ParseError> {
        match self {
            FeedFormat::Rss2 => rss2::extract_header(root, config),
            FeedFormat::Atom => atom::extract_header(root, config),
        }
    }

    /// Extracts all entries in document order, with per-entry fault
    /// isolation: an unusable entry is recorded and skipped, never fatal.
    pub(crate) fn extract_entries(
        self,
        root: &Element,
        config: &ParseConfig,
    ) -> (Vec<Article>, Vec<SkippedEntry>) {
        match self {
            FeedFormat::Rss2 => rss2::extract_entries(root, config),
            FeedFormat::Atom => atom::extract_entries(root, config),
        }
    }
}

/// Shared fault-isolation loop: runs the per-entry extractor over every
/// item/entry element, collecting successes and skip diagnostics.
pub(crate) fn collect_entries<'a>(
    entries: impl Iterator<Item = &'a Element>,
    config: &ParseConfig,
    extract: impl Fn(&Element, &ParseConfig) -> Result<Article, String>,
) -> (Vec<Article>, Vec<SkippedEntry>) {
    let mut articles = Vec::new();
    let mut skipped = Vec::new();
    for (index, entry) in entries.enumerate() {
        match extract(entry, config) {
            Ok(article) => articles.push(article),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping unusable feed entry");
                skipped.push(SkippedEntry { index, reason });
            }
        }
    }
    (articles, skipped)
}

/// Cleaned, non-empty text of a direct child element. An absent child and a
/// present-but-empty one both come back as `None` — "unset", never `Some("")`.
pub(crate) fn child_text(
    parent: &Element,
    ns: Option<&str>,
    local: &str,
    config: &ParseConfig,
) -> Option<String> {
    let elem = parent.child(ns, local)?;
    nonempty(clean_text(&elem.text(), config))
}

/// Cleaned, non-empty text of a child including descendant text — for body
/// fields that may carry embedded markup as child elements.
pub(crate) fn child_body(
    parent: &Element,
    ns: Option<&str>,
    local: &str,
    config: &ParseConfig,
) -> Option<String> {
    let elem = parent.child(ns, local)?;
    nonempty(clean_text(&elem.deep_text(), config))
}

pub(crate) fn nonempty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
