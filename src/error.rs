use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal failures for a single parse call.
///
/// Every variant aborts the call and returns nothing; there is no partial
/// salvage of a document that fails at this level. Per-entry problems are
/// reported separately as [`SkippedEntry`] diagnostics and never abort the
/// parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not well-formed XML (includes nesting beyond the
    /// configured depth limit and truncated documents).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The root element does not match any supported feed format.
    /// Carries the root tag that was found.
    #[error("unsupported feed format: root element <{0}>")]
    UnsupportedFormat(String),

    /// A feed-level field required by the data model (title, link) is
    /// absent. The caller decides whether to abandon the feed or substitute
    /// a default; this crate does not guess.
    #[error("missing required feed field: {0}")]
    MissingRequiredField(&'static str),
}

/// Advisory record for a single entry that could not be extracted.
///
/// Skips are accumulated on [`ParsedFeed`](crate::ParsedFeed) and logged via
/// `tracing::warn!`; they never change the success/failure outcome of the
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// Zero-based position of the entry among the document's item/entry
    /// elements, counting skipped ones.
    pub index: usize,
    /// Human-readable reason, e.g. "item has no <link>".
    pub reason: String,
}
