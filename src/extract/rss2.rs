//! RSS 2.0 extraction: `<channel>` header and `<item>` entries.
//!
//! Core RSS2 elements live in no namespace; the extensions consumed here
//! (Dublin Core creator, Slash comment count, WFW comment link) are matched
//! by namespace URI.

use crate::config::ParseConfig;
use crate::document::Element;
use crate::error::{ParseError, SkippedEntry};
use crate::model::{Article, Enclosure, Feed};
use crate::normalize::{parse_count, parse_date, parse_length};

use super::{child_body, child_text, collect_entries, nonempty, DC_NS, SLASH_NS, WFW_NS};

pub(crate) fn extract_header(root: &Element, config: &ParseConfig) -> Result<Feed, ParseError> {
    let channel = root
        .child(None, "channel")
        .ok_or(ParseError::MissingRequiredField("channel"))?;

    let title = child_text(channel, None, "title", config)
        .ok_or(ParseError::MissingRequiredField("title"))?;
    let url = child_text(channel, None, "link", config)
        .ok_or(ParseError::MissingRequiredField("link"))?;

    Ok(Feed {
        title,
        url,
        language: child_text(channel, None, "language", config),
        description: child_body(channel, None, "description", config),
    })
}

pub(crate) fn extract_entries(
    root: &Element,
    config: &ParseConfig,
) -> (Vec<Article>, Vec<SkippedEntry>) {
    let Some(channel) = root.child(None, "channel") else {
        return (Vec::new(), Vec::new());
    };
    collect_entries(channel.children_named(None, "item"), config, extract_entry)
}

fn extract_entry(item: &Element, config: &ParseConfig) -> Result<Article, String> {
    let title = child_text(item, None, "title", config)
        .ok_or_else(|| "item has no usable <title>".to_string())?;
    let url = child_text(item, None, "link", config)
        .ok_or_else(|| "item has no usable <link>".to_string())?;

    // Explicit <guid> when present and non-empty, else the item's url.
    let guid = child_text(item, None, "guid", config).unwrap_or_else(|| url.clone());

    // Comment link candidates, first match wins: core <comments>, then wfw.
    let comment_url = child_text(item, None, "comments", config)
        .or_else(|| child_text(item, Some(WFW_NS), "comment", config));

    let comment_count = item
        .child(Some(SLASH_NS), "comments")
        .and_then(|e| parse_count(&e.text()));

    let published = item
        .child(None, "pubDate")
        .and_then(|e| parse_date(&e.text()));

    Ok(Article {
        title,
        url,
        guid,
        creator: child_text(item, Some(DC_NS), "creator", config),
        description: child_body(item, None, "description", config),
        comment_url,
        comment_count,
        published,
        enclosure: extract_enclosure(item),
    })
}

/// Builds the enclosure triple from `<enclosure url length type>`.
/// All-or-nothing: a missing or unparsable url, length or type voids the
/// whole enclosure.
fn extract_enclosure(item: &Element) -> Option<Enclosure> {
    let e = item.child(None, "enclosure")?;
    let url = nonempty(e.attr("url")?.trim().to_string())?;
    let length = parse_length(e.attr("length")?)?;
    let mime_type = nonempty(e.attr("type")?.trim().to_string())?;
    Some(Enclosure {
        url,
        length,
        mime_type,
    })
}
