//! Atom extraction: `<feed>` header and `<entry>` elements.
//!
//! Atom has no header-level language or description in the field set
//! consumed here, so those stay unset — "not applicable in this format" is
//! distinct from "empty value present". Elements are matched in the Atom
//! namespace, with unnamespaced elements tolerated for feeds that omit the
//! `xmlns` declaration.

use crate::config::ParseConfig;
use crate::detect::ATOM_NS;
use crate::document::Element;
use crate::error::{ParseError, SkippedEntry};
use crate::model::{Article, Enclosure, Feed};
use crate::normalize::{clean_text, parse_date, parse_length};

use super::{collect_entries, nonempty};

/// First child matching the local name in the Atom namespace, or in no
/// namespace for declaration-less feeds.
fn atom_child<'a>(parent: &'a Element, local: &str) -> Option<&'a Element> {
    parent
        .children()
        .find(|c| c.local == local && (c.ns.as_deref() == Some(ATOM_NS) || c.ns.is_none()))
}

fn atom_children<'a>(parent: &'a Element, local: &'a str) -> impl Iterator<Item = &'a Element> {
    parent
        .children()
        .filter(move |c| c.local == local && (c.ns.as_deref() == Some(ATOM_NS) || c.ns.is_none()))
}

/// Cleaned, non-empty direct text of an Atom child element.
fn atom_text(parent: &Element, local: &str, config: &ParseConfig) -> Option<String> {
    let elem = atom_child(parent, local)?;
    nonempty(clean_text(&elem.text(), config))
}

/// Cleaned, non-empty text including descendants — Atom content/summary may
/// embed XHTML as child elements.
fn atom_body(parent: &Element, local: &str, config: &ParseConfig) -> Option<String> {
    let elem = atom_child(parent, local)?;
    nonempty(clean_text(&elem.deep_text(), config))
}

fn link_href(link: &Element, config: &ParseConfig) -> Option<String> {
    nonempty(clean_text(link.attr("href")?, config))
}

pub(crate) fn extract_header(root: &Element, config: &ParseConfig) -> Result<Feed, ParseError> {
    let title =
        atom_text(root, "title", config).ok_or(ParseError::MissingRequiredField("title"))?;

    // Site link candidates: rel="alternate", else a link carrying no rel.
    let links: Vec<&Element> = atom_children(root, "link").collect();
    let url = links
        .iter()
        .find(|l| l.attr("rel") == Some("alternate"))
        .or_else(|| links.iter().find(|l| l.attr("rel").is_none()))
        .and_then(|l| link_href(l, config))
        .ok_or(ParseError::MissingRequiredField("link"))?;

    Ok(Feed {
        title,
        url,
        language: None,
        description: None,
    })
}

pub(crate) fn extract_entries(
    root: &Element,
    config: &ParseConfig,
) -> (Vec<Article>, Vec<SkippedEntry>) {
    collect_entries(atom_children(root, "entry"), config, extract_entry)
}

fn extract_entry(entry: &Element, config: &ParseConfig) -> Result<Article, String> {
    let title = atom_text(entry, "title", config)
        .ok_or_else(|| "entry has no usable <title>".to_string())?;

    let links: Vec<&Element> = atom_children(entry, "link").collect();
    // Entry link candidates: rel="alternate", else the first link.
    let url = links
        .iter()
        .find(|l| l.attr("rel") == Some("alternate"))
        .or_else(|| links.first())
        .and_then(|l| link_href(l, config))
        .ok_or_else(|| "entry has no usable <link>".to_string())?;

    // Explicit <id> when present and non-empty, else the entry's url.
    let guid = atom_text(entry, "id", config).unwrap_or_else(|| url.clone());

    let creator = atom_child(entry, "author").and_then(|a| atom_text(a, "name", config));

    // Body candidates: <content>, else <summary>.
    let description =
        atom_body(entry, "content", config).or_else(|| atom_body(entry, "summary", config));

    // Date candidates: <published>, else <updated>; an unparsable value
    // falls through to the next candidate.
    let published = atom_child(entry, "published")
        .and_then(|e| parse_date(&e.text()))
        .or_else(|| atom_child(entry, "updated").and_then(|e| parse_date(&e.text())));

    Ok(Article {
        title,
        url,
        guid,
        creator,
        description,
        comment_url: None,
        comment_count: None,
        published,
        enclosure: extract_enclosure(&links, config),
    })
}

/// Builds the enclosure triple from a `<link rel="enclosure">` carrying
/// href, length and type. All-or-nothing, same as RSS2.
fn extract_enclosure(links: &[&Element], config: &ParseConfig) -> Option<Enclosure> {
    let link = links.iter().find(|l| l.attr("rel") == Some("enclosure"))?;
    let url = link_href(link, config)?;
    let length = parse_length(link.attr("length")?)?;
    let mime_type = nonempty(link.attr("type")?.trim().to_string())?;
    Some(Enclosure {
        url,
        length,
        mime_type,
    })
}
