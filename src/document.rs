//! Namespace-aware element tree built from a raw byte stream.
//!
//! This is the single place where XML is read and where character entities
//! are decoded — exactly once, via `unescape` on text events and
//! `decode_and_unescape_value` on attributes. Everything downstream
//! (detection, extraction, normalization) works on the finished tree and
//! never touches entities again, so double-decoding cannot happen.
//!
//! SEC-002: XXE protection — quick-xml (0.37) never parses `<!ENTITY>`
//! declarations from DOCTYPE. Only the 5 XML builtins resolve; a custom
//! entity reference fails the unescape step and the document is rejected as
//! malformed rather than expanded.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::encoding::Decoder;
use quick_xml::reader::NsReader;

use crate::config::ParseConfig;
use crate::error::ParseError;

/// Content of an element, in document order. Keeping text and child
/// elements interleaved preserves mixed content ("before <b>bold</b> after")
/// for body-field extraction.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Text(String),
    Element(Element),
}

/// One element of the parsed document: resolved namespace, local name,
/// attributes (local names, values entity-decoded) and ordered content.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub ns: Option<String>,
    pub local: String,
    pub attrs: Vec<(String, String)>,
    pub nodes: Vec<Node>,
}

impl Element {
    fn new(ns: Option<String>, local: String) -> Self {
        Self {
            ns,
            local,
            attrs: Vec::new(),
            nodes: Vec::new(),
        }
    }

    fn push_text(&mut self, s: &str) {
        if let Some(Node::Text(last)) = self.nodes.last_mut() {
            last.push_str(s);
        } else {
            self.nodes.push(Node::Text(s.to_string()));
        }
    }

    /// True when the element's resolved namespace and local name both match.
    pub fn is(&self, ns: Option<&str>, local: &str) -> bool {
        self.ns.as_deref() == ns && self.local == local
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child matching namespace + local name.
    pub fn child(&self, ns: Option<&str>, local: &str) -> Option<&Element> {
        self.children().find(|c| c.is(ns, local))
    }

    /// All direct children matching namespace + local name, document order.
    pub fn children_named<'a>(
        &'a self,
        ns: Option<&'a str>,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children().filter(move |c| c.is(ns, local))
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct text content, whitespace-trimmed. Text inside child elements
    /// is not included; see [`Element::deep_text`].
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            if let Node::Text(t) = node {
                out.push_str(t);
            }
        }
        out.trim().to_string()
    }

    /// Text of this element and all descendants, document order.
    ///
    /// Used for body fields (description/content/summary) that may carry
    /// embedded markup as child elements rather than escaped text.
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.nodes {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

fn malformed(e: impl std::fmt::Display) -> ParseError {
    ParseError::MalformedDocument(e.to_string())
}

/// Parses raw bytes into an element tree rooted at the document element.
///
/// The reader honors the document's declared encoding (quick-xml `encoding`
/// feature); callers hand over the byte stream as retrieved, undecoded.
/// Returns `MalformedDocument` for ill-formed XML, a missing root element,
/// truncated input, or nesting beyond `config.max_depth`.
pub(crate) fn parse_tree(bytes: &[u8], config: &ParseConfig) -> Result<Element, ParseError> {
    let mut reader = NsReader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        // Captured before the read: the resolved event borrows the reader,
        // and Decoder is a small Copy type. The encoding is known by the
        // time element/text events appear (the declaration precedes them).
        let decoder = reader.decoder();
        match reader.read_resolved_event_into(&mut buf) {
            Ok((res, Event::Start(e))) => {
                let elem = open_element(decoder, &res, &e)?;
                stack.push(elem);
                if stack.len() > config.max_depth {
                    return Err(ParseError::MalformedDocument(format!(
                        "element nesting depth exceeds maximum of {} levels",
                        config.max_depth
                    )));
                }
            }
            Ok((res, Event::Empty(e))) => {
                let elem = open_element(decoder, &res, &e)?;
                close_element(&mut stack, &mut root, elem);
            }
            Ok((_, Event::End(_))) => {
                if let Some(elem) = stack.pop() {
                    close_element(&mut stack, &mut root, elem);
                }
            }
            Ok((_, Event::Text(t))) => {
                if let Some(top) = stack.last_mut() {
                    // Decode per document encoding, then resolve entities.
                    // This is the one and only entity-decoding pass.
                    let decoded = decoder.decode(t.as_ref()).map_err(malformed)?;
                    let unescaped = quick_xml::escape::unescape(&decoded).map_err(malformed)?;
                    top.push_text(&unescaped);
                }
            }
            Ok((_, Event::CData(t))) => {
                if let Some(top) = stack.last_mut() {
                    // CDATA is literal by definition: decode only, no unescape.
                    let decoded = decoder.decode(t.as_ref()).map_err(malformed)?;
                    top.push_text(&decoded);
                }
            }
            Ok((_, Event::Eof)) => {
                if !stack.is_empty() {
                    return Err(ParseError::MalformedDocument(
                        "unexpected end of document".to_string(),
                    ));
                }
                break;
            }
            // Declaration, comments, processing instructions, DOCTYPE.
            Ok(_) => {}
            Err(e) => return Err(malformed(e)),
        }
        buf.clear();
    }

    root.ok_or_else(|| ParseError::MalformedDocument("no root element".to_string()))
}

/// Builds an [`Element`] from a start/empty tag: resolves the namespace and
/// decodes attribute values (entity decoding happens here, once).
fn open_element(
    decoder: Decoder,
    res: &ResolveResult<'_>,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<Element, ParseError> {
    let ns = match res {
        ResolveResult::Bound(Namespace(ns)) => {
            Some(decoder.decode(ns).map_err(malformed)?.into_owned())
        }
        _ => None,
    };
    let local = decoder
        .decode(e.local_name().as_ref())
        .map_err(malformed)?
        .into_owned();

    let mut elem = Element::new(ns, local);
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        let key = decoder
            .decode(attr.key.local_name().as_ref())
            .map_err(malformed)?
            .into_owned();
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(malformed)?
            .into_owned();
        elem.attrs.push((key, value));
    }
    Ok(elem)
}

/// Attaches a completed element to its parent, or installs it as the root.
/// Content after the first root element is dropped.
fn close_element(stack: &mut Vec<Element>, root: &mut Option<Element>, elem: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.nodes.push(Node::Element(elem));
    } else if root.is_none() {
        *root = Some(elem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<Element, ParseError> {
        parse_tree(xml.as_bytes(), &ParseConfig::default())
    }

    #[test]
    fn test_builds_tree_with_namespaces() {
        let root = parse(
            r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
                 <channel>
                   <title>Example</title>
                   <item><dc:creator>Alice</dc:creator></item>
                 </channel>
               </rss>"#,
        )
        .unwrap();

        assert!(root.is(None, "rss"));
        assert_eq!(root.attr("version"), Some("2.0"));

        let channel = root.child(None, "channel").unwrap();
        assert_eq!(channel.child(None, "title").unwrap().text(), "Example");

        let item = channel.child(None, "item").unwrap();
        let creator = item
            .child(Some("http://purl.org/dc/elements/1.1/"), "creator")
            .unwrap();
        assert_eq!(creator.text(), "Alice");
    }

    #[test]
    fn test_entities_decoded_exactly_once() {
        let root = parse("<r><t>Tom &amp; Jerry &lt;3 &#39;quoted&#39;</t></r>").unwrap();
        assert_eq!(
            root.child(None, "t").unwrap().text(),
            "Tom & Jerry <3 'quoted'"
        );

        // Double-escaped input must come out single-escaped, not fully decoded.
        let root = parse("<r><t>&amp;amp; &amp;lt;</t></r>").unwrap();
        assert_eq!(root.child(None, "t").unwrap().text(), "&amp; &lt;");
    }

    #[test]
    fn test_cdata_taken_verbatim() {
        let root = parse("<r><t><![CDATA[a <b> &amp; c]]></t></r>").unwrap();
        // Inside CDATA nothing is entity-encoded, so nothing gets decoded.
        assert_eq!(root.child(None, "t").unwrap().text(), "a <b> &amp; c");
    }

    #[test]
    fn test_entities_in_attributes_decoded_once() {
        let root = parse(r#"<r><e url="http://x.test/?a=1&amp;b=2"/></r>"#).unwrap();
        assert_eq!(
            root.child(None, "e").unwrap().attr("url"),
            Some("http://x.test/?a=1&b=2")
        );
    }

    #[test]
    fn test_deep_text_preserves_mixed_content_order() {
        let root = parse("<r><d>before <b>bold</b> after</d></r>").unwrap();
        let d = root.child(None, "d").unwrap();
        assert_eq!(d.deep_text(), "before bold after");
        // Direct text only, child element text excluded.
        assert_eq!(d.text(), "before  after");
    }

    #[test]
    fn test_malformed_xml_rejected() {
        assert!(matches!(
            parse("<not valid xml"),
            Err(ParseError::MalformedDocument(_))
        ));
        assert!(matches!(
            parse("<a><b></a></b>"),
            Err(ParseError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_truncated_document_rejected() {
        assert!(matches!(
            parse("<rss><channel><title>oops</title>"),
            Err(ParseError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let err = parse("").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn test_depth_limit_rejects_deep_documents() {
        let mut xml = String::new();
        for _ in 0..100 {
            xml.push_str("<a>");
        }
        for _ in 0..100 {
            xml.push_str("</a>");
        }
        let err = parse(&xml).unwrap_err();
        assert!(
            err.to_string().contains("depth"),
            "error should mention the depth limit: {err}"
        );
    }

    #[test]
    fn test_nesting_at_depth_limit_allowed() {
        let mut xml = String::new();
        for _ in 0..50 {
            xml.push_str("<a>");
        }
        for _ in 0..50 {
            xml.push_str("</a>");
        }
        assert!(parse(&xml).is_ok());
    }

    #[test]
    fn test_custom_entities_never_expand() {
        // SEC-002: quick-xml does not parse <!ENTITY> declarations, so a
        // reference to a custom entity either errors out or stays literal.
        // Either way no declared (or external) content may leak through.
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE r [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
<r><t>&xxe;</t></r>"#;

        match parse(xml) {
            Ok(root) => {
                let text = root.child(None, "t").unwrap().text();
                assert!(!text.contains("root:"), "XXE expansion detected: {text}");
            }
            Err(_) => {
                // Rejecting the unresolvable entity is also acceptable.
            }
        }
    }
}
