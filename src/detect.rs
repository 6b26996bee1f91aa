//! Format detection: root element/namespace → extraction strategy.
//!
//! Detection happens once per document; everything downstream dispatches on
//! the returned [`FeedFormat`] and never re-checks element names at the
//! document level.

use crate::document::Element;
use crate::error::ParseError;

pub(crate) const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// The syndication formats this crate extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FeedFormat {
    Rss2,
    Atom,
}

/// Classifies a document by its root element.
///
/// RSS 1.0 (RDF) roots are recognized but rejected: the detector tells them
/// apart from unknown roots so the error message names the actual problem,
/// but no field mapping is implemented for them.
pub(crate) fn detect(root: &Element) -> Result<FeedFormat, ParseError> {
    if root.ns.is_none() && root.local == "rss" {
        return Ok(FeedFormat::Rss2);
    }
    if root.local == "feed" {
        // Proper Atom binds the Atom namespace; feeds in the wild sometimes
        // omit it, and the element vocabulary is unambiguous enough to accept.
        if root.ns.as_deref() == Some(ATOM_NS) || root.ns.is_none() {
            return Ok(FeedFormat::Atom);
        }
    }
    if root.local == "RDF" && root.ns.as_deref() == Some(RDF_NS) {
        return Err(ParseError::UnsupportedFormat("RDF (RSS 1.0)".to_string()));
    }
    Err(ParseError::UnsupportedFormat(root.local.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::document::parse_tree;

    fn root_of(xml: &str) -> Element {
        parse_tree(xml.as_bytes(), &ParseConfig::default()).unwrap()
    }

    #[test]
    fn test_detects_rss2() {
        let root = root_of(r#"<rss version="2.0"><channel/></rss>"#);
        assert_eq!(detect(&root).unwrap(), FeedFormat::Rss2);
    }

    #[test]
    fn test_detects_rss2_without_version() {
        let root = root_of("<rss><channel/></rss>");
        assert_eq!(detect(&root).unwrap(), FeedFormat::Rss2);
    }

    #[test]
    fn test_detects_atom() {
        let root = root_of(r#"<feed xmlns="http://www.w3.org/2005/Atom"/>"#);
        assert_eq!(detect(&root).unwrap(), FeedFormat::Atom);
    }

    #[test]
    fn test_detects_atom_without_namespace() {
        let root = root_of("<feed/>");
        assert_eq!(detect(&root).unwrap(), FeedFormat::Atom);
    }

    #[test]
    fn test_rejects_rdf_distinctly() {
        let root = root_of(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#,
        );
        let err = detect(&root).unwrap_err();
        assert!(
            err.to_string().contains("RSS 1.0"),
            "RDF rejection should name RSS 1.0: {err}"
        );
    }

    #[test]
    fn test_rejects_unknown_root_naming_it() {
        let root = root_of("<html><body/></html>");
        match detect(&root) {
            Err(ParseError::UnsupportedFormat(tag)) => assert_eq!(tag, "html"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }
}
