//! Loading XML text into a queryable document.

use std::fmt;
use std::ops::Deref;

use roxmltree::Node;

use crate::config::LoadOptions;
use crate::diagnostic::{format_error, ParseStatus};
use crate::error::{Result, XmlParseError};
use crate::{printer, traverse};

/// A successfully parsed XML document.
///
/// Borrows the text it was parsed from, and every [`Node`] obtained from it
/// borrows the document, so no node can outlive either.
#[derive(Debug)]
pub struct Document<'input> {
    title: String,
    doc: roxmltree::Document<'input>,
}

impl<'input> Document<'input> {
    /// Parse `content` with default options.
    ///
    /// `title` only labels the error when parsing fails.
    ///
    /// # Examples
    /// ```
    /// use xmlhelper::Document;
    ///
    /// let doc = Document::parse("<a><b>1</b></a>", "inline").unwrap();
    /// assert_eq!(doc.find_text(["a", "b"]), "1");
    ///
    /// let err = Document::parse("<a>", "broken.xml").unwrap_err();
    /// assert!(err.to_string().starts_with("broken.xml : XML_ERROR_"));
    /// ```
    pub fn parse(content: &'input str, title: &str) -> Result<Self> {
        Self::parse_with(content, title, &LoadOptions::default())
    }

    /// Parse `content` with explicit parser limits.
    ///
    /// # Arguments
    /// * `content` - XML text, borrowed for the life of the document
    /// * `title` - Label prefixed to the error message on failure
    /// * `options` - DTD handling and node limit
    ///
    /// # Returns
    /// * `Ok(Document)` if `content` is well-formed
    /// * `Err(XmlParseError)` with the flattened diagnostic otherwise
    pub fn parse_with(content: &'input str, title: &str, options: &LoadOptions) -> Result<Self> {
        match roxmltree::Document::parse_with_options(content, options.to_parsing_options()) {
            Ok(doc) => {
                tracing::debug!(
                    title,
                    bytes = content.len(),
                    nodes = doc.descendants().count(),
                    "Parsed XML document"
                );
                Ok(Self {
                    title: title.to_string(),
                    doc,
                })
            }
            Err(e) => {
                let diagnostic = format_error(&ParseStatus::from(e));
                tracing::debug!(title, %diagnostic, "Failed to parse XML document");
                Err(XmlParseError::new(title, diagnostic))
            }
        }
    }

    /// Label given when the document was parsed.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The document node, parent of the root element.
    pub fn root(&self) -> Node<'_, 'input> {
        self.doc.root()
    }

    /// The single top-level element.
    pub fn root_element(&self) -> Node<'_, 'input> {
        self.doc.root_element()
    }

    /// The text this document was parsed from.
    pub fn input_text(&self) -> &'input str {
        self.doc.input_text()
    }

    /// Parse status of this document, which is always a success.
    pub fn status(&self) -> ParseStatus {
        ParseStatus::success()
    }

    /// [`traverse::find`] starting at the document node.
    pub fn find<I>(&self, path: I) -> Option<Node<'_, 'input>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        traverse::find(self.root(), path)
    }

    /// [`traverse::find_text`] starting at the document node.
    pub fn find_text<I>(&self, path: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        traverse::find_text(self.root(), path)
    }

    /// Render the document back to compact XML text.
    pub fn to_xml_string(&self) -> String {
        printer::to_string(self)
    }
}

impl<'input> Deref for Document<'input> {
    type Target = roxmltree::Document<'input>;

    fn deref(&self) -> &Self::Target {
        &self.doc
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::SUCCESS_NAME;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_valid() {
        let doc = Document::parse("<config><remote>host</remote></config>", "test").unwrap();
        assert_eq!(doc.title(), "test");
        assert!(doc.root().is_root());
        assert_eq!(doc.root_element().tag_name().name(), "config");
        assert_eq!(doc.find_text(["config", "remote"]), "host");
    }

    #[test]
    fn test_parse_invalid_inputs() {
        for xml in ["", "   ", "<a>", "<a></b>", "<a><b></a></b>", "text only"] {
            let err = Document::parse(xml, "my-title").unwrap_err();
            assert_eq!(err.title, "my-title");
            assert!(
                err.to_string().starts_with("my-title : XML_ERROR_"),
                "input {xml:?}: {err}"
            );
        }
    }

    #[test]
    fn test_parse_error_message_matches_formatter() {
        let xml = "<a></b>";
        let err = Document::parse(xml, "t").unwrap_err();

        let status = ParseStatus::from(roxmltree::Document::parse(xml).unwrap_err());
        assert_eq!(err.diagnostic, format_error(&status));
        assert_eq!(err.to_string(), format!("t : {}", err.diagnostic));
    }

    #[test]
    fn test_parse_with_rejects_dtd_by_default() {
        let xml = r#"<!DOCTYPE a [<!ELEMENT a ANY>]><a/>"#;
        assert!(Document::parse(xml, "dtd").is_err());

        let opts = LoadOptions {
            allow_dtd: true,
            ..LoadOptions::default()
        };
        assert!(Document::parse_with(xml, "dtd", &opts).is_ok());
    }

    #[test]
    fn test_parse_with_nodes_limit() {
        let xml = "<a><b/><b/><b/><b/></a>";
        let opts = LoadOptions {
            nodes_limit: 2,
            ..LoadOptions::default()
        };
        let err = Document::parse_with(xml, "limited", &opts).unwrap_err();
        assert!(err.to_string().starts_with("limited : XML_ERROR_"));
        assert!(Document::parse(xml, "unlimited").is_ok());
    }

    #[test]
    fn test_status_of_parsed_document() {
        let doc = Document::parse("<a/>", "ok").unwrap();
        assert_eq!(format_error(&doc.status()), SUCCESS_NAME);
    }

    #[test]
    fn test_deref_exposes_roxmltree() {
        let doc = Document::parse("<a><b/><b/></a>", "deref").unwrap();
        assert_eq!(doc.descendants().filter(|n| n.has_tag_name("b")).count(), 2);
        assert_eq!(doc.input_text(), "<a><b/><b/></a>");
    }

    #[test]
    fn test_display_prints_document() {
        let doc = Document::parse("<a x=\"1\"><b>t</b></a>", "display").unwrap();
        assert_eq!(doc.to_string(), "<a x=\"1\"><b>t</b></a>");
        assert_eq!(doc.to_xml_string(), doc.to_string());
    }

    #[test]
    fn test_document_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document<'static>>();
    }
}
