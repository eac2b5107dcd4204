//! Rendering a parsed document back to XML text.
//!
//! Output is meant for logging and debugging. The default rendering keeps
//! every text node as parsed, so re-parsing the output gives the same
//! elements and text.

use std::borrow::Cow;

use roxmltree::{Node, NodeType};

use crate::config::{PrintOptions, XML_DECLARATION};
use crate::document::Document;

/// Render `doc` compactly, without a declaration.
///
/// # Examples
/// ```
/// use xmlhelper::{printer, Document};
///
/// let doc = Document::parse("<a  x='1'><b>t &amp; u</b><c></c></a>", "inline").unwrap();
/// assert_eq!(printer::to_string(&doc), r#"<a x="1"><b>t &amp; u</b><c/></a>"#);
/// ```
pub fn to_string(doc: &Document<'_>) -> String {
    to_string_with(doc, &PrintOptions::default())
}

/// Render `doc` using the given options.
///
/// With an indent set, whitespace-only text inside element-only content is
/// replaced by newlines and indentation. Elements holding other text are
/// written inline so their text is unchanged.
pub fn to_string_with(doc: &Document<'_>, options: &PrintOptions) -> String {
    let mut out = String::with_capacity(doc.input_text().len());
    let pretty = options.indent.is_some();

    if options.declaration {
        out.push_str(XML_DECLARATION);
        if pretty {
            out.push('\n');
        }
    }

    let top_level = doc
        .root()
        .children()
        .filter(|child| !(pretty && is_blank_text(*child)));
    for (i, child) in top_level.enumerate() {
        if pretty && i > 0 {
            out.push('\n');
        }
        write_node(&mut out, child, options, 0);
    }

    if pretty {
        out.push('\n');
    }
    out
}

fn write_node(out: &mut String, node: Node<'_, '_>, options: &PrintOptions, depth: usize) {
    match node.node_type() {
        NodeType::Root => write_children(out, node, options, depth),
        NodeType::Element => write_element(out, node, options, depth),
        NodeType::Text => escape_into(out, node.text().unwrap_or_default(), false),
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text().unwrap_or_default());
            out.push_str("-->");
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                out.push_str("<?");
                out.push_str(pi.target);
                if let Some(value) = pi.value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
    }
}

fn write_element(out: &mut String, node: Node<'_, '_>, options: &PrintOptions, depth: usize) {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name());

    out.push('<');
    out.push_str(&name);

    // Only declarations new on this element, not inherited ones.
    let parent = node.parent_element();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }
        let inherited = parent.is_some_and(|p| {
            p.namespaces()
                .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
        });
        if inherited {
            continue;
        }
        match ns.name() {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        escape_into(out, ns.uri(), true);
        out.push('"');
    }

    for attr in node.attributes() {
        out.push(' ');
        out.push_str(&attribute_name(node, attr.namespace(), attr.name()));
        out.push_str("=\"");
        escape_into(out, attr.value(), true);
        out.push('"');
    }

    if !node.has_children() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    write_children(out, node, options, depth);
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn write_children(out: &mut String, node: Node<'_, '_>, options: &PrintOptions, depth: usize) {
    let indent = options
        .indent
        .filter(|_| node.children().all(|c| !c.is_text() || is_blank_text(c)));

    let Some(width) = indent else {
        for child in node.children() {
            write_node(out, child, options, depth + 1);
        }
        return;
    };

    let mut wrote_any = false;
    for child in node.children().filter(|c| !c.is_text()) {
        out.push('\n');
        push_indent(out, width * (depth + 1));
        write_node(out, child, options, depth + 1);
        wrote_any = true;
    }
    if wrote_any {
        out.push('\n');
        push_indent(out, width * depth);
    }
}

fn push_indent(out: &mut String, n: usize) {
    out.push_str(&" ".repeat(n));
}

fn is_blank_text(node: Node<'_, '_>) -> bool {
    node.is_text() && node.text().is_some_and(|t| t.trim().is_empty())
}

/// `prefix:name` when `uri` is bound to a prefix in scope, otherwise `name`.
fn qualified_name<'a>(node: Node<'_, '_>, uri: Option<&str>, name: &'a str) -> Cow<'a, str> {
    match uri.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => Cow::Owned(format!("{prefix}:{name}")),
        _ => Cow::Borrowed(name),
    }
}

/// Attribute name with a non-empty prefix bound to `uri`.
///
/// Unprefixed attributes are never in a namespace, so the default namespace
/// cannot stand in for a prefix here even when it has the same URI.
fn attribute_name<'a>(node: Node<'_, '_>, uri: Option<&str>, name: &'a str) -> Cow<'a, str> {
    let Some(uri) = uri else {
        return Cow::Borrowed(name);
    };

    let prefix = node
        .namespaces()
        .filter(|ns| ns.uri() == uri)
        .find_map(|ns| ns.name().filter(|p| !p.is_empty()))
        .or_else(|| node.lookup_prefix(uri).filter(|p| !p.is_empty()));
    match prefix {
        Some(prefix) => Cow::Owned(format!("{prefix}:{name}")),
        None => Cow::Borrowed(name),
    }
}

/// Escape markup characters, plus the whitespace a parser would normalise.
fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn print(xml: &str) -> String {
        to_string(&Document::parse(xml, "printer").unwrap())
    }

    #[test]
    fn test_compact_keeps_text_as_parsed() {
        let xml = "<a>\n  <b>one</b>\n  <c>two</c>\n</a>";
        assert_eq!(print(xml), xml);
    }

    #[test]
    fn test_empty_element_is_self_closed() {
        assert_eq!(print("<a><b></b></a>"), "<a><b/></a>");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            print(r#"<a v="&quot;x&quot; &amp; &lt;y&gt;">1 &lt; 2 &amp;&amp; 3 &gt; 2</a>"#),
            r#"<a v="&quot;x&quot; &amp; &lt;y&gt;">1 &lt; 2 &amp;&amp; 3 &gt; 2</a>"#
        );
    }

    #[test]
    fn test_attribute_whitespace_survives() {
        assert_eq!(print("<a v=\"x&#10;y&#9;z\"/>"), "<a v=\"x&#10;y&#9;z\"/>");
    }

    #[test]
    fn test_cdata_is_written_as_text() {
        assert_eq!(print("<a><![CDATA[<raw>]]></a>"), "<a>&lt;raw&gt;</a>");
    }

    #[test]
    fn test_comments_and_processing_instructions() {
        assert_eq!(
            print("<?style sheet?><a><!-- note --><?empty?></a>"),
            "<?style sheet?><a><!-- note --><?empty?></a>"
        );
    }

    #[test]
    fn test_namespaces() {
        let xml = r#"<r xmlns="urn:d" xmlns:p="urn:p"><p:c p:x="1"><d/></p:c></r>"#;
        assert_eq!(print(xml), xml);
    }

    #[test]
    fn test_attribute_keeps_prefix_shared_with_default_namespace() {
        let xml = r#"<r xmlns="urn:a" xmlns:p="urn:a" p:x="1"/>"#;
        let printed = print(xml);

        let reparsed = Document::parse(&printed, "reprinted").unwrap();
        let attrs: Vec<(Option<&str>, &str, &str)> = reparsed
            .root_element()
            .attributes()
            .map(|a| (a.namespace(), a.name(), a.value()))
            .collect();
        assert_eq!(attrs, vec![(Some("urn:a"), "x", "1")]);
    }

    #[test]
    fn test_xml_namespace_attribute() {
        assert_eq!(
            print(r#"<a xml:lang="nl">tekst</a>"#),
            r#"<a xml:lang="nl">tekst</a>"#
        );
    }

    #[test]
    fn test_declaration() {
        let doc = Document::parse("<a/>", "decl").unwrap();
        let opts = PrintOptions {
            declaration: true,
            indent: None,
        };
        assert_eq!(
            to_string_with(&doc, &opts),
            format!("{XML_DECLARATION}<a/>")
        );
    }

    #[test]
    fn test_pretty() {
        let doc = Document::parse(
            "<a><b>keep  this</b><c><d/></c><e>mixed <i>x</i></e></a>",
            "pretty",
        )
        .unwrap();
        let opts = PrintOptions {
            declaration: false,
            indent: Some(2),
        };
        let expected = "\
<a>
  <b>keep  this</b>
  <c>
    <d/>
  </c>
  <e>mixed <i>x</i></e>
</a>
";
        assert_eq!(to_string_with(&doc, &opts), expected);
    }

    #[test]
    fn test_pretty_replaces_existing_indentation() {
        let doc = Document::parse("<a>\n\t\t<b/>\n</a>", "pretty").unwrap();
        let out = to_string_with(&doc, &PrintOptions::pretty());
        assert_eq!(out, format!("{XML_DECLARATION}\n<a>\n    <b/>\n</a>\n"));
    }
}
