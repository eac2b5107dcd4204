//! Path-style navigation over a parsed tree.
//!
//! Every helper here treats a miss as a normal outcome: lookups return
//! `None` (or an empty string) instead of an error. Tag names are compared
//! against the element's local name, so `<ns:remote>` matches `"remote"`.

use std::iter;

use roxmltree::Node;

use crate::config::validate_tag_name;

/// Check if a node is an element with the given local tag name.
///
/// # Arguments
/// * `node` - Node to check
/// * `name` - Expected local tag name
///
/// # Returns
/// `true` if `node` is an element named `name`
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlhelper::traverse::has_tag;
///
/// let doc = Document::parse("<remote/>").unwrap();
/// assert!(has_tag(doc.root_element(), "remote"));
/// assert!(!has_tag(doc.root(), "remote"));
/// ```
pub fn has_tag(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `name` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, name))
}

/// Find a descendant element by walking a sequence of child tag names.
///
/// Each step takes the first matching child element of the previous match,
/// in document order. The walk stops at the first step with no match, so
/// later names are never looked at. An empty path yields `node` itself when
/// it is an element.
///
/// # Arguments
/// * `node` - Starting node (the document node or any element)
/// * `path` - Tag names, as `&str` or `String`, in any collection
///
/// # Returns
/// The element matched by the last name, or `None` if any step misses
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlhelper::traverse::find;
///
/// let xml = r#"<config><connection><remote>vpn.example.com</remote></connection></config>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let remote = find(doc.root(), ["config", "connection", "remote"]).unwrap();
/// assert_eq!(remote.text(), Some("vpn.example.com"));
///
/// let path = vec!["connection".to_string(), "missing".to_string()];
/// assert!(find(doc.root_element(), &path).is_none());
/// ```
pub fn find<'a, 'input, I>(node: Node<'a, 'input>, path: I) -> Option<Node<'a, 'input>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut current = node;

    for (step, name) in path.into_iter().enumerate() {
        let name = name.as_ref();
        match find_child(current, name) {
            Some(child) => current = child,
            None => {
                if !validate_tag_name(name) {
                    tracing::debug!(step, name, "lookup by a name no element can have");
                }
                tracing::trace!(step, name, "path lookup missed");
                return None;
            }
        }
    }

    current.is_element().then_some(current)
}

/// Find a descendant element by a slash-separated path (e.g. `"kop/nr"`).
///
/// Empty segments are ignored, so `"/a/b/"` is the same as `"a/b"`.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Slash-separated path of tag names
///
/// # Returns
/// Matching element, or `None` if the path does not resolve
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlhelper::traverse::find_by_path;
///
/// let doc = Document::parse("<artikel><kop><nr>1</nr></kop></artikel>").unwrap();
/// let nr = find_by_path(doc.root_element(), "kop/nr").unwrap();
/// assert_eq!(nr.text(), Some("1"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    find(node, path.split('/').filter(|part| !part.is_empty()))
}

/// Text of the element at `path`, or an empty string.
///
/// Returns the element's direct text. A path that does not resolve and an
/// element without text both give `""`. Use [`find`] when the two need to
/// be told apart.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Tag names, as for [`find`]
///
/// # Returns
/// Direct text of the matched element, or `""`
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlhelper::traverse::find_text;
///
/// let doc = Document::parse("<a><b>hello</b><c/></a>").unwrap();
/// let root = doc.root_element();
///
/// assert_eq!(find_text(root, ["b"]), "hello");
/// assert_eq!(find_text(root, ["c"]), "");
/// assert_eq!(find_text(root, ["d"]), "");
/// ```
pub fn find_text<I>(node: Node<'_, '_>, path: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    find(node, path)
        .and_then(|elem| elem.text())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Next sibling element, whatever its tag.
///
/// # Arguments
/// * `node` - Node to advance from
///
/// # Returns
/// The following sibling element, or `None` if `node` is the last one
pub fn next_sibling<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.next_sibling_element()
}

/// Next sibling element with the given tag name.
///
/// Siblings with other tags are skipped.
///
/// # Arguments
/// * `node` - Node to advance from
/// * `name` - Tag name to search for
///
/// # Returns
/// First following sibling element named `name`, or `None`
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlhelper::traverse::next_sibling_named;
///
/// let doc = Document::parse(r#"<r><x id="1"/><y/><x id="3"/></r>"#).unwrap();
/// let first = doc.root_element().first_element_child().unwrap();
///
/// let next = next_sibling_named(first, "x").unwrap();
/// assert_eq!(next.attribute("id"), Some("3"));
/// ```
pub fn next_sibling_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    iter::successors(node.next_sibling_element(), |n| n.next_sibling_element())
        .find(|sibling| has_tag(*sibling, name))
}

/// All child elements of `node` with the given tag name, in document order.
///
/// Built from [`find_child`] followed by repeated [`next_sibling_named`].
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `name` - Tag name to search for
///
/// # Returns
/// Iterator over matching child elements
pub fn find_all<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    iter::successors(find_child(node, name), move |n| next_sibling_named(*n, name))
}
