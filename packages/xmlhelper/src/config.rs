//! Options and constants for loading and printing documents.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default cap on the number of nodes a single document may contain.
///
/// Matches the parser's own default, which is effectively unbounded.
pub const DEFAULT_NODES_LIMIT: u32 = u32::MAX;

/// Indent width used by [`PrintOptions::pretty`].
pub const DEFAULT_INDENT: usize = 4;

/// Declaration written when [`PrintOptions::declaration`] is set.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XML `Name` production, restricted to the characters config files use.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{N}_.\-]*$").expect("valid regex")
});

/// Parser limits applied when loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Accept (and skip) a DTD instead of rejecting the document.
    pub allow_dtd: bool,
    /// Maximum number of nodes before parsing fails.
    pub nodes_limit: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            allow_dtd: false,
            nodes_limit: DEFAULT_NODES_LIMIT,
        }
    }
}

impl LoadOptions {
    /// Convert to the parser's options for input borrowed for `'input`.
    pub(crate) fn to_parsing_options<'input>(self) -> roxmltree::ParsingOptions<'input> {
        let mut opts = roxmltree::ParsingOptions::default();
        opts.allow_dtd = self.allow_dtd;
        opts.nodes_limit = self.nodes_limit;
        opts
    }
}

/// How [`crate::printer::to_string_with`] renders a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// Emit an XML declaration before the root element.
    pub declaration: bool,
    /// Indent element-only content by this many spaces per level.
    /// `None` keeps the output compact.
    pub indent: Option<usize>,
}

impl PrintOptions {
    /// Declaration plus [`DEFAULT_INDENT`] indentation.
    pub fn pretty() -> Self {
        Self {
            declaration: true,
            indent: Some(DEFAULT_INDENT),
        }
    }
}

/// Check whether `name` could be the local name of an element.
///
/// Prefixed names (`ns:tag`) are rejected because lookups compare local names.
///
/// # Examples
/// ```
/// use xmlhelper::config::validate_tag_name;
///
/// assert!(validate_tag_name("remote"));
/// assert!(validate_tag_name("tls-auth"));
/// assert!(!validate_tag_name("ns:remote"));
/// assert!(!validate_tag_name(""));
/// ```
pub fn validate_tag_name(name: &str) -> bool {
    TAG_NAME_PATTERN.is_match(name)
}
