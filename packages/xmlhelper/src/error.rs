//! Error type for document loading.
//!
//! Loading is the only fallible operation in this crate. Lookups that miss
//! return `None` or an empty string instead of an error.

use thiserror::Error;

/// A document failed to parse.
///
/// Displays as `"<title> : <diagnostic>"`, where the diagnostic comes from
/// [`crate::diagnostic::format_error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title} : {diagnostic}")]
pub struct XmlParseError {
    /// Caller-supplied label, e.g. a file name or config section.
    pub title: String,
    /// Flattened parser diagnostic.
    pub diagnostic: String,
}

impl XmlParseError {
    /// Create an error from a title and an already formatted diagnostic.
    pub fn new(title: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            diagnostic: diagnostic.into(),
        }
    }
}

/// Result type alias for document loading.
pub type Result<T> = std::result::Result<T, XmlParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = XmlParseError::new("profile.ovpn", "XML_ERROR_NO_ROOT_NODE");
        assert_eq!(err.to_string(), "profile.ovpn : XML_ERROR_NO_ROOT_NODE");
    }

    #[test]
    fn test_error_display_keeps_title_verbatim() {
        let err = XmlParseError::new("  section <remote>  ", "XML_ERROR_X detail");
        assert!(err.to_string().starts_with("  section <remote>   : "));
    }
}
