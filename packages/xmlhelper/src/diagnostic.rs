//! Flattening parser error state into a single diagnostic string.
//!
//! The parser's error surface comes in two shapes. The newer shape has one
//! combined detail message. The older shape has two separate fragments.
//! [`ErrorReport`] covers both, and [`format_error`] produces the same
//! flattened string whichever shape an adapter reports.
//!
//! [`ParseStatus`] is the adapter over `roxmltree`. The Cargo feature
//! `legacy-error-detail` selects which shape it reports.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Error name reported when parsing succeeded.
pub const SUCCESS_NAME: &str = "XML_SUCCESS";

/// Prefix of every failure name.
pub const ERROR_NAME_PREFIX: &str = "XML_ERROR_";

/// Splits a parser message into its text and its trailing `at row:col`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static POSITION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*?)\s+at\s+(\d+):(\d+)$").expect("valid regex"));

/// Free-text detail attached to an error name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail<'a> {
    /// Single combined message.
    Combined(Option<Cow<'a, str>>),
    /// Two independent fragments, either of which may be absent.
    Split(Option<Cow<'a, str>>, Option<Cow<'a, str>>),
}

/// Normalised view of a parser's error state.
pub trait ErrorReport {
    /// Short machine-readable classification, e.g. `XML_ERROR_NO_ROOT_NODE`.
    fn error_name(&self) -> Cow<'_, str>;

    /// Supplementary human-readable detail.
    fn detail(&self) -> ErrorDetail<'_>;
}

/// Build the diagnostic string for an error report.
///
/// The result is the error name followed by each present detail fragment,
/// separated by single spaces. Absent or empty fragments are skipped.
///
/// # Examples
/// ```
/// use std::borrow::Cow;
/// use xmlhelper::diagnostic::{format_error, ErrorDetail, ErrorReport};
///
/// struct Synthetic;
///
/// impl ErrorReport for Synthetic {
///     fn error_name(&self) -> Cow<'_, str> {
///         Cow::Borrowed("XML_ERROR_PARSING")
///     }
///
///     fn detail(&self) -> ErrorDetail<'_> {
///         ErrorDetail::Split(None, Some(Cow::Borrowed("line 3")))
///     }
/// }
///
/// assert_eq!(format_error(&Synthetic), "XML_ERROR_PARSING line 3");
/// ```
pub fn format_error<R: ErrorReport + ?Sized>(report: &R) -> String {
    let mut ret = report.error_name().into_owned();

    let fragments = match report.detail() {
        ErrorDetail::Combined(es) => [es, None],
        ErrorDetail::Split(es1, es2) => [es1, es2],
    };

    for fragment in fragments.into_iter().flatten() {
        if fragment.is_empty() {
            continue;
        }
        ret.push(' ');
        ret.push_str(&fragment);
    }

    ret
}

/// Outcome of a parse, as seen by the error formatter.
#[derive(Debug, Default)]
pub struct ParseStatus {
    error: Option<roxmltree::Error>,
}

impl ParseStatus {
    /// Status of a successful parse.
    pub fn success() -> Self {
        Self { error: None }
    }

    /// Status of a parse that failed with `error`.
    pub fn failed(error: roxmltree::Error) -> Self {
        Self { error: Some(error) }
    }

    /// Whether the parse failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The underlying parser error, if any.
    pub fn error(&self) -> Option<&roxmltree::Error> {
        self.error.as_ref()
    }

    /// The parser's message in one piece.
    #[cfg_attr(feature = "legacy-error-detail", allow(dead_code))]
    fn combined_detail(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// The parser's message and its position as separate fragments.
    #[cfg_attr(not(feature = "legacy-error-detail"), allow(dead_code))]
    fn split_detail(&self) -> (Option<String>, Option<String>) {
        let Some(error) = &self.error else {
            return (None, None);
        };

        let message = error.to_string();
        match POSITION_SUFFIX.captures(&message) {
            Some(caps) => (
                Some(caps[1].to_string()),
                Some(format!("line {} column {}", &caps[2], &caps[3])),
            ),
            None => (Some(message), None),
        }
    }
}

impl From<roxmltree::Error> for ParseStatus {
    fn from(error: roxmltree::Error) -> Self {
        Self::failed(error)
    }
}

impl ErrorReport for ParseStatus {
    fn error_name(&self) -> Cow<'_, str> {
        match &self.error {
            None => Cow::Borrowed(SUCCESS_NAME),
            Some(error) => Cow::Owned(error_name_of(error)),
        }
    }

    #[cfg(not(feature = "legacy-error-detail"))]
    fn detail(&self) -> ErrorDetail<'_> {
        ErrorDetail::Combined(self.combined_detail().map(Cow::Owned))
    }

    #[cfg(feature = "legacy-error-detail")]
    fn detail(&self) -> ErrorDetail<'_> {
        let (es1, es2) = self.split_detail();
        ErrorDetail::Split(es1.map(Cow::Owned), es2.map(Cow::Owned))
    }
}

/// Symbolic name for a parser error, derived from its variant name.
///
/// `UnexpectedCloseTag(..)` becomes `XML_ERROR_UNEXPECTED_CLOSE_TAG`.
fn error_name_of(error: &roxmltree::Error) -> String {
    let debug = format!("{error:?}");
    let variant: String = debug.chars().take_while(|c| c.is_alphanumeric()).collect();
    format!("{ERROR_NAME_PREFIX}{}", screaming_snake(&variant))
}

fn screaming_snake(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    let mut prev_lower = false;
    for c in camel.chars() {
        if c.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_uppercase());
    }
    out
}
