//! xmlhelper - Uniform parse errors and path-style lookups over XML documents.
//!
//! Parsing and tree storage come from [`roxmltree`]. This crate adds:
//!
//! - a loader that reports every parse failure as one [`XmlParseError`]
//!   labelled with a caller-chosen title
//! - a formatter that flattens the parser's error state into one diagnostic
//!   string
//! - lookups that walk a sequence of child tag names instead of chaining
//!   child searches by hand
//!
//! # Example
//!
//! ```
//! use xmlhelper::{traverse, Document};
//!
//! let xml = r#"<profile>
//!     <connection><remote>a.example.com</remote></connection>
//!     <connection><remote>b.example.com</remote></connection>
//! </profile>"#;
//!
//! let doc = Document::parse(xml, "client.ovpn").unwrap();
//! assert_eq!(doc.find_text(["profile", "connection", "remote"]), "a.example.com");
//!
//! let first = doc.find(["profile", "connection"]).unwrap();
//! let second = traverse::next_sibling_named(first, "connection").unwrap();
//! assert_eq!(traverse::find_text(second, ["remote"]), "b.example.com");
//! assert_eq!(traverse::find_text(second, ["port"]), "");
//! ```
//!
//! # Architecture
//!
//! - [`document`]: Loading text into a [`Document`]
//! - [`diagnostic`]: Error-state adapters and the diagnostic formatter
//! - [`traverse`]: Path, text and sibling lookups
//! - [`printer`]: Rendering a document back to text
//! - [`config`]: Load and print options
//! - [`error`]: Error type and Result alias

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod printer;
pub mod traverse;

pub use config::{LoadOptions, PrintOptions};
pub use diagnostic::{format_error, ErrorDetail, ErrorReport, ParseStatus};
pub use document::Document;
pub use error::{Result, XmlParseError};
pub use traverse::{find, find_text, next_sibling, next_sibling_named};

/// Re-exported so callers can name node types without a direct dependency.
pub use roxmltree::Node;
