//! # xss_guard
//!
//! Sanitizers that turn untrusted markup, text and URLs into output free of
//! script-execution vectors while keeping as much benign content as possible.
//!
//! ## Overview
//!
//! - [`MarkupSanitizer`] parses rich markup into an owned tree, unwraps
//!   elements outside the [`TagPolicy`](config::TagPolicy), strips
//!   attributes the policy does not allow, and rewrites link and image URLs
//!   through [`UrlSanitizer`].
//! - [`TextSanitizer`] escapes `<`/`>` in plain text and scrubs inline event
//!   handlers, dangerous URL schemes and `\uXXXX` escapes.
//! - [`UrlSanitizer`] returns a canonical absolute URL, or nothing if the
//!   URL is malformed or uses a deny-listed scheme.
//!
//! Every entry point fails closed: an empty string means nothing safe could
//! be produced, never that no sanitization was needed. The `try_*` variants
//! return a [`SanitizeError`] describing why.
//!
//! ## Quick start
//!
//! ```rust
//! use xss_guard::{sanitize_markup, sanitize_text, sanitize_url};
//!
//! assert_eq!(
//!     sanitize_markup(r#"<p onclick="x()">hi<script>evil()</script></p>"#),
//!     "<p>hievil()</p>"
//! );
//! assert_eq!(sanitize_text("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
//! assert_eq!(sanitize_url("javascript:alert(1)"), "");
//! ```
//!
//! ## Known limitation
//!
//! [`TextSanitizer`] and [`guards::escape_markup_chars`] escape only `<` and
//! `>`. Their output must not be placed inside attribute values.

pub mod config;
pub mod error;
pub mod guards;
pub mod sanitizer;
pub mod tree;

pub use error::{Result, SanitizeError};
pub use sanitizer::{
    MarkupSanitizer, RegexSanitizer, Sanitizer, SanitizerPipeline, TextSanitizer, UrlSanitizer,
};
pub use tree::{Element, Fragment, HtmlTreeBuilder, Node, TreeBuilder};

/// Run the default [`MarkupSanitizer`] over `markup`.
pub fn sanitize_markup(markup: &str) -> String {
    MarkupSanitizer::new().sanitize(markup)
}

/// Run the default [`TextSanitizer`] over `text`.
pub fn sanitize_text(text: &str) -> String {
    TextSanitizer::new().sanitize(text)
}

/// Sanitize a URL with [`TextSanitizer::sanitize_url`].
pub fn sanitize_url(url: &str) -> String {
    TextSanitizer::new().sanitize_url(url)
}
