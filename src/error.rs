//! Error types for the `xss_guard` crate.
//!
//! These never cross the string-in/string-out entry points: every public
//! `sanitize` maps an error to the empty string. The `try_*` variants
//! expose them for callers that want to know why nothing was produced.

/// Every reason a sanitizer can refuse to produce output.
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    /// The input value was not textual.
    #[error("Input is not text")]
    NotText,

    /// The input was absent or contained only whitespace.
    #[error("Input is empty")]
    Empty,

    /// The URL could not be parsed as an absolute URL.
    #[error("Malformed URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The URL starts with a denied scheme prefix.
    #[error("Disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Re-parsing the sanitized markup kept reshaping it.
    #[error("Markup did not settle after {0} rounds")]
    Unstable(usize),

    /// The tree builder could not produce a tree from the markup.
    #[error("Tree builder error: {0}")]
    TreeBuilder(String),
}

/// A type alias for `Result<T, SanitizeError>`.
pub type Result<T> = std::result::Result<T, SanitizeError>;
