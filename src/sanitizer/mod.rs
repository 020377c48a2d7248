//! Sanitizers for untrusted markup, text and URLs.
//!
//! Every sanitizer implements the [`Sanitizer`] trait and can be composed
//! into a [`SanitizerPipeline`] that runs them sequentially.
//!
//! Built-in sanitizers:
//!
//! - [`MarkupSanitizer`] -- tree-based allow-list filtering of rich markup.
//! - [`TextSanitizer`] -- escaping and pattern scrubbing of plain text.
//! - [`UrlSanitizer`] -- canonicalization and scheme deny-listing of URLs.
//! - [`RegexSanitizer`] -- ordered regex find-and-replace rules.
//!
//! All of them fail closed: when nothing safe can be produced the result is
//! an empty string.

mod markup;
mod regex;
mod text;
mod url;

use std::any::Any;

pub use self::markup::MarkupSanitizer;
pub use self::regex::RegexSanitizer;
pub use self::text::TextSanitizer;
pub use self::url::UrlSanitizer;

use crate::guards;

/// Trait for content sanitizers.
///
/// Each sanitizer receives a string and returns a transformed version.
/// Implementations must be `Send + Sync` and keep no state between calls.
pub trait Sanitizer: Send + Sync {
    /// Transform the given input, returning the sanitized result.
    fn sanitize(&self, input: &str) -> String;

    /// Sanitize a dynamically typed value. Anything that is not text
    /// yields an empty string.
    fn sanitize_value(&self, value: &dyn Any) -> String {
        match guards::as_text(value) {
            Some(text) => self.sanitize(text),
            None => {
                tracing::debug!("Refusing to sanitize a non-text value");
                String::new()
            }
        }
    }
}

/// An ordered chain of [`Sanitizer`] implementations applied sequentially.
///
/// Each sanitizer receives the output of the previous one. An empty pipeline
/// is a no-op.
///
/// ```
/// use xss_guard::{MarkupSanitizer, RegexSanitizer, Sanitizer, SanitizerPipeline};
///
/// let mut pipeline = SanitizerPipeline::new();
/// pipeline.add(MarkupSanitizer::new());
/// pipeline.add(RegexSanitizer::new(vec![(r"\d{3}-\d{4}", "[PHONE]")]));
///
/// let out = pipeline.sanitize("<div>call 555-1234</div><script>x()</script>");
/// assert_eq!(out, "call [PHONE]x()");
/// ```
pub struct SanitizerPipeline {
    sanitizers: Vec<Box<dyn Sanitizer>>,
}

impl SanitizerPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            sanitizers: Vec::new(),
        }
    }

    /// Append a sanitizer to the end of the pipeline.
    pub fn add(&mut self, sanitizer: impl Sanitizer + 'static) {
        self.sanitizers.push(Box::new(sanitizer));
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.add(sanitizer);
        self
    }

    /// Returns `true` if no sanitizers have been added.
    pub fn is_empty(&self) -> bool {
        self.sanitizers.is_empty()
    }

    /// Number of sanitizers in the pipeline.
    pub fn len(&self) -> usize {
        self.sanitizers.len()
    }
}

impl Sanitizer for SanitizerPipeline {
    fn sanitize(&self, input: &str) -> String {
        self.sanitizers
            .iter()
            .fold(input.to_string(), |acc, s| s.sanitize(&acc))
    }
}

impl Default for SanitizerPipeline {
    fn default() -> Self {
        Self::new()
    }
}
