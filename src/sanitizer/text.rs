//! Pattern-based scrubber for text that is not meant to become markup.

use std::sync::LazyLock;

use super::{RegexSanitizer, Sanitizer, UrlSanitizer};
use crate::config::{self, EVENT_ATTRIBUTE_DENY_LIST, PROTOCOL_DENY_LIST};
use crate::guards;

/// Removal rules, in the order they run: quoted event-handler attributes,
/// deny-listed scheme prefixes up to the next whitespace, angle bracket or
/// quote, then `\uXXXX` escape sequences.
static SCRUB_RULES: LazyLock<RegexSanitizer> = LazyLock::new(|| {
    let events = EVENT_ATTRIBUTE_DENY_LIST
        .iter()
        .map(|name| format!(r#"(?i){name}\s*=\s*["'].*?["']"#));
    let protocols = PROTOCOL_DENY_LIST
        .iter()
        .map(|prefix| format!(r#"(?i){}[^\s<>"']*"#, ::regex::escape(prefix)));
    let unicode = std::iter::once(r"\\u[0-9A-Fa-f]{4}".to_string());

    RegexSanitizer::removing(events.chain(protocols).chain(unicode))
        .expect("text scrub patterns are valid")
});

/// Sanitizer for untrusted plain text.
///
/// Escapes `<` and `>`, then scrubs quoted inline event handlers, dangerous
/// scheme prefixes and `\uXXXX` escapes. Scrubbing repeats until the text
/// stops changing, so a removal can never leave behind a freshly assembled
/// banned pattern.
///
/// `&`, `"` and `'` are not escaped; the output is not safe inside an
/// attribute value without further escaping.
///
/// ```
/// use xss_guard::{Sanitizer, TextSanitizer};
///
/// let text = TextSanitizer::new();
/// assert_eq!(text.sanitize(r#"<img onerror="alert(1)">"#), "&lt;img &gt;");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TextSanitizer {
    urls: UrlSanitizer,
}

impl TextSanitizer {
    /// Create a text sanitizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run [`UrlSanitizer`] and re-check the result against the scheme
    /// deny-list.
    pub fn sanitize_url(&self, url: &str) -> String {
        let sanitized = self.urls.sanitize(url);
        if let Some(prefix) = config::denied_scheme_prefix(&sanitized) {
            tracing::debug!(prefix, "Denied scheme survived URL sanitization");
            return String::new();
        }
        sanitized
    }

    /// [`sanitize_url`](Self::sanitize_url) for a dynamically typed value.
    pub fn sanitize_url_value(&self, value: &dyn std::any::Any) -> String {
        guards::as_text(value)
            .map(|url| self.sanitize_url(url))
            .unwrap_or_default()
    }
}

impl Sanitizer for TextSanitizer {
    fn sanitize(&self, text: &str) -> String {
        if guards::is_empty(Some(text)) {
            return String::new();
        }

        let mut current = guards::escape_markup_chars(text);
        loop {
            let next = SCRUB_RULES.sanitize(&current);
            if next == current {
                break;
            }
            current = next;
        }

        if guards::is_empty(Some(&current)) {
            return String::new();
        }
        current
    }
}
