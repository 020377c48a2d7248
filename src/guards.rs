//! Type and emptiness predicates plus the character-level primitives the
//! sanitizers are built from.
//!
//! Escaping here is deliberately minimal: only `<` and `>` are touched.
//! `&`, `"` and `'` pass through unchanged, so output of
//! [`escape_markup_chars`] is not safe inside a quoted attribute value.

use std::any::Any;
use std::borrow::Cow;

use url::Url;

use crate::error::Result;

/// Returns `true` if `input` is absent or trims to nothing.
pub fn is_empty(input: Option<&str>) -> bool {
    input.is_none_or(|s| s.trim().is_empty())
}

/// Returns `true` if the dynamically typed `value` holds text.
///
/// See [`as_text`] for the types that count as text.
pub fn is_string_type(value: &dyn Any) -> bool {
    as_text(value).is_some()
}

/// Borrow the text held by a dynamically typed value.
///
/// Recognises `String`, `&'static str`, `Box<str>`, `Cow<'static, str>` and
/// `Option<String>` / `Option<&'static str>` holding `Some`. Anything else,
/// including `None`, yields `None`.
///
/// ```
/// use xss_guard::guards::as_text;
///
/// assert_eq!(as_text(&String::from("hi")), Some("hi"));
/// assert_eq!(as_text(&42_u32), None);
/// assert_eq!(as_text(&None::<String>), None);
/// ```
pub fn as_text(value: &dyn Any) -> Option<&str> {
    value
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| value.downcast_ref::<&'static str>().copied())
        .or_else(|| value.downcast_ref::<Box<str>>().map(|s| &**s))
        .or_else(|| value.downcast_ref::<Cow<'static, str>>().map(|s| &**s))
        .or_else(|| {
            value
                .downcast_ref::<Option<String>>()
                .and_then(|s| s.as_deref())
        })
        .or_else(|| value.downcast_ref::<Option<&'static str>>().and_then(|s| *s))
}

/// Delete every `<` and `>` from `input`.
pub fn remove_angle_brackets(input: &str) -> String {
    input.replace(['<', '>'], "")
}

/// Replace `<` with `&lt;` and `>` with `&gt;`. Nothing else is escaped.
pub fn escape_markup_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strictly parse `input` as an absolute URL and return its canonical
/// serialization.
pub fn try_canonicalize_url(input: &str) -> Result<String> {
    Ok(Url::parse(input)?.to_string())
}

/// Like [`try_canonicalize_url`], but any parse failure yields an empty
/// string.
pub fn canonicalize_url(input: &str) -> String {
    try_canonicalize_url(input).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "URL failed to parse");
        String::new()
    })
}
