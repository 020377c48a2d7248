//! Immutable, process-wide sanitization policy.
//!
//! None of these tables can be changed at runtime. [`TagPolicy`] is built on
//! first use and shared by every sanitizer for the life of the process.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// URL scheme prefixes that are never allowed, in the order they are checked.
/// Matching is case-insensitive.
pub const PROTOCOL_DENY_LIST: &[&str] = &["javascript:", "data:", "vbscript:", "file:", "about:"];

/// Inline event-handler attribute names scrubbed from raw text.
pub const EVENT_ATTRIBUTE_DENY_LIST: &[&str] = &[
    "onload",
    "onerror",
    "onmouseover",
    "onmouseout",
    "onclick",
    "onkeypress",
    "onkeydown",
    "onkeyup",
    "onblur",
    "onfocus",
    "onchange",
    "onsubmit",
    "onreset",
    "onselect",
    "onabort",
];

const ALLOWED_TAGS: &[&str] = &[
    "p",
    "br",
    "strong",
    "em",
    "u",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "ul",
    "ol",
    "li",
    "a",
    "img",
    "blockquote",
    "code",
    "pre",
];

const ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target"]),
    ("img", &["src", "alt", "title"]),
    ("p", &["class"]),
];

static DEFAULT_POLICY: LazyLock<TagPolicy> = LazyLock::new(|| {
    let mut tags: HashMap<&'static str, HashSet<&'static str>> = ALLOWED_TAGS
        .iter()
        .map(|tag| (*tag, HashSet::new()))
        .collect();
    for (tag, attrs) in ALLOWED_ATTRIBUTES {
        if let Some(allowed) = tags.get_mut(tag) {
            allowed.extend(attrs.iter().copied());
        }
    }
    TagPolicy { tags }
});

/// Mapping from lowercase tag name to the attribute names it may keep.
///
/// A tag missing from the policy is disallowed outright. An allowed tag with
/// an empty attribute set survives with all of its attributes stripped.
#[derive(Debug)]
pub struct TagPolicy {
    tags: HashMap<&'static str, HashSet<&'static str>>,
}

impl TagPolicy {
    /// The shared, process-wide policy.
    pub fn global() -> &'static TagPolicy {
        &DEFAULT_POLICY
    }

    /// Allowed attributes for `tag`, or `None` if the tag itself is disallowed.
    /// The lookup ignores ASCII case.
    pub fn allowed_attributes(&self, tag: &str) -> Option<&HashSet<&'static str>> {
        self.tags.get(tag.to_ascii_lowercase().as_str())
    }

    /// Returns `true` if `tag` may appear in sanitized output.
    pub fn is_tag_allowed(&self, tag: &str) -> bool {
        self.allowed_attributes(tag).is_some()
    }

    /// Returns `true` if `attr` may be kept on an allowed `tag`.
    pub fn is_attribute_allowed(&self, tag: &str, attr: &str) -> bool {
        self.allowed_attributes(tag)
            .is_some_and(|attrs| attrs.contains(attr))
    }

    /// Iterate over the allowed tag names, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.keys().copied()
    }
}

/// Returns the first entry of [`PROTOCOL_DENY_LIST`] that `input` starts
/// with, ignoring case.
pub fn denied_scheme_prefix(input: &str) -> Option<&'static str> {
    let lowered = input.to_lowercase();
    PROTOCOL_DENY_LIST
        .iter()
        .copied()
        .find(|prefix| lowered.starts_with(prefix))
}
