//! Tree-based markup sanitizer.

use super::{Sanitizer, UrlSanitizer};
use crate::config::TagPolicy;
use crate::error::{Result, SanitizeError};
use crate::guards;
use crate::tree::{Element, Fragment, HtmlTreeBuilder, Node, TreeBuilder};

/// Extra parse/clean/serialize rounds allowed before giving up.
const MAX_SETTLE_ROUNDS: usize = 8;

/// Sanitizer that filters rich markup against the global [`TagPolicy`].
///
/// The markup is parsed into an owned tree by a [`TreeBuilder`]. Elements
/// whose tag is not in the policy are unwrapped: the element goes, its
/// children take its place and are filtered in turn. Surviving elements
/// lose every attribute the policy does not list for them, and `a[href]` /
/// `img[src]` are rewritten through [`UrlSanitizer`]. Text is never removed.
///
/// # Example
///
/// ```
/// use xss_guard::{MarkupSanitizer, Sanitizer};
///
/// let sanitizer = MarkupSanitizer::new();
/// let html = r#"<div><p onclick="x()">Hi <a href="javascript:x()">there</a></p></div>"#;
/// assert_eq!(sanitizer.sanitize(html), r#"<p>Hi <a href="">there</a></p>"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarkupSanitizer<B = HtmlTreeBuilder> {
    builder: B,
    urls: UrlSanitizer,
}

impl MarkupSanitizer {
    /// Create a sanitizer backed by [`HtmlTreeBuilder`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: TreeBuilder> MarkupSanitizer<B> {
    /// Create a sanitizer that parses and serializes with `builder`.
    pub fn with_tree_builder(builder: B) -> Self {
        Self {
            builder,
            urls: UrlSanitizer::new(),
        }
    }

    /// Sanitize `markup`, reporting why nothing was produced.
    ///
    /// Unwrapping can leave nesting the parser reshapes on the next parse
    /// (a heading inside a heading, say), so the cleaned output is fed back
    /// through the builder until it stops changing. Output that is blank,
    /// or that never settles, is refused.
    pub fn try_sanitize(&self, markup: &str) -> Result<String> {
        if guards::is_empty(Some(markup)) {
            return Err(SanitizeError::Empty);
        }

        let mut current = self.clean_once(markup)?;
        for _ in 0..MAX_SETTLE_ROUNDS {
            if guards::is_empty(Some(&current)) {
                return Err(SanitizeError::Empty);
            }
            let next = self.clean_once(&current)?;
            if next == current {
                return Ok(current);
            }
            tracing::trace!("Sanitized markup reshaped on re-parse");
            current = next;
        }
        Err(SanitizeError::Unstable(MAX_SETTLE_ROUNDS))
    }

    fn clean_once(&self, markup: &str) -> Result<String> {
        let fragment = self.builder.parse(markup)?;
        let cleaned = self.clean_fragment(fragment);
        Ok(self.builder.serialize(&cleaned))
    }

    /// Alias of [`Sanitizer::sanitize`] for render paths.
    pub fn render(&self, markup: &str) -> String {
        self.sanitize(markup)
    }

    /// Filter an already-built tree against the policy.
    pub fn clean_fragment(&self, fragment: Fragment) -> Fragment {
        Fragment {
            children: self.clean_children(fragment.children),
        }
    }

    // The replacement list is built in full before it is assigned, so no
    // sibling list is ever spliced while it is being walked.
    fn clean_children(&self, children: Vec<Node>) -> Vec<Node> {
        let mut cleaned = Vec::with_capacity(children.len());
        for child in children {
            self.clean_node(child, &mut cleaned);
        }
        cleaned
    }

    fn clean_node(&self, node: Node, out: &mut Vec<Node>) {
        match node {
            Node::Text(_) => out.push(node),
            Node::Element(mut el) => {
                let policy = TagPolicy::global();
                let Some(allowed) = policy.allowed_attributes(&el.tag) else {
                    tracing::trace!(tag = %el.tag, "Unwrapping disallowed element");
                    for child in el.children {
                        self.clean_node(child, out);
                    }
                    return;
                };

                el.attributes.retain(|(name, _)| {
                    let keep = allowed.contains(name.as_str());
                    if !keep {
                        tracing::trace!(tag = %el.tag, attr = %name, "Stripping attribute");
                    }
                    keep
                });
                self.rewrite_urls(&mut el);
                el.children = self.clean_children(std::mem::take(&mut el.children));
                out.push(Node::Element(el));
            }
        }
    }

    fn rewrite_urls(&self, el: &mut Element) {
        let attr = match el.tag.to_ascii_lowercase().as_str() {
            "a" => "href",
            "img" => "src",
            _ => return,
        };
        if let Some(url) = el.attr(attr) {
            let safe = self.urls.sanitize(url);
            el.set_attr(attr, &safe);
        }
    }
}

impl<B: TreeBuilder> Sanitizer for MarkupSanitizer<B> {
    fn sanitize(&self, markup: &str) -> String {
        self.try_sanitize(markup).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Markup sanitized to nothing");
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(markup: &str) -> String {
        MarkupSanitizer::new().sanitize(markup)
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n\t"), "");
        assert!(matches!(
            MarkupSanitizer::new().try_sanitize("  "),
            Err(SanitizeError::Empty)
        ));
    }

    #[test]
    fn allowed_markup_passes_through() {
        let html = r#"<h1>Title</h1><p class="lead">Some <strong>bold</strong> and <em>em</em></p><ul><li>one</li></ul>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn script_is_unwrapped_keeping_text() {
        let out = sanitize("<script>evil</script>text");
        assert_eq!(out, "eviltext");
    }

    #[test]
    fn nested_disallowed_tags_are_flattened() {
        let html = "<div><section><span><strong>kept</strong> tail</span></section></div>";
        assert_eq!(sanitize(html), "<strong>kept</strong> tail");
    }

    #[test]
    fn unwrapped_children_keep_their_position() {
        let html = "<p>a<span>b<em>c</em>d</span>e</p>";
        assert_eq!(sanitize(html), "<p>ab<em>c</em>de</p>");
    }

    #[test]
    fn disallowed_attributes_are_stripped() {
        let html = r#"<p class="x" style="color:red" onclick="go()">hi</p><strong id="s">b</strong>"#;
        assert_eq!(sanitize(html), r#"<p class="x">hi</p><strong>b</strong>"#);
    }

    #[test]
    fn anchor_href_is_sanitized() {
        let html = r#"<a href="https://example.com/a?b=1" title="t" target="_blank" rel="x">ok</a>"#;
        assert_eq!(
            sanitize(html),
            r#"<a href="https://example.com/a?b=1" title="t" target="_blank">ok</a>"#
        );
        assert_eq!(
            sanitize(r#"<a href="JAVASCRIPT:alert(1)">x</a>"#),
            r#"<a href="">x</a>"#
        );
    }

    #[test]
    fn image_src_is_sanitized() {
        let html = r#"<img src="data:image/svg+xml;base64,AAAA" onerror="alert(1)" alt="pic">"#;
        assert_eq!(sanitize(html), r#"<img src="" alt="pic">"#);
        assert_eq!(
            sanitize(r#"<img src="https://cdn.example.com/x.png">"#),
            r#"<img src="https://cdn.example.com/x.png">"#
        );
    }

    #[test]
    fn anchor_without_href_is_untouched() {
        assert_eq!(sanitize(r#"<a title="t">x</a>"#), r#"<a title="t">x</a>"#);
    }

    #[test]
    fn escaped_text_stays_escaped() {
        let out = sanitize("&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(out, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn svg_and_iframe_payloads_are_defused() {
        let out = sanitize(r#"<svg onload="alert(1)"><a href="x">y</a></svg><iframe srcdoc="<script>x</script>"></iframe>"#);
        assert!(!out.contains("<svg"));
        assert!(!out.contains("onload"));
        assert!(!out.contains("<iframe"));
        assert!(!out.contains("<script"));
    }

    #[test]
    fn clean_fragment_works_on_prebuilt_trees() {
        let fragment = Fragment {
            children: vec![
                Element::new("DIV")
                    .with_child(
                        Element::new("P")
                            .with_attr("onclick", "x()")
                            .with_child(Node::text("hi"))
                            .into(),
                    )
                    .into(),
            ],
        };
        let cleaned = MarkupSanitizer::new().clean_fragment(fragment);
        assert_eq!(
            cleaned.children,
            vec![Node::Element(Element::new("P").with_child(Node::text("hi")))]
        );
    }

    struct FailingBuilder;

    impl TreeBuilder for FailingBuilder {
        fn parse(&self, _markup: &str) -> Result<Fragment> {
            Err(SanitizeError::TreeBuilder("unavailable".into()))
        }

        fn serialize(&self, _fragment: &Fragment) -> String {
            unreachable!("parse never succeeds")
        }
    }

    #[test]
    fn tree_builder_failure_is_empty() {
        let sanitizer = MarkupSanitizer::with_tree_builder(FailingBuilder);
        assert_eq!(sanitizer.sanitize("<p>x</p>"), "");
    }

    #[test]
    fn whitespace_only_result_is_empty() {
        assert_eq!(sanitize("<div> </div>"), "");
        assert_eq!(sanitize("<span>\n\t</span><script> </script>"), "");
        assert!(matches!(
            MarkupSanitizer::new().try_sanitize("<section>  </section>"),
            Err(SanitizeError::Empty)
        ));
    }

    #[test]
    fn reshaped_nesting_settles() {
        let once = sanitize("<h1><div><h2>x</h2></div></h1>");
        assert_eq!(once, "<h1></h1><h2>x</h2>");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn list_items_inside_unwrapped_wrapper_are_stable() {
        let once = sanitize("<ul><div><li>a</li><li>b</li></div></ul>");
        assert_eq!(once, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(sanitize(&once), once);
    }

    struct GrowingBuilder;

    impl TreeBuilder for GrowingBuilder {
        fn parse(&self, markup: &str) -> Result<Fragment> {
            Ok(Fragment {
                children: vec![Node::text(markup)],
            })
        }

        fn serialize(&self, fragment: &Fragment) -> String {
            match fragment.children.first() {
                Some(Node::Text(t)) => format!("{t}+"),
                _ => String::new(),
            }
        }
    }

    #[test]
    fn output_that_never_settles_is_refused() {
        let sanitizer = MarkupSanitizer::with_tree_builder(GrowingBuilder);
        assert!(matches!(
            sanitizer.try_sanitize("x"),
            Err(SanitizeError::Unstable(_))
        ));
        assert_eq!(sanitizer.sanitize("x"), "");
    }

    #[test]
    fn render_matches_sanitize() {
        let sanitizer = MarkupSanitizer::new();
        let html = "<blockquote><code>x</code></blockquote><font>y</font>";
        assert_eq!(sanitizer.render(html), sanitizer.sanitize(html));
    }
}
