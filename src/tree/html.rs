//! Default [`TreeBuilder`] backed by `scraper` (html5ever) and `ego-tree`.

use ego_tree::NodeRef;
use scraper::Html;
use scraper::node::Node as HtmlNode;

use super::{Element, Fragment, Node, TreeBuilder};
use crate::error::Result;

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tree builder using the WHATWG parsing algorithm in body context.
///
/// Parsing never fails: malformed markup is repaired the way a browser
/// would repair it. Comments, doctypes and processing instructions are
/// dropped. Serialization escapes all text, including the content of
/// raw-text elements such as `script`.
///
/// ```
/// use xss_guard::tree::{HtmlTreeBuilder, TreeBuilder};
///
/// let builder = HtmlTreeBuilder;
/// let fragment = builder.parse("<p>a<b>b</p>").unwrap();
/// assert_eq!(builder.serialize(&fragment), "<p>a<b>b</b></p>");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlTreeBuilder;

impl TreeBuilder for HtmlTreeBuilder {
    fn parse(&self, markup: &str) -> Result<Fragment> {
        let document = Html::parse_fragment(markup);
        if !document.errors.is_empty() {
            tracing::trace!(errors = document.errors.len(), "Recovered from markup errors");
        }

        // Fragment parsing wraps the content in a synthetic <html> element.
        let mut children = Vec::new();
        for child in document.root_element().children() {
            convert_node(child, &mut children);
        }
        Ok(Fragment { children })
    }

    fn serialize(&self, fragment: &Fragment) -> String {
        let mut out = String::new();
        for node in &fragment.children {
            serialize_node(node, &mut out);
        }
        out
    }
}

fn convert_node(node: NodeRef<HtmlNode>, out: &mut Vec<Node>) {
    match node.value() {
        HtmlNode::Document | HtmlNode::Fragment => {
            for child in node.children() {
                convert_node(child, out);
            }
        }
        HtmlNode::Element(el) => {
            let mut children = Vec::new();
            for child in node.children() {
                convert_node(child, &mut children);
            }
            out.push(Node::Element(Element {
                tag: el.name().to_string(),
                attributes: el
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                children,
            }));
        }
        HtmlNode::Text(text) => {
            out.push(Node::Text(String::from(&**text)));
        }
        _ => {}
    }
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => push_escaped(text, false, out),
        Node::Element(el) => {
            let tag = el.tag.as_str();
            out.push('<');
            out.push_str(tag);
            for (k, v) in &el.attributes {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                push_escaped(v, true, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            // The parser drops one newline right after <pre>; put it back so
            // re-parsing yields the same text.
            if tag == "pre" && matches!(el.children.first(), Some(Node::Text(t)) if t.starts_with('\n'))
            {
                out.push('\n');
            }

            for child in &el.children {
                serialize_node(child, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn push_escaped(input: &str, attr_mode: bool, out: &mut String) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attr_mode => out.push_str("&quot;"),
            '<' if !attr_mode => out.push_str("&lt;"),
            '>' if !attr_mode => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
