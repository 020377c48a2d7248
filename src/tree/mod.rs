//! Owned markup tree and the [`TreeBuilder`] capability that produces it.
//!
//! The sanitizer never parses or serializes markup itself. It asks a
//! [`TreeBuilder`] for a [`Fragment`], rewrites the owned tree, and hands it
//! back for serialization. [`HtmlTreeBuilder`] is the default implementation.

mod html;

pub use html::HtmlTreeBuilder;

use crate::error::Result;

/// A node of the working tree.
///
/// Text never carries children or attributes; element children keep their
/// document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }
}

/// An element with its attributes in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute append.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of every attribute called `name`. Does nothing if
    /// the attribute is absent.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for (k, v) in &mut self.attributes {
            if k == name {
                *v = value.to_string();
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// The root returned by [`TreeBuilder::parse`]: an ordered list of
/// top-level nodes with no wrapping element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub children: Vec<Node>,
}

/// Host capability that turns markup into a [`Fragment`] and back.
///
/// Implementations must recover from malformed markup instead of failing
/// whenever they can; an `Err` makes the sanitizer return an empty string.
/// They are invoked once per sanitize call and must not keep per-call state.
pub trait TreeBuilder: Send + Sync {
    /// Parse `markup` into an owned tree.
    fn parse(&self, markup: &str) -> Result<Fragment>;

    /// Serialize a tree back to markup.
    fn serialize(&self, fragment: &Fragment) -> String;
}

impl<T: TreeBuilder + ?Sized> TreeBuilder for Box<T> {
    fn parse(&self, markup: &str) -> Result<Fragment> {
        (**self).parse(markup)
    }

    fn serialize(&self, fragment: &Fragment) -> String {
        (**self).serialize(fragment)
    }
}
