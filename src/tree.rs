//! # Render Tree
//!
//! The output of the composition pass: a plain tree of elements, text and
//! empty slots. Renderers build it with a small builder API; the `html`
//! writer serializes it, and tests query it directly.
//!
//! Styles are kept as an ordered property map rather than a string so that
//! later stages (framing, spacing overrides) can overwrite individual
//! properties without reparsing.

use indexmap::IndexMap;
use serde::Serialize;

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum VNode {
    Element(Element),
    Text { text: String },
    /// Renders nothing. Produced for skipped sections and absent fields.
    Empty,
}

/// An element with attributes, inline style and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VNode>,
}

/// Start building an element.
pub fn el(tag: &str) -> Element {
    Element {
        tag: tag.to_string(),
        attrs: IndexMap::new(),
        style: IndexMap::new(),
        children: vec![],
    }
}

/// A text node.
pub fn text(s: impl Into<String>) -> VNode {
    VNode::Text { text: s.into() }
}

impl Element {
    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn attr_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    /// Append to the `class` attribute.
    pub fn class(mut self, name: &str) -> Self {
        let entry = self.attrs.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(name);
        self
    }

    pub fn style(mut self, prop: &str, value: impl Into<String>) -> Self {
        self.style.insert(prop.to_string(), value.into());
        self
    }

    pub fn style_opt(self, prop: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.style(prop, v),
            None => self,
        }
    }

    /// Merge a whole style map; later entries overwrite earlier ones.
    pub fn styles(mut self, styles: IndexMap<String, String>) -> Self {
        self.style.extend(styles);
        self
    }

    pub fn child(mut self, node: impl Into<VNode>) -> Self {
        let node = node.into();
        if node != VNode::Empty {
            self.children.push(node);
        }
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<VNode>,
    {
        for node in nodes {
            self = self.child(node);
        }
        self
    }

    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(text(s))
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn get_style(&self, prop: &str) -> Option<&str> {
        self.style.get(prop).map(String::as_str)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|n| n == name))
    }
}

impl From<Element> for VNode {
    fn from(e: Element) -> Self {
        VNode::Element(e)
    }
}

impl<T: Into<VNode>> From<Option<T>> for VNode {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(VNode::Empty)
    }
}

impl VNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, VNode::Empty)
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text { text } => out.push_str(text),
            VNode::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            VNode::Empty => {}
        }
    }

    /// Depth-first, pre-order walk over every element.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        if let VNode::Element(e) = self {
            visit(e);
            for c in &e.children {
                c.walk(visit);
            }
        }
    }

    /// All elements carrying the given class, in document order.
    pub fn find_by_class(&self, name: &str) -> Vec<&Element> {
        let mut found = vec![];
        self.walk(&mut |e| {
            if e.has_class(name) {
                found.push(e);
            }
        });
        found
    }

    /// All elements with the given tag, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = vec![];
        self.walk(&mut |e| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_skips_empty_children() {
        let node: VNode = el("div")
            .class("a")
            .class("b")
            .child(VNode::Empty)
            .child(None::<Element>)
            .text("hi")
            .into();
        let e = node.as_element().unwrap();
        assert_eq!(e.children.len(), 1);
        assert!(e.has_class("b"));
        assert_eq!(e.get_attr("class"), Some("a b"));
    }

    #[test]
    fn test_queries() {
        let node: VNode = el("section")
            .child(el("h2").class("title").text("One"))
            .child(el("p").text(" two"))
            .into();
        assert_eq!(node.text_content(), "One two");
        assert_eq!(node.find_by_class("title").len(), 1);
        assert_eq!(node.find_by_tag("p").len(), 1);
    }
}
