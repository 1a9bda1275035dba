//! # HTML Writer
//!
//! Serializes a render tree into an HTML fragment. Text and attribute values
//! are always escaped; there is no raw-HTML node, so section content can
//! never inject markup.

use crate::tree::{Element, VNode};

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "source", "meta", "link"];

/// Writes render trees as HTML.
pub struct HtmlWriter {
    pretty: bool,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Emit one element per line, indented by depth.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn write(&self, node: &VNode) -> String {
        let mut out = String::new();
        self.write_node(node, 0, &mut out);
        if self.pretty && !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    fn write_node(&self, node: &VNode, depth: usize, out: &mut String) {
        match node {
            VNode::Empty => {}
            VNode::Text { text } => out.push_str(&escape_text(text)),
            VNode::Element(e) => self.write_element(e, depth, out),
        }
    }

    fn write_element(&self, e: &Element, depth: usize, out: &mut String) {
        if self.pretty {
            if depth > 0 {
                out.push('\n');
            }
            out.push_str(&"  ".repeat(depth));
        }
        out.push('<');
        out.push_str(&e.tag);
        for (k, v) in &e.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape_attr(v));
            out.push('"');
        }
        if !e.style.is_empty() {
            let css: Vec<String> = e.style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            out.push_str(" style=\"");
            out.push_str(&escape_attr(&css.join("; ")));
            out.push('"');
        }
        if VOID_ELEMENTS.contains(&e.tag.as_str()) {
            out.push_str(" />");
            return;
        }
        out.push('>');

        let has_element_children = e.children.iter().any(|c| matches!(c, VNode::Element(_)));
        for c in &e.children {
            self.write_node(c, depth + 1, out);
        }
        if self.pretty && has_element_children {
            out.push('\n');
            out.push_str(&"  ".repeat(depth));
        }
        out.push_str("</");
        out.push_str(&e.tag);
        out.push('>');
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::el;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node: VNode = el("a")
            .attr("href", "/x?a=1&b=\"2\"")
            .text("<script>alert(1)</script>")
            .into();
        let html = HtmlWriter::new().write(&node);
        assert_eq!(
            html,
            "<a href=\"/x?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;alert(1)&lt;/script&gt;</a>"
        );
    }

    #[test]
    fn test_void_elements_and_style() {
        let node: VNode = el("div")
            .style("padding-top", "8px")
            .style("color", "red")
            .child(el("img").attr("src", "a.png"))
            .into();
        let html = HtmlWriter::new().write(&node);
        assert_eq!(
            html,
            "<div style=\"padding-top: 8px; color: red\"><img src=\"a.png\" /></div>"
        );
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(HtmlWriter::new().write(&VNode::Empty), "");
    }
}
