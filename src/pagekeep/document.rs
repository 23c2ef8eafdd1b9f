//! # Document Tree
//!
//! Page bodies are stored as the JSON tree produced by the rich-text editor:
//! every node carries a `type` tag, optional `attrs`, an optional ordered list
//! of child nodes under `content`, and leaf text nodes carry `text` (plus
//! optional `marks`).
//!
//! ```json
//! { "type": "doc", "content": [
//!     { "type": "heading", "attrs": { "level": 1 },
//!       "content": [{ "type": "text", "text": "Hello" }] }
//! ] }
//! ```
//!
//! Keys the editor emits that are not modelled here are kept in
//! [`DocNode::extra`] so a load/save cycle never drops data. An empty JSON
//! object deserializes to an empty node, which callers treat as "no content".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<DocNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
}

impl Mark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            attrs: None,
        }
    }
}

/// A heading found while walking a document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub anchor: String,
    pub position: usize,
}

impl DocNode {
    /// Empty `doc` root.
    pub fn empty_doc() -> Self {
        Self::doc(Vec::new())
    }

    pub fn doc(children: Vec<DocNode>) -> Self {
        Self::node("doc", children)
    }

    pub fn node(node_type: impl Into<String>, children: Vec<DocNode>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            content: Some(children),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: Some("text".to_string()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::node("paragraph", vec![Self::text(text)])
    }

    /// One paragraph per blank-line separated block. Line breaks inside a
    /// block become spaces.
    pub fn from_plain_text(text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        for line in text.lines().map(str::trim).chain(std::iter::once("")) {
            if line.is_empty() {
                if !block.is_empty() {
                    paragraphs.push(Self::paragraph(block.join(" ")));
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }
        Self::doc(paragraphs)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::node("heading", vec![Self::text(text)]).with_attr("level", Value::from(level))
    }

    pub fn with_attr(mut self, key: &str, value: Value) -> Self {
        self.attrs
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value);
        self
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.get_or_insert_with(Vec::new).push(mark);
        self
    }

    /// True for `{}`: no tag, no attributes, no children, no text.
    pub fn is_empty(&self) -> bool {
        self.node_type.is_none()
            && self.attrs.is_none()
            && self.content.is_none()
            && self.text.is_none()
            && self.marks.is_none()
            && self.extra.is_empty()
    }

    pub fn kind(&self) -> &str {
        self.node_type.as_deref().unwrap_or("")
    }

    pub fn children(&self) -> &[DocNode] {
        self.content.as_deref().unwrap_or(&[])
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }

    pub fn has_mark(&self, mark_type: &str) -> bool {
        self.marks
            .as_ref()
            .is_some_and(|marks| marks.iter().any(|m| m.mark_type == mark_type))
    }

    fn is_inline(&self) -> bool {
        matches!(self.kind(), "text" | "hardBreak" | "image" | "mention")
    }

    /// Depth-first, pre-order walk over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated text of the subtree. Block children are separated by newlines.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        if self.kind() == "hardBreak" {
            out.push('\n');
        }
        for child in self.children() {
            if !child.is_inline() && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            child.collect_text(out);
        }
    }

    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    /// Headings with non-empty text, numbered in document order.
    pub fn headings(&self) -> Vec<Heading> {
        let mut headings = Vec::new();
        for node in self.descendants() {
            if node.kind() != "heading" {
                continue;
            }
            let Some(level) = node.attr("level").and_then(Value::as_u64) else {
                continue;
            };
            let text = node.plain_text();
            if text.is_empty() {
                continue;
            }
            let position = headings.len();
            let slug = text
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-");
            headings.push(Heading {
                level: level.min(6) as u8,
                anchor: format!("heading-{}-{}", position, slug),
                text,
                position,
            });
        }
        headings
    }

    /// Distinct languages declared by code blocks, in order of first use.
    pub fn code_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for node in self.descendants().filter(|n| n.kind() == "codeBlock") {
            let Some(language) = node.attr("language").and_then(Value::as_str) else {
                continue;
            };
            if !language.is_empty() && !languages.iter().any(|l| l == language) {
                languages.push(language.to_string());
            }
        }
        languages
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a DocNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DocNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
