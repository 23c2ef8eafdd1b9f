//! Renders document trees to HTML and Markdown.
//!
//! The tree is lowered to a stream of `pulldown_cmark` events once; the same
//! stream feeds `pulldown_cmark::html` and `pulldown_cmark_to_cmark`, so both
//! outputs always agree on structure. Node types without a Markdown
//! equivalent (callouts, toggles, bookmarks, tables) render their children.

use crate::document::DocNode;
use crate::error::{PagekeepError, Result};
use crate::model::EditorSnapshot;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Tag};
use serde_json::Value;

pub fn to_events(doc: &DocNode) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    push_block(doc, &mut events);
    events
}

/// HTML with code blocks tagged for the highlighter (`hljs language-*`).
pub fn to_html(doc: &DocNode) -> String {
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, to_events(doc).into_iter());
    html.replace("<pre><code class=\"language-", "<pre><code class=\"hljs language-")
        .replace("<pre><code>", "<pre><code class=\"hljs\">")
}

pub fn to_markdown(doc: &DocNode) -> Result<String> {
    let mut markdown = String::new();
    pulldown_cmark_to_cmark::cmark(to_events(doc).iter(), &mut markdown)
        .map_err(|e| PagekeepError::Api(format!("Markdown rendering failed: {}", e)))?;
    Ok(markdown)
}

/// The three representations written to the local fallback slots on every flush.
pub fn snapshot(doc: &DocNode) -> Result<EditorSnapshot> {
    Ok(EditorSnapshot {
        content: doc.clone(),
        html: to_html(doc),
        markdown: to_markdown(doc)?,
    })
}

fn wrap<F>(tag: Tag<'static>, out: &mut Vec<Event<'static>>, inner: F)
where
    F: FnOnce(&mut Vec<Event<'static>>),
{
    let end = tag.to_end();
    out.push(Event::Start(tag));
    inner(out);
    out.push(Event::End(end));
}

fn attr_str(node: &DocNode, key: &str) -> Option<String> {
    node.attr(key).and_then(Value::as_str).map(str::to_string)
}

fn push_children(node: &DocNode, out: &mut Vec<Event<'static>>) {
    for child in node.children() {
        push_block(child, out);
    }
}

fn push_block(node: &DocNode, out: &mut Vec<Event<'static>>) {
    match node.kind() {
        "paragraph" => wrap(Tag::Paragraph, out, |out| push_inlines(node, out)),
        "heading" => {
            let level = node
                .attr("level")
                .and_then(Value::as_u64)
                .and_then(|l| HeadingLevel::try_from(l as usize).ok())
                .unwrap_or(HeadingLevel::H1);
            let tag = Tag::Heading {
                level,
                id: None,
                classes: Vec::new(),
                attrs: Vec::new(),
            };
            wrap(tag, out, |out| push_inlines(node, out));
        }
        "bulletList" | "taskList" => wrap(Tag::List(None), out, |out| push_children(node, out)),
        "orderedList" => {
            let start = node.attr("start").and_then(Value::as_u64).unwrap_or(1);
            wrap(Tag::List(Some(start)), out, |out| push_children(node, out));
        }
        "listItem" => wrap(Tag::Item, out, |out| push_item(node, out)),
        "taskItem" => {
            let checked = node
                .attr("checked")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            wrap(Tag::Item, out, |out| {
                out.push(Event::TaskListMarker(checked));
                push_item(node, out);
            });
        }
        "blockquote" => wrap(Tag::BlockQuote(None), out, |out| push_children(node, out)),
        "codeBlock" => {
            let language = attr_str(node, "language").unwrap_or_default();
            let mut code = node.plain_text();
            if !code.ends_with('\n') {
                code.push('\n');
            }
            let tag = Tag::CodeBlock(CodeBlockKind::Fenced(CowStr::from(language)));
            wrap(tag, out, |out| out.push(Event::Text(CowStr::from(code))));
        }
        "horizontalRule" => out.push(Event::Rule),
        "bookmark" => match attr_str(node, "url") {
            Some(url) => {
                let title = attr_str(node, "title").unwrap_or_else(|| url.clone());
                wrap(Tag::Paragraph, out, |out| {
                    let tag = Tag::Link {
                        link_type: LinkType::Inline,
                        dest_url: CowStr::from(url),
                        title: CowStr::from(""),
                        id: CowStr::from(""),
                    };
                    wrap(tag, out, |out| out.push(Event::Text(CowStr::from(title))));
                });
            }
            None => push_children(node, out),
        },
        "text" | "hardBreak" | "image" => wrap(Tag::Paragraph, out, |out| push_inline(node, out)),
        _ => push_children(node, out),
    }
}

/// List items render tight: a paragraph child contributes its inline content directly.
fn push_item(node: &DocNode, out: &mut Vec<Event<'static>>) {
    let mut first = true;
    for child in node.children() {
        if child.kind() == "paragraph" {
            if !first {
                out.push(Event::SoftBreak);
            }
            push_inlines(child, out);
        } else {
            push_block(child, out);
        }
        first = false;
    }
}

fn push_inlines(node: &DocNode, out: &mut Vec<Event<'static>>) {
    for child in node.children() {
        push_inline(child, out);
    }
}

fn push_inline(node: &DocNode, out: &mut Vec<Event<'static>>) {
    match node.kind() {
        "hardBreak" => out.push(Event::HardBreak),
        "image" => {
            let src = attr_str(node, "src").unwrap_or_default();
            let alt = attr_str(node, "alt").unwrap_or_default();
            let title = attr_str(node, "title").unwrap_or_default();
            let tag = Tag::Image {
                link_type: LinkType::Inline,
                dest_url: CowStr::from(src),
                title: CowStr::from(title),
                id: CowStr::from(""),
            };
            wrap(tag, out, |out| {
                if !alt.is_empty() {
                    out.push(Event::Text(CowStr::from(alt)));
                }
            });
        }
        "text" => push_marked_text(node, out),
        _ => push_inlines(node, out),
    }
}

fn push_marked_text(node: &DocNode, out: &mut Vec<Event<'static>>) {
    let text = node.text.clone().unwrap_or_default();
    if text.is_empty() {
        return;
    }
    let mut events = if node.has_mark("code") {
        vec![Event::Code(CowStr::from(text))]
    } else {
        vec![Event::Text(CowStr::from(text))]
    };

    for mark in node.marks.iter().flatten() {
        let tag = match mark.mark_type.as_str() {
            "bold" => Tag::Strong,
            "italic" => Tag::Emphasis,
            "strike" => Tag::Strikethrough,
            "link" => {
                let href = mark
                    .attrs
                    .as_ref()
                    .and_then(|a| a.get("href"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Tag::Link {
                    link_type: LinkType::Inline,
                    dest_url: CowStr::from(href),
                    title: CowStr::from(""),
                    id: CowStr::from(""),
                }
            }
            _ => continue,
        };
        let mut wrapped = Vec::with_capacity(events.len() + 2);
        wrap(tag, &mut wrapped, |inner| inner.append(&mut events));
        events = wrapped;
    }
    out.append(&mut events);
}
