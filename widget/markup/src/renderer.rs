//! Renderers over the block IR: chat-bubble HTML and plain text.

use std::fmt::Write;

use crate::inline;
use crate::ir::{Block, BlockParser};

/// Render reply text straight to chat-bubble HTML.
///
/// Never fails: malformed fences and unmatched emphasis markers render as
/// literal (escaped) characters, and empty or whitespace-only input renders
/// to the empty string. Calling this twice on the same input yields
/// byte-identical output.
pub fn render(text: &str) -> String {
    Renderer::to_html(&BlockParser::parse(text))
}

pub struct Renderer;

impl Renderer {
    /// Render blocks to HTML in document order, with no separators.
    pub fn to_html(blocks: &[Block]) -> String {
        let mut out = String::new();
        for block in blocks {
            match block {
                Block::Paragraph(text) => {
                    out.push_str("<p>");
                    out.push_str(&inline::apply(text));
                    out.push_str("</p>");
                }
                Block::UnorderedList(items) => Self::list(&mut out, "ul", items),
                Block::OrderedList(items) => Self::list(&mut out, "ol", items),
                Block::CodeBlock { body, .. } => {
                    out.push_str("<pre><code>");
                    out.push_str(body);
                    out.push_str("</code></pre>");
                }
            }
        }
        out
    }

    fn list(out: &mut String, tag: &str, items: &[String]) {
        let _ = write!(out, "<{tag}>");
        for item in items {
            out.push_str("<li>");
            out.push_str(&inline::apply(item));
            out.push_str("</li>");
        }
        let _ = write!(out, "</{tag}>");
    }

    /// Render blocks to plain text for voice and notification previews.
    ///
    /// Inline markers are stripped, list items keep a textual marker, and
    /// code blocks collapse to a label carrying the fence's language tag.
    pub fn to_plain_text(blocks: &[Block]) -> String {
        let mut out = String::new();
        for block in blocks {
            match block {
                Block::Paragraph(text) => {
                    out.push_str(&inline::strip(text));
                    out.push('\n');
                }
                Block::UnorderedList(items) => {
                    for item in items {
                        out.push_str("- ");
                        out.push_str(&inline::strip(item));
                        out.push('\n');
                    }
                }
                Block::OrderedList(items) => {
                    for (n, item) in items.iter().enumerate() {
                        let _ = write!(out, "{}. ", n + 1);
                        out.push_str(&inline::strip(item));
                        out.push('\n');
                    }
                }
                Block::CodeBlock { lang, .. } => {
                    if lang.is_empty() {
                        out.push_str("(code example)\n");
                    } else {
                        let _ = writeln!(out, "({lang} code example)");
                    }
                }
            }
        }
        out
    }
}
