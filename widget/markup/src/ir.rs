//! Block-level intermediate representation.
//!
//! Parses reply text into a strongly-typed block sequence. Line structure is
//! resolved by a single-state machine, which keeps list/paragraph nesting
//! well-formed in one pass over the lines with no backtracking.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::escape::escape_text;
use crate::fence::{Segment, split_fences};

/// A unit of rendered output, in document order.
///
/// Paragraph and list-item text is escaped source with the list marker
/// stripped; inline markers are still present and resolved at render time.
/// Fence bodies are verbatim (escaped) and never receive inline substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(String),
    UnorderedList(Vec<String>),
    OrderedList(Vec<String>),
    CodeBlock { lang: String, body: String },
}

/// Which list class a run of marker lines belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    Unordered,
    Ordered,
}

pub struct BlockParser;

impl BlockParser {
    /// Escape the source and parse it into blocks.
    pub fn parse(source: &str) -> Vec<Block> {
        let escaped = escape_text(source);
        let mut blocks = Vec::new();
        for segment in split_fences(&escaped) {
            match segment {
                Segment::Fence { lang, body } => blocks.push(Block::CodeBlock { lang, body }),
                Segment::Prose(text) => collect_prose(&text, &mut blocks),
            }
        }
        blocks
    }
}

static UNORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s").unwrap());
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s").unwrap());

/// Walk prose lines with one piece of state: the currently open list, if any.
///
/// A marker line of the other list class closes the open list and starts a
/// new one; any other non-empty line closes the open list and becomes a
/// paragraph; an empty line closes the open list but emits nothing.
fn collect_prose(text: &str, blocks: &mut Vec<Block>) {
    let mut open: Option<(ListType, Vec<String>)> = None;
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(item) = strip_marker(&UNORDERED_MARKER, line) {
            push_item(&mut open, blocks, ListType::Unordered, item);
        } else if let Some(item) = strip_marker(&ORDERED_MARKER, line) {
            push_item(&mut open, blocks, ListType::Ordered, item);
        } else {
            close_list(&mut open, blocks);
            if !line.is_empty() {
                blocks.push(Block::Paragraph(line.to_string()));
            }
        }
    }
    close_list(&mut open, blocks);
}

fn strip_marker<'a>(marker: &Regex, line: &'a str) -> Option<&'a str> {
    marker.find(line).map(|m| &line[m.end()..])
}

fn push_item(
    open: &mut Option<(ListType, Vec<String>)>,
    blocks: &mut Vec<Block>,
    kind: ListType,
    item: &str,
) {
    match open {
        Some((current, items)) if *current == kind => items.push(item.to_string()),
        _ => {
            close_list(open, blocks);
            *open = Some((kind, vec![item.to_string()]));
        }
    }
}

fn close_list(open: &mut Option<(ListType, Vec<String>)>, blocks: &mut Vec<Block>) {
    if let Some((kind, items)) = open.take() {
        blocks.push(match kind {
            ListType::Unordered => Block::UnorderedList(items),
            ListType::Ordered => Block::OrderedList(items),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_become_paragraphs_in_order() {
        assert_eq!(
            BlockParser::parse("first\nsecond"),
            vec![
                Block::Paragraph("first".to_string()),
                Block::Paragraph("second".to_string()),
            ]
        );
    }

    #[test]
    fn marker_run_accumulates_into_one_list() {
        assert_eq!(
            BlockParser::parse("- a\n- b"),
            vec![Block::UnorderedList(vec!["a".to_string(), "b".to_string()])]
        );
    }

    #[test]
    fn ordered_markers_accept_dot_and_paren() {
        assert_eq!(
            BlockParser::parse("1. a\n2) b"),
            vec![Block::OrderedList(vec!["a".to_string(), "b".to_string()])]
        );
    }

    #[test]
    fn list_type_is_fixed_per_run() {
        // Switching marker class closes the run and opens a new list.
        assert_eq!(
            BlockParser::parse("1. a\n- b"),
            vec![
                Block::OrderedList(vec!["a".to_string()]),
                Block::UnorderedList(vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn empty_line_terminates_list_without_a_paragraph() {
        assert_eq!(
            BlockParser::parse("- a\n\n- b"),
            vec![
                Block::UnorderedList(vec!["a".to_string()]),
                Block::UnorderedList(vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn fence_interrupts_prose_in_document_order() {
        assert_eq!(
            BlockParser::parse("intro\n```py\ncode()\n```\noutro"),
            vec![
                Block::Paragraph("intro".to_string()),
                Block::CodeBlock {
                    lang: "py".to_string(),
                    body: "code()\n".to_string(),
                },
                Block::Paragraph("outro".to_string()),
            ]
        );
    }

    #[test]
    fn fence_terminates_an_open_list() {
        assert_eq!(
            BlockParser::parse("- a\n```\nx\n```"),
            vec![
                Block::UnorderedList(vec!["a".to_string()]),
                Block::CodeBlock {
                    lang: String::new(),
                    body: "x\n".to_string(),
                },
            ]
        );
    }

    #[test]
    fn marker_needs_trailing_whitespace() {
        // "-dash" and "1.5" are ordinary text, not list items.
        assert_eq!(
            BlockParser::parse("-dash\n1.5 units"),
            vec![
                Block::Paragraph("-dash".to_string()),
                Block::Paragraph("1.5 units".to_string()),
            ]
        );
    }

    #[test]
    fn whitespace_only_input_yields_no_blocks() {
        assert!(BlockParser::parse("   \n\t\n").is_empty());
    }
}
