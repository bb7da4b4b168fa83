//! Fenced code block extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// A fence-delimited split of the (already escaped) source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside any fence, still carrying inline markers.
    Prose(String),
    /// A fenced code block: optional language tag and verbatim body.
    Fence { lang: String, body: String },
}

// Three backticks, optional language tag, optional newline, non-greedy body,
// three backticks.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(\w*)\n?(.*?)```").unwrap());

/// Split escaped source text into prose and fence segments, in order.
///
/// Fence bodies are carried verbatim and receive no further substitution.
/// An unterminated fence does not match; its backticks flow through as
/// prose and render as literal characters.
pub fn split_fences(escaped: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for caps in FENCE_RE.captures_iter(escaped) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            segments.push(Segment::Prose(escaped[cursor..whole.start()].to_string()));
        }
        segments.push(Segment::Fence {
            lang: caps[1].to_string(),
            body: caps[2].to_string(),
        });
        cursor = whole.end();
    }
    if cursor < escaped.len() {
        segments.push(Segment::Prose(escaped[cursor..].to_string()));
    }
    segments
}
