//! Inline span substitution: code, bold, italic, links.
//!
//! Passes run over a single block's text as sequential substitutions in
//! fixed precedence order — code before bold so markup inside inline code is
//! never reinterpreted as emphasis, bold before italic so `**` is consumed
//! ahead of `*`. Unmatched markers are left as literal characters.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Schemes allowed in rendered anchors. Anything else keeps the label and
/// drops the anchor.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Apply inline substitution to one block's text, producing HTML.
///
/// The text must already be HTML-escaped; the tags emitted here are the only
/// unescaped markup in the result.
pub fn apply(text: &str) -> String {
    let text = CODE.replace_all(text, "<code>$1</code>");
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    LINK.replace_all(&text, |caps: &Captures<'_>| anchor(&caps[1], &caps[2]))
        .into_owned()
}

/// Strip inline markers instead of rendering them; links reduce to their
/// label. Used by the plain-text rendering path.
pub fn strip(text: &str) -> String {
    let text = CODE.replace_all(text, "$1");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    LINK.replace_all(&text, "$1").into_owned()
}

fn anchor(label: &str, href: &str) -> String {
    if href_is_safe(href) {
        // The escape stage leaves double quotes alone; neutralize them here
        // so the href cannot break out of its attribute.
        let href = href.replace('"', "&quot;");
        format!("<a href=\"{href}\" target=\"_blank\">{label}</a>")
    } else {
        label.to_string()
    }
}

/// Allow-list the href scheme.
///
/// The check runs on the href with ASCII whitespace and control characters
/// removed, since browsers ignore those inside URLs. Scheme-less (relative)
/// hrefs are allowed.
fn href_is_safe(href: &str) -> bool {
    let compact: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    let head = compact.split(['/', '?', '#']).next().unwrap_or("");
    match head.split_once(':') {
        None => true,
        Some((scheme, _)) => ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_runs_before_emphasis() {
        assert_eq!(apply("`**x**`"), "<code>**x**</code>");
    }

    #[test]
    fn bold_runs_before_italic() {
        assert_eq!(apply("**x** and *y*"), "<strong>x</strong> and <em>y</em>");
        assert_eq!(apply("***x***"), "<em><strong>x</strong></em>");
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(apply("**open"), "**open");
        assert_eq!(apply("`tick"), "`tick");
        assert_eq!(apply("[label](no-close"), "[label](no-close");
    }

    #[test]
    fn link_labels_keep_earlier_spans() {
        assert_eq!(
            apply("[**Rust**](https://www.rust-lang.org)"),
            "<a href=\"https://www.rust-lang.org\" target=\"_blank\"><strong>Rust</strong></a>"
        );
    }

    #[test]
    fn relative_and_mailto_hrefs_are_allowed() {
        assert_eq!(
            apply("[help](/docs/help)"),
            "<a href=\"/docs/help\" target=\"_blank\">help</a>"
        );
        assert_eq!(
            apply("[mail](mailto:hr@example.com)"),
            "<a href=\"mailto:hr@example.com\" target=\"_blank\">mail</a>"
        );
    }

    #[test]
    fn javascript_href_drops_the_anchor() {
        assert_eq!(apply("[click](javascript:stealCookies)"), "click");
    }

    #[test]
    fn whitespace_smuggled_scheme_is_rejected() {
        assert_eq!(apply("[x](java\tscript:alert)"), "x");
    }

    #[test]
    fn scheme_check_is_case_insensitive() {
        assert_eq!(apply("[x](JavaScript:alert)"), "x");
        assert_eq!(
            apply("[x](HTTPS://example.com)"),
            "<a href=\"HTTPS://example.com\" target=\"_blank\">x</a>"
        );
    }

    #[test]
    fn quotes_in_accepted_hrefs_are_neutralized() {
        assert_eq!(
            apply(r#"[x](https://e.com/"onmouseover="a)"#),
            "<a href=\"https://e.com/&quot;onmouseover=&quot;a\" target=\"_blank\">x</a>"
        );
    }

    #[test]
    fn colon_after_path_separator_is_not_a_scheme() {
        assert_eq!(
            apply("[x](/wiki/a:b)"),
            "<a href=\"/wiki/a:b\" target=\"_blank\">x</a>"
        );
    }

    #[test]
    fn strip_reduces_markup_to_text() {
        assert_eq!(
            strip("**bold** and *italic* and `code` and [label](https://e.com)"),
            "bold and italic and code and label"
        );
    }
}
