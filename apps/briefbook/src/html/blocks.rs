//! Block Splitter — turns a rich-HTML description into top-level blocks.
//!
//! Descriptions arrive as arbitrary editor-produced HTML. Pagination operates
//! on whole block-level units (paragraphs, headings, lists, ...), so the first
//! step is to parse the markup permissively, normalize whitespace, and slice
//! the fragment into one string per recognized top-level block. Anything that
//! is not a recognized block is folded into a paragraph so no content is lost.
#![allow(dead_code)]

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

/// Block-level tags recognized at the top level of a description.
const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "section",
    "article",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "ul",
    "ol",
    "li",
    "blockquote",
    "pre",
    "table",
];

/// Classification of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph,
    Heading,
    List,
    ListItem,
    Quote,
    Preformatted,
    Table,
    Container,
}

impl BlockKind {
    /// Maps a recognized block tag to its kind. `None` for inline tags.
    pub fn from_tag(tag: &str) -> Option<BlockKind> {
        match tag {
            "p" => Some(BlockKind::Paragraph),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(BlockKind::Heading),
            "ul" | "ol" => Some(BlockKind::List),
            "li" => Some(BlockKind::ListItem),
            "blockquote" => Some(BlockKind::Quote),
            "pre" => Some(BlockKind::Preformatted),
            "table" => Some(BlockKind::Table),
            "div" | "section" | "article" => Some(BlockKind::Container),
            _ => None,
        }
    }
}

/// Returns true if `tag` is a recognized block-level tag.
pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// One top-level unit of a description, ready for pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// Whitespace-sanitized markup for this block.
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Whitespace sanitization
// ────────────────────────────────────────────────────────────────────────────

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Normalizes whitespace in editor-produced markup: CRLF becomes LF, runs of
/// newlines collapse to one, runs of spaces/tabs collapse to a single space,
/// and the result is trimmed. Applied before block classification.
pub fn sanitize_whitespace(s: &str) -> String {
    let unified = s.replace("\r\n", "\n");
    let collapsed = NEWLINE_RUNS.replace_all(&unified, "\n");
    let collapsed = SPACE_RUNS.replace_all(&collapsed, " ");
    collapsed.trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Block extraction
// ────────────────────────────────────────────────────────────────────────────

/// Splits an HTML fragment into its top-level blocks.
///
/// - a recognized block element becomes one block (outer markup kept);
/// - a bare text node is wrapped in `<p>`;
/// - an unrecognized (inline) element is wrapped in `<p>` keeping its inner
///   markup;
/// - comments and doctype nodes are skipped;
/// - if nothing was classified but the fragment has content, the whole
///   normalized fragment is returned as a single block;
/// - empty input yields an empty sequence (the caller substitutes a
///   placeholder upstream).
pub fn split_blocks(html: &str) -> Vec<Block> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();
    let mut blocks = Vec::new();

    for node in root.children() {
        if let Some(el) = ElementRef::wrap(node) {
            let tag = el.value().name();
            match BlockKind::from_tag(tag) {
                Some(kind) => blocks.push(Block {
                    kind,
                    html: sanitize_whitespace(&el.html()),
                }),
                None => blocks.push(Block {
                    kind: BlockKind::Paragraph,
                    html: format!("<p>{}</p>", sanitize_whitespace(&el.inner_html())),
                }),
            }
        } else if let Some(text) = node.value().as_text() {
            let text = sanitize_whitespace(text);
            if !text.is_empty() {
                blocks.push(Block {
                    kind: BlockKind::Paragraph,
                    html: format!("<p>{}</p>", html_escape::encode_text(&text)),
                });
            }
        }
    }

    if blocks.is_empty() {
        let inner = root.inner_html();
        if !inner.trim().is_empty() {
            blocks.push(Block {
                kind: BlockKind::Container,
                html: sanitize_whitespace(&inner),
            });
        }
    }

    blocks
}

/// Plain-text projection of a fragment (all element text, concatenated in
/// document order). Used to check that pagination preserves content.
pub fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-block splitting
// ────────────────────────────────────────────────────────────────────────────

/// A block decomposed into its direct child nodes, for splitting across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitBlock {
    /// The block's own tag; page slices are re-wrapped in it.
    pub tag: String,
    /// Serialized child nodes in document order. Text children are wrapped in
    /// `<span>` so slices stay well-formed markup.
    pub pieces: Vec<String>,
}

impl SplitBlock {
    /// Re-wraps a run of pieces in the parent tag.
    pub fn wrap(&self, pieces: &[String]) -> String {
        format!("<{}>{}</{}>", self.tag, pieces.concat(), self.tag)
    }
}

/// Decomposes a block into its direct child nodes, or `None` when the block
/// has no element to descend into (the paginator then treats it as atomic).
pub fn split_child_nodes(block_html: &str) -> Option<SplitBlock> {
    let fragment = Html::parse_fragment(block_html);
    let root = fragment.root_element();
    let el = root.children().find_map(ElementRef::wrap)?;

    let tag = el.value().name().to_string();
    let mut pieces = Vec::new();
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            pieces.push(child_el.html());
        } else if let Some(text) = child.value().as_text() {
            pieces.push(format!("<span>{}</span>", html_escape::encode_text(&**text)));
        }
    }

    if pieces.is_empty() {
        None
    } else {
        Some(SplitBlock { tag, pieces })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── sanitize_whitespace ─────────────────────────────────────────────────

    #[test]
    fn test_sanitize_collapses_crlf_and_newline_runs() {
        assert_eq!(sanitize_whitespace("a\r\n\r\nb"), "a\nb");
        assert_eq!(sanitize_whitespace("a\n\n\n\nb"), "a\nb");
    }

    #[test]
    fn test_sanitize_collapses_horizontal_whitespace() {
        assert_eq!(sanitize_whitespace("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_sanitize_trims() {
        assert_eq!(sanitize_whitespace("  <p>x</p>  "), "<p>x</p>");
        assert_eq!(sanitize_whitespace("   \n  "), "");
    }

    // ── split_blocks ────────────────────────────────────────────────────────

    #[test]
    fn test_split_two_paragraphs() {
        let blocks = split_blocks("<p>A</p><p>B</p>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].html, "<p>A</p>");
        assert_eq!(blocks[1].html, "<p>B</p>");
    }

    #[test]
    fn test_split_classifies_block_kinds() {
        let blocks = split_blocks(
            "<h2>Title</h2><ul><li>x</li></ul><blockquote>q</blockquote><pre>code</pre>",
        );
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading,
                BlockKind::List,
                BlockKind::Quote,
                BlockKind::Preformatted
            ]
        );
    }

    #[test]
    fn test_split_wraps_bare_text_in_paragraph() {
        let blocks = split_blocks("just some text");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].html, "<p>just some text</p>");
    }

    #[test]
    fn test_split_wraps_inline_element_keeping_inner_html() {
        let blocks = split_blocks("<span>inline <b>bold</b></span>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html, "<p>inline <b>bold</b></p>");
    }

    #[test]
    fn test_split_empty_input_yields_nothing() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("   \n ").is_empty());
    }

    #[test]
    fn test_split_mixed_text_and_blocks_preserves_order() {
        let blocks = split_blocks("lead-in<p>body</p>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].html, "<p>lead-in</p>");
        assert_eq!(blocks[1].html, "<p>body</p>");
    }

    #[test]
    fn test_split_falls_back_to_whole_content() {
        // Nothing classifiable, but the fragment is not empty.
        let blocks = split_blocks("<!-- draft pending -->");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Container);
        assert!(blocks[0].html.contains("draft pending"));
    }

    #[test]
    fn test_split_escapes_bare_text() {
        let blocks = split_blocks("fish & chips");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html, "<p>fish &amp; chips</p>");
    }

    // ── extract_text ────────────────────────────────────────────────────────

    #[test]
    fn test_extract_text_concatenates_in_order() {
        let text = extract_text("<p>A</p><ul><li>B</li><li>C</li></ul>");
        assert_eq!(text, "ABC");
    }

    #[test]
    fn test_extract_text_empty() {
        assert_eq!(extract_text(""), "");
    }

    // ── split_child_nodes ───────────────────────────────────────────────────

    #[test]
    fn test_split_child_nodes_list_items() {
        let split = split_child_nodes("<ul><li>a</li><li>b</li></ul>").unwrap();
        assert_eq!(split.tag, "ul");
        assert_eq!(split.pieces, vec!["<li>a</li>", "<li>b</li>"]);
    }

    #[test]
    fn test_split_child_nodes_wraps_text_in_span() {
        let split = split_child_nodes("<p>plain <b>bold</b></p>").unwrap();
        assert_eq!(split.tag, "p");
        assert_eq!(split.pieces[0], "<span>plain </span>");
        assert_eq!(split.pieces[1], "<b>bold</b>");
    }

    #[test]
    fn test_split_child_nodes_rewrap() {
        let split = split_child_nodes("<ol><li>a</li><li>b</li><li>c</li></ol>").unwrap();
        let page_slice = split.wrap(&split.pieces[..2]);
        assert_eq!(page_slice, "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_split_child_nodes_none_for_unparseable() {
        assert!(split_child_nodes("").is_none());
        assert!(split_child_nodes("<p></p>").is_none());
    }
}
