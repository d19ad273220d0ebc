// src/render/markdown.rs
// =============================================================================
// This module turns the portal's restricted Markdown into HTML.
//
// Supported syntax, and nothing else:
// - "# ", "## ", "### " at the start of a line (headings h1-h3)
// - **bold**, *italic*
// - [text](url)
// - blank line = new paragraph, single newline = <br>
//
// Rules run in a fixed order and the order matters:
// - bold runs before italic, otherwise the italic rule would eat the
//   asterisks of a **bold** span
// - headings are recognized before paragraphs are assembled, so a heading
//   line is its own block and never sits inside a <p>
//
// The input is HTML-escaped before any rule runs, so raw tags in a content
// file show up as text.
// =============================================================================

use regex_lite::{Captures, Regex};
use std::sync::OnceLock;

use super::html::{escape_html, safe_href};

// Compiles a constant pattern once and keeps it for the rest of the program
// The patterns below are literals, so a failure here is a programmer error
fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("markdown pattern is valid"))
}

fn heading_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(#{1,3}) (.*)$")
}

fn bold_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\*\*(.*?)\*\*")
}

fn italic_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\*(.*?)\*")
}

fn link_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\[([^\]]+)\]\(([^)]+)\)")
}

fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\n{2,}")
}

// Renders restricted Markdown to an HTML string
//
// Example:
//   "# Title\n\nSome **bold** text\nnext line"
// becomes
//   "<h1>Title</h1>\n<p>Some <strong>bold</strong> text<br>next line</p>"
pub fn render_markdown(markdown: &str) -> String {
    let text = escape_html(&markdown.replace("\r\n", "\n"));
    let mut blocks: Vec<String> = Vec::new();

    for block in paragraph_break().split(&text) {
        let block = block.trim_matches('\n');
        if block.is_empty() {
            continue;
        }

        // Lines of the paragraph currently being built
        let mut lines: Vec<String> = Vec::new();

        for line in block.split('\n') {
            if let Some(caps) = heading_rule().captures(line) {
                flush_paragraph(&mut lines, &mut blocks);
                let level = caps[1].len();
                blocks.push(format!("<h{level}>{}</h{level}>", render_inline(&caps[2])));
            } else {
                lines.push(render_inline(line));
            }
        }

        flush_paragraph(&mut lines, &mut blocks);
    }

    blocks.join("\n")
}

// Closes the pending paragraph, if it has any content
fn flush_paragraph(lines: &mut Vec<String>, blocks: &mut Vec<String>) {
    if lines.iter().all(|line| line.trim().is_empty()) {
        lines.clear();
        return;
    }
    blocks.push(format!("<p>{}</p>", lines.join("<br>")));
    lines.clear();
}

// Applies bold, italic and link rules, in that order, to one line
fn render_inline(line: &str) -> String {
    let html = bold_rule().replace_all(line, "<strong>$1</strong>");
    let html = italic_rule().replace_all(&html, "<em>$1</em>");
    let html = link_rule().replace_all(&html, |caps: &Captures| {
        format!("<a href=\"{}\">{}</a>", safe_href(&caps[2]), &caps[1])
    });
    html.into_owned()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why OnceLock?
//    - Compiling a regex is expensive compared to running it
//    - OnceLock compiles each pattern the first time it's used and hands out
//      a &'static reference afterwards
//
// 2. Why regex-lite and not a full CommonMark parser?
//    - The content files only use this small subset, and the rendering of a
//      single newline as <br> differs from CommonMark
// -----------------------------------------------------------------------------
