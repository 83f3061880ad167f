//! Renderer for the model's markdown-flavored prose.
//!
//! The model writes a small dialect: `## ` and `### ` headings, `* ` list
//! items, `**bold**` spans, and plain paragraph lines. A line-oriented
//! state machine turns that prose into a block AST. The AST carries raw
//! text only; display layers escape when they materialize (see [`html`]).
//!
//! Two dialects share the engine:
//! - lesson (educational content): `## `, `### `, `* `; no inline markup
//! - report (quality reports): `## `, `* `, plus `**bold**` spans

pub mod html;

/// Inline content: plain text or a bold span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong(String),
}

/// Heading depth. The dialect only has two levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
}

/// One block of rendered output, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A `## ` or `### ` heading
    Heading {
        level: HeadingLevel,
        spans: Vec<Span>,
    },

    /// One run of consecutive `* ` items
    List { items: Vec<Vec<Span>> },

    /// Any other non-blank line, untrimmed
    Paragraph { spans: Vec<Span> },
}

/// Renderer configuration; fixed per prose source.
#[derive(Debug, Clone, Copy)]
struct Dialect {
    /// Recognize `### ` subheadings
    subheadings: bool,

    /// Split `**bold**` pairs into strong spans
    strong: bool,
}

/// Render educational prose: `## `, `### `, `* `, paragraphs.
pub fn render_lesson(text: &str) -> Vec<Block> {
    render(
        text,
        Dialect {
            subheadings: true,
            strong: false,
        },
    )
}

/// Render quality report prose: `## `, `* `, paragraphs, with `**bold**`
/// spans.
pub fn render_report(text: &str) -> Vec<Block> {
    render(
        text,
        Dialect {
            subheadings: false,
            strong: true,
        },
    )
}

fn render(text: &str, dialect: Dialect) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut list: Option<Vec<Vec<Span>>> = None;

    for line in text.split('\n') {
        if let Some(rest) = line.strip_prefix("## ") {
            close_list(&mut blocks, &mut list);
            blocks.push(Block::Heading {
                level: HeadingLevel::H2,
                spans: spans(rest, dialect),
            });
        } else if dialect.subheadings && line.starts_with("### ") {
            close_list(&mut blocks, &mut list);
            blocks.push(Block::Heading {
                level: HeadingLevel::H3,
                spans: spans(&line[4..], dialect),
            });
        } else if let Some(rest) = line.strip_prefix("* ") {
            list.get_or_insert_with(Vec::new).push(spans(rest, dialect));
        } else {
            // Any other line ends a list run; blank lines emit nothing
            close_list(&mut blocks, &mut list);
            if !line.trim().is_empty() {
                blocks.push(Block::Paragraph {
                    spans: spans(line, dialect),
                });
            }
        }
    }

    close_list(&mut blocks, &mut list);
    blocks
}

fn close_list(blocks: &mut Vec<Block>, list: &mut Option<Vec<Vec<Span>>>) {
    if let Some(items) = list.take() {
        blocks.push(Block::List { items });
    }
}

/// Split a line into spans. Lesson prose carries no inline markup, so the
/// whole line is one text span.
fn spans(line: &str, dialect: Dialect) -> Vec<Span> {
    if line.is_empty() {
        return Vec::new();
    }
    if !dialect.strong {
        return vec![Span::Text(line.to_string())];
    }
    split_strong(line)
}

/// Split `**bold**` pairs into strong spans.
///
/// Pairing is non-greedy within the line; an unpaired marker stays
/// literal text.
fn split_strong(line: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let close = match rest[open + 2..].find("**") {
            Some(close) => close,
            None => break,
        };

        if open > 0 {
            out.push(Span::Text(rest[..open].to_string()));
        }
        out.push(Span::Strong(rest[open + 2..open + 2 + close].to_string()));
        rest = &rest[open + 2 + close + 2..];
    }

    if !rest.is_empty() {
        out.push(Span::Text(rest.to_string()));
    }

    out
}
