//! HTML materialization of rendered blocks.
//!
//! Escaping happens here, when blocks become markup, and never earlier:
//! the AST carries the model's raw text.

use super::{Block, HeadingLevel, Span};

/// Render blocks as semantic HTML with all text content escaped.
pub fn to_html(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                let tag = match level {
                    HeadingLevel::H2 => "h2",
                    HeadingLevel::H3 => "h3",
                };
                out.push('<');
                out.push_str(tag);
                out.push('>');
                write_spans(&mut out, spans);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Block::List { items } => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    write_spans(&mut out, item);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
            Block::Paragraph { spans } => {
                out.push_str("<p>");
                write_spans(&mut out, spans);
                out.push_str("</p>");
            }
        }
    }

    out
}

fn write_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        match span {
            Span::Text(text) => escape_into(out, text),
            Span::Strong(text) => {
                out.push_str("<strong>");
                escape_into(out, text);
                out.push_str("</strong>");
            }
        }
    }
}

/// Escape text for element content
fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
