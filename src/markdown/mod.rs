//! Block-level rendering of post bodies.
//!
//! Post content is read line by line. Each line becomes one block:
//!
//! | prefix | block |
//! |--------|-------|
//! | `# `   | level 1 heading |
//! | `## `  | level 2 heading |
//! | `### ` | level 3 heading |
//! | `> `   | blockquote |
//! | `- ` `* ` | bullet |
//! | blank  | spacer |
//! | other  | paragraph |
//!
//! There is no inline formatting: `**bold**` stays literal.

pub mod styles;

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use styles::{
    STYLE_BULLET, STYLE_H1, STYLE_H2, STYLE_H3, STYLE_PARAGRAPH, STYLE_QUOTE, STYLE_QUOTE_BAR,
};

/// One rendered block of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Quote(String),
    Bullet(String),
    Blank,
    Paragraph(String),
}

impl Block {
    /// Classify a single source line.
    pub fn from_line(line: &str) -> Self {
        if line.trim().is_empty() {
            Block::Blank
        } else if let Some(text) = line.strip_prefix("### ") {
            Block::Heading {
                level: 3,
                text: text.to_string(),
            }
        } else if let Some(text) = line.strip_prefix("## ") {
            Block::Heading {
                level: 2,
                text: text.to_string(),
            }
        } else if let Some(text) = line.strip_prefix("# ") {
            Block::Heading {
                level: 1,
                text: text.to_string(),
            }
        } else if let Some(text) = line.strip_prefix("> ") {
            Block::Quote(text.to_string())
        } else if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            Block::Bullet(text.to_string())
        } else {
            Block::Paragraph(line.to_string())
        }
    }
}

/// Split `content` into blocks, one per line.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    content.lines().map(Block::from_line).collect()
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut chunk = String::new();
            let mut chunk_width = 0;
            for ch in word.chars() {
                let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
                if chunk_width + w > width && !chunk.is_empty() {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(ch);
                chunk_width += w;
            }
            current = chunk;
            current_width = chunk_width;
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `text` to `width` with `first` before the first line and `rest`
/// before the others.
fn prefixed(
    text: &str,
    style: Style,
    first: (&'static str, Style),
    rest: (&'static str, Style),
    width: usize,
) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(first.0.width()).max(1);
    wrap_words(text, content_width)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let (prefix, prefix_style) = if i == 0 { first } else { rest };
            let mut spans = Vec::with_capacity(2);
            if !prefix.is_empty() {
                spans.push(Span::styled(prefix, prefix_style));
            }
            spans.push(Span::styled(chunk, style));
            Line::from(spans)
        })
        .collect()
}

/// Render blocks to terminal lines wrapped at `width` columns.
pub fn render_blocks(blocks: &[Block], width: usize) -> Vec<Line<'static>> {
    let plain = ("", Style::new());
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let style = match level {
                    1 => STYLE_H1,
                    2 => STYLE_H2,
                    _ => STYLE_H3,
                };
                lines.extend(prefixed(text, style, plain, plain, width));
            }
            Block::Quote(text) => {
                let bar = ("│ ", STYLE_QUOTE_BAR);
                lines.extend(prefixed(text, STYLE_QUOTE, bar, bar, width));
            }
            Block::Bullet(text) => {
                lines.extend(prefixed(
                    text,
                    STYLE_PARAGRAPH,
                    ("• ", STYLE_BULLET),
                    ("  ", STYLE_BULLET),
                    width,
                ));
            }
            Block::Blank => lines.push(Line::default()),
            Block::Paragraph(text) => {
                lines.extend(prefixed(text, STYLE_PARAGRAPH, plain, plain, width));
            }
        }
    }

    lines
}

/// Parse and render `content` in one step.
pub fn render_markdown(content: &str, width: usize) -> Vec<Line<'static>> {
    render_blocks(&parse_blocks(content), width)
}
