//! Small formatting helpers shared by the pages.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{COLOR_ARTICLE, COLOR_NEWS};
use crate::models::PostType;

/// Spinner animation frames
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for `tick`.
pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// Truncate to `max_width` display columns, ending in `…` when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Collapse newlines and runs of whitespace into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Colored `ARTICLE` / `NEWS` badge.
pub fn type_badge(post_type: PostType) -> Span<'static> {
    let (label, color) = match post_type {
        PostType::Article => ("ARTICLE", COLOR_ARTICLE),
        PostType::News => ("NEWS", COLOR_NEWS),
    };
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 6), "hello…");
        assert_eq!(truncate_string("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_string("abc", 0), "");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\n\n b  c "), "a b c");
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(10));
    }
}
