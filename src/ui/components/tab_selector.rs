//! Tab Selector Component
//!
//! A horizontal tab selector. The selected tab gets a `▶` marker; tabs can
//! carry a count badge (pending comments).

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::ui::layout::LayoutContext;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_PENDING};

/// A single tab item in the selector
#[derive(Debug, Clone)]
pub struct TabItem<'a> {
    /// Full label displayed on normal-sized terminals
    pub label: &'a str,
    /// Short label displayed on compact terminals
    pub short_label: &'a str,
    /// Count shown after the label when non-zero
    pub badge: usize,
}

impl<'a> TabItem<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            short_label: label,
            badge: 0,
        }
    }

    pub fn with_short_label(label: &'a str, short_label: &'a str) -> Self {
        Self {
            label,
            short_label,
            badge: 0,
        }
    }

    pub fn badge(mut self, count: usize) -> Self {
        self.badge = count;
        self
    }
}

/// Render a horizontal tab selector as one line.
pub fn render_tab_selector(
    items: &[TabItem<'_>],
    selected: usize,
    focused: bool,
    ctx: &LayoutContext,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let label = if ctx.is_compact() {
            item.short_label
        } else {
            item.label
        };

        if idx == selected {
            let marker_style = if focused {
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            spans.push(Span::styled("▶ ", marker_style));
            spans.push(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            let style = Style::default().fg(COLOR_DIM);
            spans.push(Span::styled("  ", style));
            spans.push(Span::styled(label.to_string(), style));
        }

        if item.badge > 0 {
            spans.push(Span::styled(
                format!(" ({})", item.badge),
                Style::default().fg(COLOR_PENDING),
            ));
        }

        if idx + 1 < items.len() {
            let spacing = if ctx.is_extra_small() { " " } else { "   " };
            spans.push(Span::raw(spacing));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn items() -> Vec<TabItem<'static>> {
        vec![
            TabItem::new("Posts"),
            TabItem::with_short_label("Comments", "Cmts").badge(3),
        ]
    }

    #[test]
    fn test_marker_precedes_selected_label() {
        let ctx = LayoutContext::new(100, 40);
        let line = text(&render_tab_selector(&items(), 1, true, &ctx));
        let marker = line.find('▶').unwrap();
        assert!(marker > line.find("Posts").unwrap());
        assert!(marker < line.find("Comments").unwrap());
    }

    #[test]
    fn test_badge_shown() {
        let ctx = LayoutContext::new(100, 40);
        let line = text(&render_tab_selector(&items(), 0, true, &ctx));
        assert!(line.contains("Comments (3)"));
    }

    #[test]
    fn test_compact_uses_short_labels() {
        let ctx = LayoutContext::new(50, 14);
        let line = text(&render_tab_selector(&items(), 0, false, &ctx));
        assert!(line.contains("Cmts"));
        assert!(!line.contains("Comments"));
    }
}
