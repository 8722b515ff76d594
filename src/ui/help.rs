//! Key help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::components::{render_dialog_frame, DialogFrameConfig};
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_HEADER, COLOR_MUTED};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Anywhere",
        &[
            ("1 2 3", "home, dashboard, profile"),
            ("4", "write a new post"),
            ("l / L", "sign in / sign out"),
            ("Esc", "back"),
            ("q  ^C", "quit"),
        ],
    ),
    (
        "Home",
        &[
            ("j k Enter", "move, read post"),
            ("/", "search"),
            ("f s r", "filter, sort, refresh"),
        ],
    ),
    (
        "Post",
        &[
            ("j k g G", "scroll"),
            ("c", "comment (^S submits)"),
            ("y o", "copy link, open news link"),
        ],
    ),
    (
        "Dashboard",
        &[
            ("Tab", "posts / comments"),
            ("e n", "edit, new post"),
            ("h d", "hide/show, delete"),
            ("a x", "approve, delete comment"),
        ],
    ),
    (
        "Editor",
        &[
            ("^S ^P ^T", "save, preview, type"),
            ("^U ^R ^X", "add, select, remove image"),
        ],
    ),
];

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (title, keys)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, action) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), Style::default().fg(COLOR_ACCENT)),
                Span::styled(action.to_string(), Style::default().fg(COLOR_MUTED)),
            ]));
        }
    }
    lines
}

pub fn render_help(frame: &mut Frame, area: Rect, ctx: &LayoutContext) {
    let lines = help_lines();
    let config = DialogFrameConfig::new("Keys (any key closes)", lines.len() as u16).min_width(44);
    let inner = render_dialog_frame(frame, area, ctx, &config);
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_listed() {
        let text: String = help_lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for (title, _) in SECTIONS {
            assert!(text.contains(title));
        }
    }
}
