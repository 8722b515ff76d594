//! Dialog Frame Component
//!
//! A centered overlay with rounded borders. Clears what is behind it and
//! sizes itself to the terminal.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::layout::LayoutContext;
use crate::ui::theme::{COLOR_BORDER, COLOR_DIALOG_BG, COLOR_HEADER};

/// Configuration for rendering a dialog frame
#[derive(Debug, Clone)]
pub struct DialogFrameConfig<'a> {
    /// Title displayed in the border
    pub title: &'a str,
    /// Content height (not including borders)
    pub content_height: u16,
    pub min_width: u16,
    pub max_width: u16,
}

impl<'a> DialogFrameConfig<'a> {
    pub fn new(title: &'a str, content_height: u16) -> Self {
        Self {
            title,
            content_height,
            min_width: 36,
            max_width: 64,
        }
    }

    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = width;
        self
    }

    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }
}

fn dialog_width(ctx: &LayoutContext, config: &DialogFrameConfig, area_width: u16) -> u16 {
    let width = if ctx.is_extra_small() {
        area_width.saturating_sub(4).min(config.max_width)
    } else if ctx.is_narrow() {
        ctx.bounded_width(80, config.min_width, config.max_width)
    } else {
        ctx.bounded_width(50, config.min_width, config.max_width)
    };
    width.min(area_width)
}

/// Render the frame centered in `area` and return its inner content area.
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    ctx: &LayoutContext,
    config: &DialogFrameConfig,
) -> Rect {
    let width = dialog_width(ctx, config, area.width);
    let height = (config.content_height + 2).min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_config_builder() {
        let config = DialogFrameConfig::new("Sign In", 10).min_width(40).max_width(70);
        assert_eq!(config.content_height, 10);
        assert_eq!(config.min_width, 40);
        assert_eq!(config.max_width, 70);
    }

    #[test]
    fn test_width_on_normal_terminal() {
        let ctx = LayoutContext::new(120, 40);
        let config = DialogFrameConfig::new("Test", 10);
        // 50% of 120 = 60, inside 36..=64
        assert_eq!(dialog_width(&ctx, &config, 120), 60);
    }

    #[test]
    fn test_width_on_extra_small_terminal() {
        let ctx = LayoutContext::new(50, 14);
        let config = DialogFrameConfig::new("Test", 10);
        assert_eq!(dialog_width(&ctx, &config, 50), 46);
    }

    #[test]
    fn test_frame_is_centered() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut inner = Rect::default();
        terminal
            .draw(|f| {
                let area = f.area();
                let ctx = LayoutContext::from_rect(area);
                inner = render_dialog_frame(f, area, &ctx, &DialogFrameConfig::new("Help", 6));
            })
            .unwrap();

        assert_eq!(inner.height, 6);
        assert_eq!(inner.width, 48);
        assert_eq!(inner.x, 26);
        assert_eq!(inner.y, 12);
    }
}
