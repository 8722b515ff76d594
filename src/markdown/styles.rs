//! Styles for rendered post bodies.

use ratatui::style::{Color, Modifier, Style};

/// `# ` heading - bold, underlined
pub const STYLE_H1: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);

/// `## ` heading
pub const STYLE_H2: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// `### ` heading
pub const STYLE_H3: Style = Style::new().fg(Color::LightCyan).add_modifier(Modifier::BOLD);

/// Blockquote text - dim italic
pub const STYLE_QUOTE: Style = Style::new()
    .fg(Color::Gray)
    .add_modifier(Modifier::ITALIC);

/// Blockquote bar
pub const STYLE_QUOTE_BAR: Style = Style::new().fg(Color::DarkGray);

/// Bullet marker
pub const STYLE_BULLET: Style = Style::new().fg(Color::Yellow);

pub const STYLE_PARAGRAPH: Style = Style::new();
