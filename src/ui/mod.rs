//! Terminal rendering.
//!
//! Every screen has the same layout: a header with the blog title, page tabs
//! and the signed-in user; the current page; a one-line status bar with key
//! hints. The sign-in dialog and the help overlay draw on top.
//!
//! Renderers take `&mut App` only to record scroll extents measured while
//! drawing; they never start requests.

mod auth_dialog;
mod components;
mod dashboard;
mod detail;
mod editor;
mod helpers;
mod help;
mod home;
pub mod layout;
mod profile;
pub mod theme;

pub use layout::LayoutContext;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Page};
use components::{render_tab_selector, TabItem};
use helpers::{spinner, truncate_string};
use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_PENDING};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the whole screen for the current page.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let ctx = LayoutContext::from_rect(area);

    let [header, body, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app, &ctx);

    match app.effective_page() {
        Page::Home => home::render_home(frame, body, app, &ctx),
        Page::Post => detail::render_post(frame, body, app, &ctx),
        Page::Dashboard => dashboard::render_dashboard(frame, body, app, &ctx),
        Page::Editor => editor::render_editor(frame, body, app, &ctx),
        Page::Profile => profile::render_profile(frame, body, app, &ctx),
    }

    render_status_bar(frame, status, app, &ctx);

    if let Some(dialog) = &app.auth_dialog {
        auth_dialog::render_auth_dialog(frame, area, dialog, app.tick_count, &ctx);
    }
    if app.show_help {
        help::render_help(frame, area, &ctx);
    }
}

// ============================================================================
// Header
// ============================================================================

fn page_tab_index(page: Page) -> usize {
    match page {
        Page::Home | Page::Post => 0,
        Page::Dashboard | Page::Editor => 1,
        Page::Profile => 2,
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tabs = [
        TabItem::with_short_label("1 Home", "Home"),
        TabItem::with_short_label("2 Dashboard", "Dash"),
        TabItem::with_short_label("3 Profile", "Me"),
    ];

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.config.blog_title),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    spans.extend(
        render_tab_selector(&tabs, page_tab_index(app.effective_page()), true, ctx).spans,
    );
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    let user = match app.user_label() {
        Some(label) => Line::from(vec![
            Span::styled(
                truncate_string(&label, 24),
                Style::default().fg(COLOR_ACCENT),
            ),
            Span::styled("  L: sign out ", Style::default().fg(COLOR_DIM)),
        ]),
        None => Line::from(Span::styled("l: sign in ", Style::default().fg(COLOR_DIM))),
    };
    if !ctx.is_extra_small() {
        frame.render_widget(Paragraph::new(user).alignment(Alignment::Right), inner);
    }
}

// ============================================================================
// Status Bar
// ============================================================================

/// Key hints for what the current page accepts right now.
fn keybind_hints(app: &App, ctx: &LayoutContext) -> Vec<(&'static str, &'static str)> {
    if app.auth_dialog.is_some() {
        return vec![
            ("Enter", "submit"),
            ("Tab", "field"),
            ("^T", "mode"),
            ("Esc", "close"),
        ];
    }

    let mut hints = match app.effective_page() {
        Page::Home if app.feed.searching => vec![("Enter", "done"), ("Esc", "clear")],
        Page::Home => vec![
            ("j/k", "move"),
            ("Enter", "read"),
            ("/", "search"),
            ("f", "filter"),
            ("s", "sort"),
        ],
        Page::Post if app.detail.composing => vec![
            ("Tab", "field"),
            ("^S", "submit"),
            ("Esc", "cancel"),
        ],
        Page::Post => vec![
            ("j/k", "scroll"),
            ("c", "comment"),
            ("y", "copy link"),
            ("o", "open"),
            ("b", "back"),
        ],
        Page::Dashboard if app.dashboard.pending_delete.is_some() => {
            vec![("y", "delete"), ("any", "cancel")]
        }
        Page::Dashboard => vec![
            ("Tab", "tab"),
            ("e", "edit"),
            ("n", "new"),
            ("h", "hide"),
            ("d", "delete"),
        ],
        Page::Editor => vec![
            ("Tab", "field"),
            ("^S", "save"),
            ("^P", "preview"),
            ("^T", "type"),
            ("Esc", "back"),
        ],
        Page::Profile if app.profile_view.editing => vec![
            ("Tab", "field"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        Page::Profile => vec![("j/k", "move"), ("Enter", "read"), ("e", "edit")],
    };

    if ctx.is_extra_small() {
        hints.truncate(3);
    } else {
        hints.push(("?", "help"));
    }
    hints
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice),
            Style::default().fg(COLOR_PENDING),
        )),
        None => {
            let mut spans = vec![Span::raw(" ")];
            for (i, (key, action)) in keybind_hints(app, ctx).into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" | ", Style::default().fg(COLOR_DIM)));
                }
                spans.push(Span::styled(key, Style::default().fg(COLOR_ACCENT)));
                spans.push(Span::styled(format!(" {}", action), Style::default().fg(COLOR_DIM)));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);

    if app.is_busy() {
        let busy = Span::styled(
            format!("{} ", spinner(app.tick_count)),
            Style::default().fg(COLOR_PENDING),
        );
        frame.render_widget(Paragraph::new(Line::from(busy)).alignment(Alignment::Right), area);
    }
}

#[cfg(test)]
pub(crate) mod test_render {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::render;
    use crate::app::App;

    /// Draw `app` into a `width`x`height` test terminal.
    pub fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// All buffer rows joined with newlines.
    pub fn screen_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width.max(1) as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
