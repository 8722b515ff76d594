//! Dashboard: the author's posts and comment moderation.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components::{render_tab_selector, StatusIndicator, TabItem};
use super::helpers::{single_line, spinner, truncate_string, type_badge};
use super::layout::LayoutContext;
use super::theme::{
    COLOR_ACCENT, COLOR_ACTIVE, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_MUTED, COLOR_PENDING,
    COLOR_SELECTED_BG,
};
use crate::app::App;
use crate::models::text_utils::format_short_date;
use crate::models::{Comment, Post};
use crate::view_state::{DashboardState, DashboardTab, ModerationState};
use crate::widgets::{InputBox, InputBoxWidget};

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let dashboard = &app.dashboard;
    let [tabs, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    let pending = dashboard.moderation.stats().pending;
    let items = [
        TabItem::new("Posts"),
        TabItem::with_short_label("Comments", "Cmts").badge(pending),
    ];
    let selected = match dashboard.tab {
        DashboardTab::Posts => 0,
        DashboardTab::Comments => 1,
    };
    let mut tab_line = render_tab_selector(&items, selected, true, ctx);
    tab_line.spans.insert(0, Span::raw(" "));
    frame.render_widget(Paragraph::new(tab_line), tabs);

    match dashboard.tab {
        DashboardTab::Posts => render_posts_tab(frame, body, dashboard, app.tick_count),
        DashboardTab::Comments => {
            render_comments_tab(frame, body, &dashboard.moderation, app.tick_count, ctx)
        }
    }
}

/// Stats line, optional search box, message line, list area.
fn split_tab(area: Rect, search: &InputBox, searching: bool) -> [Rect; 4] {
    let show_search = searching || !search.is_empty();
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(if show_search { 3 } else { 0 }),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area)
}

fn stat(label: &str, value: usize, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!(" {} ", label), Style::default().fg(COLOR_DIM)),
        Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ]
}

// ============================================================================
// Posts tab
// ============================================================================

fn render_posts_tab(frame: &mut Frame, area: Rect, dashboard: &DashboardState, tick: u64) {
    let [stats_area, search_area, message_area, list_area] =
        split_tab(area, &dashboard.search, dashboard.searching);

    let stats = dashboard.stats();
    let mut spans = stat("Total", stats.total, COLOR_HEADER);
    spans.extend(stat("Articles", stats.articles, COLOR_ACCENT));
    spans.extend(stat("News", stats.news, COLOR_ACCENT));
    spans.extend(stat("Hidden", stats.hidden, COLOR_PENDING));
    frame.render_widget(Paragraph::new(Line::from(spans)), stats_area);

    if search_area.height > 0 {
        frame.render_widget(
            InputBoxWidget::new(&dashboard.search, " Search posts ", dashboard.searching),
            search_area,
        );
    }

    let message = if let Some(id) = &dashboard.pending_delete {
        let title = dashboard
            .posts
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.title.as_str())
            .unwrap_or("this post");
        Some(StatusIndicator::Error(format!(
            "Delete \"{}\"? Press y to confirm, any other key to cancel",
            truncate_string(title, 40)
        )))
    } else {
        dashboard.error().map(|e| StatusIndicator::Error(e.to_string()))
    };
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(message.to_line()), message_area);
    }

    let visible = dashboard.visible_posts();
    if visible.is_empty() {
        let line = if dashboard.loading {
            StatusIndicator::loading("Loading your posts...", tick)
        } else if dashboard.posts.is_empty() {
            StatusIndicator::Info("No posts yet. Press n to write your first post.".to_string())
        } else {
            StatusIndicator::Info("No posts match your search.".to_string())
        };
        frame.render_widget(Paragraph::new(vec![Line::default(), line.to_line()]), list_area);
        return;
    }

    let width = list_area.width.saturating_sub(3) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .map(|post| ListItem::new(post_row(post, dashboard, width, tick)))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(COLOR_SELECTED_BG))
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(dashboard.selected));
    frame.render_stateful_widget(list, list_area, &mut state);
}

fn post_row(post: &Post, dashboard: &DashboardState, width: usize, tick: u64) -> Line<'static> {
    let status = if dashboard.busy_id.as_deref() == Some(post.id.as_str()) {
        Span::styled(format!("{} ", spinner(tick)), Style::default().fg(COLOR_PENDING))
    } else if post.is_hidden {
        Span::styled("○ ", Style::default().fg(COLOR_PENDING))
    } else {
        Span::styled("● ", Style::default().fg(COLOR_ACTIVE))
    };
    let date = format_short_date(&post.created_at);
    let title_width = width.saturating_sub(date.len() + 14);
    let title_style = if dashboard.pending_delete.as_deref() == Some(post.id.as_str()) {
        Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)
    } else if post.is_hidden {
        Style::default().fg(COLOR_MUTED)
    } else {
        Style::default().fg(COLOR_HEADER)
    };

    Line::from(vec![
        status,
        type_badge(post.post_type),
        Span::raw(" "),
        Span::styled(truncate_string(&post.title, title_width), title_style),
        Span::styled(format!("  {}", date), Style::default().fg(COLOR_DIM)),
    ])
}

// ============================================================================
// Comments tab
// ============================================================================

fn render_comments_tab(
    frame: &mut Frame,
    area: Rect,
    moderation: &ModerationState,
    tick: u64,
    ctx: &LayoutContext,
) {
    let [stats_area, search_area, message_area, list_area] =
        split_tab(area, &moderation.search, moderation.searching);

    let stats = moderation.stats();
    let mut spans = stat("Total", stats.total, COLOR_HEADER);
    spans.extend(stat("Pending", stats.pending, COLOR_PENDING));
    spans.extend(stat("Approved", stats.approved, COLOR_ACTIVE));
    spans.push(Span::styled(" Filter: ", Style::default().fg(COLOR_DIM)));
    spans.push(Span::styled(moderation.filter.label(), Style::default().fg(COLOR_ACCENT)));
    frame.render_widget(Paragraph::new(Line::from(spans)), stats_area);

    if search_area.height > 0 {
        frame.render_widget(
            InputBoxWidget::new(&moderation.search, " Search comments ", moderation.searching),
            search_area,
        );
    }

    if let Some(error) = moderation.error() {
        frame.render_widget(
            Paragraph::new(StatusIndicator::Error(error.to_string()).to_line()),
            message_area,
        );
    }

    let visible = moderation.visible_comments();
    if visible.is_empty() {
        let line = if moderation.loading || !moderation.loaded {
            StatusIndicator::loading("Loading comments...", tick)
        } else {
            StatusIndicator::Info("No comments found".to_string())
        };
        frame.render_widget(Paragraph::new(vec![Line::default(), line.to_line()]), list_area);
        return;
    }

    let width = list_area.width.saturating_sub(3) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .map(|comment| ListItem::new(comment_card(comment, moderation, width, tick, ctx)))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(COLOR_SELECTED_BG))
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(moderation.selected));
    frame.render_stateful_widget(list, list_area, &mut state);
}

fn comment_card(
    comment: &Comment,
    moderation: &ModerationState,
    width: usize,
    tick: u64,
    ctx: &LayoutContext,
) -> Vec<Line<'static>> {
    let status = if moderation.busy_id.as_deref() == Some(comment.id.as_str()) {
        Span::styled(format!("{} ", spinner(tick)), Style::default().fg(COLOR_PENDING))
    } else if comment.is_approved {
        Span::styled("Approved ", Style::default().fg(COLOR_ACTIVE))
    } else {
        Span::styled("Pending  ", Style::default().fg(COLOR_PENDING))
    };

    let mut header = format!(
        "{} <{}> · {}",
        comment.author_name,
        comment.author_email,
        format_short_date(&comment.created_at)
    );
    if let Some(title) = comment.post_title() {
        header.push_str(&format!(" · on \"{}\"", title));
    }

    let mut lines = vec![Line::from(vec![
        status,
        Span::styled(
            truncate_string(&header, width.saturating_sub(9)),
            Style::default().fg(COLOR_MUTED),
        ),
    ])];
    lines.push(Line::from(Span::styled(
        format!("  {}", truncate_string(&single_line(&comment.content), width.saturating_sub(2))),
        Style::default().fg(COLOR_HEADER),
    )));
    if !ctx.is_short() {
        lines.push(Line::default());
    }
    lines
}
