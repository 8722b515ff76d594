//! Home page: hero and the public feed.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components::StatusIndicator;
use super::helpers::{single_line, truncate_string, type_badge};
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER, COLOR_MUTED, COLOR_SELECTED_BG};
use crate::app::App;
use crate::models::text_utils::format_short_date;
use crate::models::Post;
use crate::widgets::InputBoxWidget;

pub fn render_home(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let show_search = app.feed.searching || !app.feed.search.is_empty();
    let [hero, search, controls, list] = Layout::vertical([
        Constraint::Length(if ctx.is_short() { 1 } else { 3 }),
        Constraint::Length(if show_search { 3 } else { 0 }),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_hero(frame, hero, app, ctx);

    if show_search {
        frame.render_widget(
            InputBoxWidget::new(&app.feed.search, " Search ", app.feed.searching),
            search,
        );
    }

    let controls_line = Line::from(vec![
        Span::styled(" Filter: ", Style::default().fg(COLOR_DIM)),
        Span::styled(app.feed.filter.label(), Style::default().fg(COLOR_ACCENT)),
        Span::styled("   Sort: ", Style::default().fg(COLOR_DIM)),
        Span::styled(app.feed.sort.label(), Style::default().fg(COLOR_ACCENT)),
    ]);
    frame.render_widget(Paragraph::new(controls_line), controls);

    let visible = app.feed.visible_posts(&app.posts);
    if visible.is_empty() {
        render_empty_feed(frame, list, app);
        return;
    }

    let width = list.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .map(|post| ListItem::new(post_card(post, width, ctx)))
        .collect();
    let list_widget = List::new(items)
        .highlight_style(Style::default().bg(COLOR_SELECTED_BG))
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(app.feed.selected));
    frame.render_stateful_widget(list_widget, list, &mut state);
}

fn render_hero(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let title = Span::styled(
        app.config.blog_title.clone(),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    );
    let count = match app.posts.len() {
        1 => "1 post".to_string(),
        n => format!("{} posts", n),
    };

    let lines = if ctx.is_short() {
        vec![Line::from(vec![
            Span::raw(" "),
            title,
            Span::styled(format!("  {}", count), Style::default().fg(COLOR_MUTED)),
        ])]
    } else {
        vec![
            Line::default(),
            Line::from(vec![Span::raw(" "), title]),
            Line::from(Span::styled(format!(" {}", count), Style::default().fg(COLOR_MUTED))),
        ]
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_empty_feed(frame: &mut Frame, area: Rect, app: &App) {
    let lines = if app.posts_loading {
        vec![
            Line::default(),
            StatusIndicator::loading("Loading posts...", app.tick_count).to_line(),
        ]
    } else if !app.feed.query().is_empty() {
        vec![
            Line::default(),
            Line::from(Span::styled("No posts found", Style::default().fg(COLOR_HEADER))),
            Line::from(Span::styled(
                "Try adjusting your search query",
                Style::default().fg(COLOR_DIM),
            )),
        ]
    } else {
        vec![
            Line::default(),
            Line::from(Span::styled("No posts found", Style::default().fg(COLOR_HEADER))),
            Line::from(Span::styled(
                "No posts have been published yet",
                Style::default().fg(COLOR_DIM),
            )),
        ]
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Three lines plus a spacer: title, meta, preview.
fn post_card(post: &Post, width: usize, ctx: &LayoutContext) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        type_badge(post.post_type),
        Span::raw(" "),
        Span::styled(
            truncate_string(&post.title, width.saturating_sub(10)),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    let mut meta = format!(
        "{} · {} · {} min read",
        post.publisher_name(),
        format_short_date(&post.created_at),
        post.reading_time.max(1)
    );
    if post.cover_image().is_some() {
        meta.push_str(" · [image]");
    }
    lines.push(Line::from(Span::styled(
        truncate_string(&meta, width),
        Style::default().fg(COLOR_MUTED),
    )));

    if !ctx.is_short() {
        lines.push(Line::from(Span::styled(
            truncate_string(&single_line(&post.preview_text()), width),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.push(Line::default());
    lines
}
