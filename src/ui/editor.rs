//! Post editor and its preview.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components::StatusIndicator;
use super::detail::image_label;
use super::helpers::{truncate_string, type_badge};
use super::layout::{center_horizontally, LayoutContext};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_MUTED};
use crate::app::App;
use crate::markdown::{render_markdown, wrap_words};
use crate::view_state::{EditorField, EditorState};
use crate::widgets::InputBoxWidget;

/// Image rows shown before the list scrolls out of view.
const MAX_IMAGE_ROWS: u16 = 4;

pub fn render_editor(frame: &mut Frame, area: Rect, app: &mut App, ctx: &LayoutContext) {
    let column = center_horizontally(area, ctx.reading_width());
    let [title_bar, body, message] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(column);

    render_title_bar(frame, title_bar, &app.editor);

    let status = if app.editor.saving {
        Some(StatusIndicator::loading("Saving...", app.tick_count))
    } else if app.editor.uploading {
        Some(StatusIndicator::loading("Uploading image...", app.tick_count))
    } else {
        app.editor.error.clone().map(StatusIndicator::Error)
    };
    if let Some(status) = status {
        frame.render_widget(Paragraph::new(status.to_line()), message);
    }

    if app.editor.preview {
        render_preview(frame, body, &mut app.editor);
    } else {
        render_form(frame, body, &app.editor);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let heading = if editor.is_editing() { "Edit Post" } else { "New Post" };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", heading),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        type_badge(editor.post_type),
        Span::styled(
            format!("  {} min read", editor.reading_time()),
            Style::default().fg(COLOR_MUTED),
        ),
    ];
    if editor.preview {
        spans.push(Span::styled("  PREVIEW", Style::default().fg(COLOR_ACCENT)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let image_rows = (editor.images.len() as u16).min(MAX_IMAGE_ROWS).max(1);
    let news_height = if editor.is_news() { 3 } else { 0 };
    let [title, news_link, excerpt, content, images, image_path] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(news_height),
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(image_rows + 1),
        Constraint::Length(3),
    ])
    .areas(area);

    let focused = |field: EditorField| editor.focus == field;
    frame.render_widget(
        InputBoxWidget::new(&editor.title, " Title ", focused(EditorField::Title)),
        title,
    );
    if editor.is_news() {
        frame.render_widget(
            InputBoxWidget::new(&editor.news_link, " News link ", focused(EditorField::NewsLink)),
            news_link,
        );
    }
    frame.render_widget(
        InputBoxWidget::new(&editor.excerpt, " Excerpt (optional) ", focused(EditorField::Excerpt)),
        excerpt,
    );
    let content_title = if editor.is_news() { " Content (optional) " } else { " Content " };
    frame.render_widget(
        InputBoxWidget::new(&editor.content, content_title, focused(EditorField::Content)),
        content,
    );

    render_image_list(frame, images, editor);
    frame.render_widget(
        InputBoxWidget::new(
            &editor.image_path,
            " Add image (file path, Enter) ",
            focused(EditorField::ImagePath),
        ),
        image_path,
    );
}

fn render_image_list(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let width = area.width.saturating_sub(8) as usize;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" Images ({})", editor.images.len()),
            Style::default().fg(COLOR_HEADER),
        ),
        Span::styled("  ^R select  ^X remove", Style::default().fg(COLOR_DIM)),
    ])];

    if editor.images.is_empty() {
        lines.push(Line::from(Span::styled(
            "   none",
            Style::default().fg(COLOR_DIM),
        )));
    }

    // Keep the selected image inside the visible rows.
    let skip = (editor.selected_image + 1).saturating_sub(MAX_IMAGE_ROWS as usize);
    for (i, url) in editor.images.iter().enumerate().skip(skip).take(MAX_IMAGE_ROWS as usize) {
        let selected = i == editor.selected_image;
        let marker = if selected { " ▶ " } else { "   " };
        let style = if selected {
            Style::default().fg(COLOR_ACCENT)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}. {}", marker, i + 1, image_label(url, width)),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_preview(frame: &mut Frame, area: Rect, editor: &mut EditorState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Preview ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();

    let title = match editor.title.trimmed() {
        "" => "Untitled".to_string(),
        title => title.to_string(),
    };
    for row in wrap_words(&title, width) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(type_badge(editor.post_type)));
    if editor.is_news() && !editor.news_link.trimmed().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Source: {}", truncate_string(editor.news_link.trimmed(), width)),
            Style::default().fg(COLOR_DIM),
        )));
    }
    for (i, url) in editor.images.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("[image {}] {}", i + 1, image_label(url, width.saturating_sub(12))),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.push(Line::default());
    lines.extend(render_markdown(editor.content.get_content(), width));

    editor.preview_scroll.set_content_height(lines.len(), inner.height);
    let padded = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(lines).scroll((editor.preview_scroll.offset, 0)),
        padded,
    );
}
