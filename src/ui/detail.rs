//! Post page: the article, its approved comments and the comment form.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components::StatusIndicator;
use super::helpers::{truncate_string, type_badge};
use super::layout::{center_horizontally, LayoutContext};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_MUTED, COLOR_NEWS};
use crate::app::App;
use crate::markdown::{render_markdown, wrap_words};
use crate::models::text_utils::format_date_time;
use crate::models::{Comment, Post};
use crate::view_state::{CommentField, DetailState};
use crate::widgets::InputBoxWidget;

/// Rows used by the comment form while composing.
const FORM_HEIGHT: u16 = 13;

pub fn render_post(frame: &mut Frame, area: Rect, app: &mut App, ctx: &LayoutContext) {
    let Some(post) = app.selected_post().cloned() else {
        return;
    };
    let column = center_horizontally(area, ctx.reading_width());

    let (article_area, form_area) = if app.detail.composing {
        let [article, form] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(FORM_HEIGHT)]).areas(column);
        (article, Some(form))
    } else {
        (column, None)
    };

    let width = article_area.width.saturating_sub(2) as usize;
    let mut lines = article_lines(&post, width, app.detail.notice.as_deref());
    lines.extend(comment_lines(&app.detail, width, app.tick_count));

    let content_height = lines.len();
    let scroll = &mut app.detail.scroll;
    scroll.set_content_height(content_height, article_area.height);
    let paragraph = Paragraph::new(lines).scroll((scroll.offset, 0));
    frame.render_widget(paragraph, inner_padded(article_area));

    if let Some(form_area) = form_area {
        render_comment_form(frame, form_area, &app.detail);
    }
}

fn inner_padded(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    }
}

/// Title, meta, link, images and body.
fn article_lines(post: &Post, width: usize, notice: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    let title_style = Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD);
    for row in wrap_words(&post.title, width) {
        lines.push(Line::from(Span::styled(row, title_style)));
    }

    let meta = format!(
        " By {} · {} · {} min read",
        post.publisher_name(),
        format_date_time(&post.created_at),
        post.reading_time.max(1)
    );
    lines.push(Line::from(vec![
        type_badge(post.post_type),
        Span::styled(
            truncate_string(&meta, width.saturating_sub(10)),
            Style::default().fg(COLOR_MUTED),
        ),
    ]));

    if let Some(link) = post.link() {
        lines.push(Line::from(vec![
            Span::styled("Source: ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                truncate_string(link, width.saturating_sub(8)),
                Style::default()
                    .fg(COLOR_NEWS)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    if let Some(notice) = notice {
        lines.push(StatusIndicator::Success(notice.to_string()).to_line());
    }

    if !post.images.is_empty() {
        lines.push(Line::default());
        for (i, image) in post.images.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("[image {}] {}", i + 1, image_label(image, width.saturating_sub(12))),
                Style::default().fg(COLOR_DIM),
            )));
        }
    }

    lines.push(Line::default());
    lines.extend(render_markdown(&post.content, width));
    lines
}

/// URL of an image, or a placeholder for embedded data.
pub(super) fn image_label(url: &str, width: usize) -> String {
    if url.starts_with("data:") {
        "(embedded image)".to_string()
    } else {
        truncate_string(url, width)
    }
}

fn comment_lines(detail: &DetailState, width: usize, tick: u64) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(COLOR_BORDER),
        )),
    ];

    let approved = detail.approved_comments();
    lines.push(Line::from(Span::styled(
        format!("Comments ({})", approved.len()),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    if detail.loading_comments {
        lines.push(StatusIndicator::loading("Loading comments...", tick).to_line());
    } else if approved.is_empty() {
        lines.push(Line::from(Span::styled(
            "No comments yet. Be the first to share your thoughts!",
            Style::default().fg(COLOR_DIM),
        )));
    } else {
        for comment in approved {
            lines.extend(comment_block(comment, width));
        }
    }

    lines.push(Line::default());
    if let Some(status) =
        StatusIndicator::from_messages(detail.form.error.as_deref(), detail.form.success.as_deref())
    {
        lines.push(status.to_line());
    }
    if !detail.composing {
        lines.push(Line::from(vec![
            Span::styled("c", Style::default().fg(COLOR_ACCENT)),
            Span::styled(" leave a comment", Style::default().fg(COLOR_DIM)),
        ]));
    }
    lines
}

fn comment_block(comment: &Comment, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            comment.author_name.clone(),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", format_date_time(&comment.created_at)),
            Style::default().fg(COLOR_DIM),
        ),
    ])];
    for text_line in comment.content.lines() {
        for row in wrap_words(text_line, width.saturating_sub(2)) {
            lines.push(Line::from(format!("  {}", row)));
        }
    }
    lines.push(Line::default());
    lines
}

fn render_comment_form(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let block = Block::default()
        .title(" Leave a comment ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let wide = inner.width >= 60;
    let [fields, content, status] = Layout::vertical([
        Constraint::Length(if wide { 3 } else { 6 }),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(inner);
    let [name, email] = if wide {
        Layout::horizontal([Constraint::Percentage(50); 2]).areas(fields)
    } else {
        Layout::vertical([Constraint::Length(3); 2]).areas(fields)
    };

    let form = &detail.form;
    frame.render_widget(
        InputBoxWidget::new(&form.name, " Name ", form.focus == CommentField::Name),
        name,
    );
    frame.render_widget(
        InputBoxWidget::new(&form.email, " Email ", form.focus == CommentField::Email),
        email,
    );
    frame.render_widget(
        InputBoxWidget::new(&form.content, " Comment ", form.focus == CommentField::Content),
        content,
    );

    let status_line = if form.submitting {
        StatusIndicator::Info("Submitting...".to_string()).to_line()
    } else {
        StatusIndicator::Info("Comments appear after approval".to_string()).to_line()
    };
    frame.render_widget(Paragraph::new(status_line), status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app, post};
    use crate::ui::test_render::{draw, screen_text};

    fn comment(name: &str, approved: bool) -> Comment {
        Comment {
            id: name.to_string(),
            post_id: "p1".to_string(),
            author_name: name.to_string(),
            content: format!("said by {}", name),
            is_approved: approved,
            ..Comment::default()
        }
    }

    #[tokio::test]
    async fn test_only_approved_comments_render() {
        let mut app = app();
        app.posts = vec![post("p1")];
        app.read_post("p1");
        app.detail.set_comments(vec![comment("alice", true), comment("mallory", false)]);

        let text = screen_text(&draw(&mut app, 100, 40));
        assert!(text.contains("Post p1"));
        assert!(text.contains("Comments (1)"));
        assert!(text.contains("said by alice"));
        assert!(!text.contains("mallory"));
    }

    #[tokio::test]
    async fn test_no_comments_message() {
        let mut app = app();
        app.posts = vec![post("p1")];
        app.read_post("p1");
        app.detail.set_comments(Vec::new());

        let text = screen_text(&draw(&mut app, 100, 40));
        assert!(text.contains("No comments yet"));
    }

    #[tokio::test]
    async fn test_long_post_records_scroll_extent() {
        let mut app = app();
        let mut long = post("p1");
        long.content = (0..100).map(|i| format!("line {}\n", i)).collect();
        app.posts = vec![long];
        app.read_post("p1");

        draw(&mut app, 100, 30);
        assert!(app.detail.scroll.max_scroll > 0);
    }

    #[test]
    fn test_embedded_images_are_not_printed() {
        assert_eq!(image_label("data:image/png;base64,AAAA", 40), "(embedded image)");
        assert_eq!(image_label("https://cdn/x.png", 40), "https://cdn/x.png");
    }
}
