//! Profile page.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components::StatusIndicator;
use super::helpers::{truncate_string, type_badge};
use super::layout::{center_horizontally, LayoutContext};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_MUTED, COLOR_SELECTED_BG};
use crate::app::App;
use crate::models::text_utils::format_short_date;
use crate::view_state::{ProfileField, ProfileState};
use crate::widgets::InputBoxWidget;

pub fn render_profile(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.profile_view;
    let column = center_horizontally(area, ctx.reading_width());
    let card_height = if view.editing { 10 } else { 7 };
    let [card, posts] =
        Layout::vertical([Constraint::Length(card_height), Constraint::Min(0)]).areas(column);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(if view.editing { " Edit profile " } else { " Profile " });
    let inner = block.inner(card);
    frame.render_widget(block, card);

    if view.editing {
        render_edit_form(frame, inner, view, app.tick_count);
    } else if view.loading_profile {
        let line = StatusIndicator::loading("Loading profile...", app.tick_count).to_line();
        frame.render_widget(Paragraph::new(line), inner);
    } else {
        frame.render_widget(Paragraph::new(card_lines(view, app.today())), inner);
    }

    render_posts(frame, posts, view, app.tick_count);
}

fn card_lines(view: &ProfileState, today: NaiveDate) -> Vec<Line<'static>> {
    let label = |text: &str| Span::styled(format!(" {:<14}", text), Style::default().fg(COLOR_DIM));

    let birthday = match (view.birthday(), view.age_on(today)) {
        (Some(date), Some(age)) => format!("{} (age {})", date, age),
        (Some(date), None) => date.to_string(),
        (None, _) => "Not set".to_string(),
    };

    vec![
        Line::from(Span::styled(
            format!(" {}", view.name()),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![label("Email"), Span::raw(view.email().to_string())]),
        Line::from(vec![label("Birthday"), Span::raw(birthday)]),
        Line::from(vec![
            label("Member since"),
            Span::raw(view.member_since().unwrap_or_else(|| "Unknown".to_string())),
        ]),
        Line::from(vec![
            Span::styled(" e", Style::default().fg(COLOR_ACCENT)),
            Span::styled(" edit profile", Style::default().fg(COLOR_DIM)),
        ]),
    ]
}

fn render_edit_form(frame: &mut Frame, area: Rect, view: &ProfileState, tick: u64) {
    let [name, birthday, _, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        InputBoxWidget::new(&view.edit_name, " Name ", view.focus == ProfileField::Name),
        name,
    );
    frame.render_widget(
        InputBoxWidget::new(
            &view.edit_birthday,
            " Birthday (YYYY-MM-DD) ",
            view.focus == ProfileField::Birthday,
        ),
        birthday,
    );

    let line = if view.saving {
        StatusIndicator::loading("Saving...", tick)
    } else if let Some(error) = &view.save_error {
        StatusIndicator::Error(error.clone())
    } else {
        StatusIndicator::Info("Enter to save, Esc to cancel".to_string())
    };
    frame.render_widget(Paragraph::new(line.to_line()), status);
}

fn render_posts(frame: &mut Frame, area: Rect, view: &ProfileState, tick: u64) {
    let [heading, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" Your posts ({})", view.posts.len()),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ))),
        heading,
    );

    if view.posts.is_empty() {
        let line = if view.loading_posts {
            StatusIndicator::loading("Loading posts...", tick)
        } else {
            StatusIndicator::Info(" No posts yet".to_string())
        };
        frame.render_widget(Paragraph::new(line.to_line()), list_area);
        return;
    }

    let width = list_area.width.saturating_sub(16) as usize;
    let items: Vec<ListItem> = view
        .posts
        .iter()
        .map(|post| {
            ListItem::new(Line::from(vec![
                type_badge(post.post_type),
                Span::raw(" "),
                Span::raw(truncate_string(&post.title, width.saturating_sub(14))),
                Span::styled(
                    format!("  {}", format_short_date(&post.created_at)),
                    Style::default().fg(COLOR_MUTED),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(COLOR_SELECTED_BG))
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, list_area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app, post, session};
    use crate::app::Page;
    use crate::models::Profile;
    use crate::ui::test_render::{draw, screen_text};

    fn profile_app() -> App {
        let mut app = app();
        let session = session("u1");
        app.profile_view = ProfileState::for_session(&session);
        app.session = Some(session);
        app.page = Page::Profile;
        app
    }

    #[tokio::test]
    async fn test_missing_profile_falls_back_to_identity() {
        let mut app = profile_app();
        app.profile_view.set_profile(None);
        app.profile_view.set_posts(Vec::new());

        let text = screen_text(&draw(&mut app, 100, 30));
        assert!(text.contains("u1@example.com"));
        assert!(text.contains("Not set"));
        assert!(text.contains("No posts yet"));
    }

    #[tokio::test]
    async fn test_birthday_shows_age() {
        let mut app = profile_app();
        app.profile_view.set_profile(Some(Profile {
            id: "u1".to_string(),
            name: Some("Uma".to_string()),
            birthday: Some("1990-06-15".to_string()),
            ..Profile::default()
        }));
        app.profile_view.set_posts(vec![post("p1")]);

        let text = screen_text(&draw(&mut app, 100, 30));
        assert!(text.contains("Uma"));
        assert!(text.contains("1990-06-15 (age "));
        assert!(text.contains("Your posts (1)"));
        assert!(text.contains("Post p1"));
    }

    #[tokio::test]
    async fn test_edit_form_shows_error() {
        let mut app = profile_app();
        app.profile_view.set_profile(None);
        app.profile_view.start_editing();
        app.profile_view.save_failed("Birthday cannot be in the future".to_string());

        let text = screen_text(&draw(&mut app, 100, 30));
        assert!(text.contains("Edit profile"));
        assert!(text.contains("Birthday cannot be in the future"));
    }
}
