//! Sign-in dialog overlay.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::components::{
    render_dialog_frame, render_tab_selector, DialogFrameConfig, StatusIndicator, TabItem,
};
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_DIM};
use crate::view_state::{AuthDialogField, AuthDialogState, AuthMode};
use crate::widgets::{InputBox, InputBoxWidget};

/// Copy of `input` showing bullets instead of characters.
fn masked(input: &InputBox) -> InputBox {
    let mut masked = InputBox::with_content("•".repeat(input.get_content().chars().count()));
    masked.move_cursor_home();
    for _ in 0..input.cursor_position() {
        masked.move_cursor_right();
    }
    masked
}

fn mode_index(mode: AuthMode) -> usize {
    match mode {
        AuthMode::Login => 0,
        AuthMode::Signup => 1,
        AuthMode::MagicLink => 2,
    }
}

pub fn render_auth_dialog(
    frame: &mut Frame,
    area: Rect,
    dialog: &AuthDialogState,
    tick: u64,
    ctx: &LayoutContext,
) {
    let needs_password = dialog.mode.needs_password();
    let content_height = if needs_password { 11 } else { 8 };
    let config = DialogFrameConfig::new(dialog.mode.title(), content_height);
    let inner = render_dialog_frame(frame, area, ctx, &config);

    let [modes, _, email, password, message, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(if needs_password { 3 } else { 0 }),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let items = [
        TabItem::new("Sign In"),
        TabItem::with_short_label("Sign Up", "New"),
        TabItem::with_short_label("Magic Link", "Link"),
    ];
    frame.render_widget(
        Paragraph::new(render_tab_selector(&items, mode_index(dialog.mode), true, ctx)),
        modes,
    );

    frame.render_widget(
        InputBoxWidget::new(&dialog.email, " Email ", dialog.focus == AuthDialogField::Email),
        email,
    );
    if needs_password {
        let hidden = masked(&dialog.password);
        frame.render_widget(
            InputBoxWidget::new(&hidden, " Password ", dialog.focus == AuthDialogField::Password),
            password,
        );
    }

    let status = if dialog.loading {
        Some(StatusIndicator::loading("Please wait...", tick))
    } else {
        StatusIndicator::from_messages(dialog.error.as_deref(), dialog.success.as_deref())
    };
    if let Some(status) = status {
        frame.render_widget(Paragraph::new(status.to_line()), message);
    }

    let submit = match dialog.mode {
        AuthMode::Login => " sign in  ",
        AuthMode::Signup => " create account  ",
        AuthMode::MagicLink => " send link  ",
    };
    let key = |k: &'static str| Span::styled(k, Style::default().fg(COLOR_ACCENT));
    let text = |t: &'static str| Span::styled(t, Style::default().fg(COLOR_DIM));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            key("Enter"),
            text(submit),
            key("^T"),
            text(" mode  "),
            key("Esc"),
            text(" close"),
        ])),
        hints,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app;
    use crate::ui::test_render::{draw, screen_text};

    #[test]
    fn test_masked_keeps_length_and_cursor() {
        let mut input = InputBox::with_content("secret");
        input.move_cursor_left();
        let hidden = masked(&input);
        assert_eq!(hidden.get_content(), "••••••");
        assert_eq!(hidden.cursor_position(), 5);
    }

    #[tokio::test]
    async fn test_password_never_rendered() {
        let mut app = app();
        app.open_auth_dialog();
        if let Some(dialog) = app.auth_dialog.as_mut() {
            dialog.email.insert_str("me@example.com");
            dialog.password.insert_str("hunter22");
        }

        let text = screen_text(&draw(&mut app, 100, 30));
        assert!(text.contains("me@example.com"));
        assert!(!text.contains("hunter22"));
    }

    #[tokio::test]
    async fn test_magic_link_mode_hides_password() {
        let mut app = app();
        app.open_auth_dialog();
        if let Some(dialog) = app.auth_dialog.as_mut() {
            dialog.set_mode(AuthMode::MagicLink);
            dialog.link_sent();
        }

        let text = screen_text(&draw(&mut app, 100, 30));
        assert!(!text.contains("Password"));
        assert!(text.contains("Check your email for the magic link!"));
    }
}
