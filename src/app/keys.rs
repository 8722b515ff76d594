//! Keyboard handling for the App.
//!
//! Keys go to the innermost active thing: the help overlay, then the sign-in
//! dialog, then whichever text field or form the page has focused, then the
//! page's own bindings, then the global ones.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, Page};
use crate::view_state::{CommentField, DashboardTab, EditorField};
use crate::widgets::InputBox;

/// Lines moved by PageUp / PageDown.
const PAGE_LINES: u16 = 10;

fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Apply an editing key to `input`. Returns false if the key is not an
/// editing key, so the caller can handle it.
///
/// Enter inserts a newline only when `multiline` is set.
pub fn edit_input(input: &mut InputBox, key: &KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            input.insert_char(c);
        }
        KeyCode::Enter if multiline => input.insert_newline(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete_char(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_cursor_home(),
        KeyCode::End => input.move_cursor_end(),
        KeyCode::Up if multiline => input.move_cursor_up(),
        KeyCode::Down if multiline => input.move_cursor_down(),
        _ => return false,
    }
    true
}

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.mark_dirty();
        self.notice = None;

        if ctrl(&key, 'c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.auth_dialog.is_some() {
            self.handle_auth_dialog_key(&key);
            return;
        }

        let consumed = match self.page {
            Page::Home => self.handle_home_key(&key),
            Page::Post if self.selected_post().is_some() => self.handle_post_key(&key),
            Page::Post => self.handle_home_key(&key),
            Page::Dashboard => self.handle_dashboard_key(&key),
            Page::Editor => self.handle_editor_key(&key),
            Page::Profile => self.handle_profile_key(&key),
        };
        if !consumed {
            self.handle_global_key(&key);
        }
    }

    /// Insert pasted text into whichever field has focus.
    ///
    /// Single-line fields get the text with line breaks folded to spaces.
    pub fn handle_paste(&mut self, text: &str) {
        self.mark_dirty();
        let flat = text.replace(['\r', '\n'], " ");

        if let Some(dialog) = self.auth_dialog.as_mut() {
            if !dialog.loading {
                dialog.focused_input().insert_str(&flat);
            }
            return;
        }

        match self.page {
            Page::Home if self.feed.searching => self.feed.search.insert_str(&flat),
            Page::Post if self.detail.composing && !self.detail.form.submitting => {
                let form = &mut self.detail.form;
                if form.focus == CommentField::Content {
                    form.content.insert_str(text);
                } else {
                    form.focused_input().insert_str(&flat);
                }
            }
            Page::Dashboard if self.dashboard.searching => self.dashboard.search.insert_str(&flat),
            Page::Dashboard if self.dashboard.moderation.searching => {
                self.dashboard.moderation.search.insert_str(&flat)
            }
            Page::Editor if !self.editor.preview && !self.editor.saving => {
                let editor = &mut self.editor;
                if editor.focus == EditorField::Content {
                    editor.content.insert_str(text);
                } else {
                    editor.focused_input().insert_str(flat.trim());
                }
            }
            Page::Profile if self.profile_view.editing => {
                self.profile_view.focused_input().insert_str(&flat)
            }
            _ => {}
        }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('1') => self.navigate(Page::Home),
            KeyCode::Char('2') => self.navigate(Page::Dashboard),
            KeyCode::Char('3') => self.navigate(Page::Profile),
            KeyCode::Char('4') => self.new_post(),
            KeyCode::Char('l') if !self.is_signed_in() => self.open_auth_dialog(),
            KeyCode::Char('L') if self.is_signed_in() => self.logout(),
            KeyCode::Esc => match self.page {
                Page::Editor => self.navigate(Page::Dashboard),
                Page::Home => {}
                _ => self.navigate(Page::Home),
            },
            _ => {}
        }
    }

    // ========================================================================
    // Sign-in dialog
    // ========================================================================

    fn handle_auth_dialog_key(&mut self, key: &KeyEvent) {
        let Some(dialog) = self.auth_dialog.as_mut() else {
            return;
        };
        if ctrl(key, 't') {
            dialog.cycle_mode();
            return;
        }
        match key.code {
            KeyCode::Esc => self.close_auth_dialog(),
            KeyCode::Enter => self.submit_auth_dialog(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => dialog.toggle_focus(),
            _ if !dialog.loading => {
                edit_input(dialog.focused_input(), key, false);
            }
            _ => {}
        }
    }

    // ========================================================================
    // Home feed
    // ========================================================================

    fn handle_home_key(&mut self, key: &KeyEvent) -> bool {
        if self.feed.searching {
            match key.code {
                KeyCode::Esc => self.feed.clear_search(),
                KeyCode::Enter | KeyCode::Down => self.feed.searching = false,
                _ => {
                    if edit_input(&mut self.feed.search, key, false) {
                        self.feed.selected = 0;
                    }
                }
            }
            return true;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.feed.move_selection(&self.posts, -1),
            KeyCode::Down | KeyCode::Char('j') => self.feed.move_selection(&self.posts, 1),
            KeyCode::Enter => {
                if let Some(post) = self.feed.selected_post(&self.posts) {
                    self.read_post(&post.id);
                }
            }
            KeyCode::Char('/') => self.feed.searching = true,
            KeyCode::Char('f') => self.feed.cycle_filter(),
            KeyCode::Char('s') => self.feed.toggle_sort(),
            KeyCode::Char('r') => self.fetch_public_posts(),
            KeyCode::Esc if !self.feed.search.is_empty() => self.feed.clear_search(),
            _ => return false,
        }
        true
    }

    // ========================================================================
    // Post detail
    // ========================================================================

    fn handle_post_key(&mut self, key: &KeyEvent) -> bool {
        if self.detail.composing {
            self.handle_comment_key(key);
            return true;
        }

        let scroll = &mut self.detail.scroll;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => scroll.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => scroll.scroll_down(1),
            KeyCode::PageUp => scroll.scroll_up(PAGE_LINES),
            KeyCode::PageDown | KeyCode::Char(' ') => scroll.scroll_down(PAGE_LINES),
            KeyCode::Char('g') | KeyCode::Home => scroll.to_top(),
            KeyCode::Char('G') | KeyCode::End => scroll.offset = scroll.max_scroll,
            KeyCode::Char('c') => {
                self.detail.composing = true;
                self.detail.form.success = None;
            }
            KeyCode::Char('o') => self.open_news_link(),
            KeyCode::Char('y') => self.copy_post_link(),
            KeyCode::Char('b') => self.navigate(Page::Home),
            _ => return false,
        }
        true
    }

    fn handle_comment_key(&mut self, key: &KeyEvent) {
        if ctrl(key, 's') {
            self.submit_comment();
            return;
        }
        let form = &mut self.detail.form;
        match key.code {
            KeyCode::Esc => self.detail.composing = false,
            KeyCode::Tab => form.focus = form.focus.next(),
            KeyCode::BackTab => form.focus = form.focus.next().next(),
            KeyCode::Enter if form.focus != CommentField::Content => form.focus = form.focus.next(),
            _ if !form.submitting => {
                let multiline = form.focus == CommentField::Content;
                edit_input(form.focused_input(), key, multiline);
            }
            _ => {}
        }
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    fn handle_dashboard_key(&mut self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Tab {
            self.switch_dashboard_tab();
            return true;
        }
        match self.dashboard.tab {
            DashboardTab::Posts => self.handle_dashboard_posts_key(key),
            DashboardTab::Comments => self.handle_moderation_key(key),
        }
    }

    fn handle_dashboard_posts_key(&mut self, key: &KeyEvent) -> bool {
        if self.dashboard.searching {
            match key.code {
                KeyCode::Esc => {
                    self.dashboard.search.clear();
                    self.dashboard.searching = false;
                }
                KeyCode::Enter | KeyCode::Down => self.dashboard.searching = false,
                _ => {
                    if edit_input(&mut self.dashboard.search, key, false) {
                        self.dashboard.selected = 0;
                    }
                }
            }
            return true;
        }

        if self.dashboard.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete_selected(),
                _ => self.dashboard.cancel_delete(),
            }
            return true;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.dashboard.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.dashboard.move_selection(1),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.dashboard.selected_post().map(|p| p.id.clone()) {
                    self.edit_post(&id);
                }
            }
            KeyCode::Char('n') => self.new_post(),
            KeyCode::Char('h') => self.toggle_selected_visibility(),
            KeyCode::Char('d') => self.request_delete_selected(),
            KeyCode::Char('/') => self.dashboard.searching = true,
            KeyCode::Char('r') => self.fetch_dashboard_posts(),
            _ => return false,
        }
        true
    }

    fn handle_moderation_key(&mut self, key: &KeyEvent) -> bool {
        let moderation = &mut self.dashboard.moderation;
        if moderation.searching {
            match key.code {
                KeyCode::Esc => {
                    moderation.search.clear();
                    moderation.searching = false;
                }
                KeyCode::Enter | KeyCode::Down => moderation.searching = false,
                _ => {
                    if edit_input(&mut moderation.search, key, false) {
                        moderation.selected = 0;
                    }
                }
            }
            return true;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => moderation.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => moderation.move_selection(1),
            KeyCode::Char('f') => moderation.cycle_filter(),
            KeyCode::Char('/') => moderation.searching = true,
            KeyCode::Char('a') => self.toggle_selected_approval(),
            KeyCode::Char('d') | KeyCode::Char('x') => self.delete_selected_comment(),
            KeyCode::Char('r') => self.fetch_moderation_comments(),
            _ => return false,
        }
        true
    }

    // ========================================================================
    // Editor
    // ========================================================================

    fn handle_editor_key(&mut self, key: &KeyEvent) -> bool {
        if ctrl(key, 's') {
            self.save_editor();
            return true;
        }
        if ctrl(key, 'p') {
            self.editor.toggle_preview();
            return true;
        }
        if key.code == KeyCode::Esc {
            return false;
        }

        let editor = &mut self.editor;
        if editor.preview {
            let scroll = &mut editor.preview_scroll;
            match key.code {
                KeyCode::Up => scroll.scroll_up(1),
                KeyCode::Down => scroll.scroll_down(1),
                KeyCode::PageUp => scroll.scroll_up(PAGE_LINES),
                KeyCode::PageDown => scroll.scroll_down(PAGE_LINES),
                _ => {}
            }
            return true;
        }

        if ctrl(key, 't') {
            editor.toggle_type();
        } else if ctrl(key, 'u') {
            self.add_editor_image();
        } else if ctrl(key, 'x') {
            let index = editor.selected_image;
            editor.remove_image(index);
        } else if ctrl(key, 'r') {
            editor.cycle_image();
        } else {
            match key.code {
                KeyCode::Tab => editor.focus_next(),
                KeyCode::BackTab => editor.focus_prev(),
                KeyCode::Enter if editor.focus == EditorField::ImagePath => {
                    self.add_editor_image();
                }
                KeyCode::Enter if editor.focus != EditorField::Content => editor.focus_next(),
                _ if !editor.saving => {
                    let multiline = editor.focus == EditorField::Content;
                    edit_input(editor.focused_input(), key, multiline);
                }
                _ => {}
            }
        }
        true
    }

    // ========================================================================
    // Profile
    // ========================================================================

    fn handle_profile_key(&mut self, key: &KeyEvent) -> bool {
        let profile = &mut self.profile_view;
        if profile.editing {
            if ctrl(key, 's') {
                self.save_profile();
                return true;
            }
            match key.code {
                KeyCode::Esc => profile.cancel_editing(),
                KeyCode::Tab | KeyCode::BackTab => profile.toggle_focus(),
                KeyCode::Enter => self.save_profile(),
                _ if !profile.saving => {
                    edit_input(profile.focused_input(), key, false);
                }
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => profile.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => profile.move_selection(1),
            KeyCode::Char('e') => profile.start_editing(),
            KeyCode::Enter => {
                if let Some(id) = profile.selected_post().map(|p| p.id.clone()) {
                    self.read_post(&id);
                }
            }
            _ => return false,
        }
        true
    }
}
