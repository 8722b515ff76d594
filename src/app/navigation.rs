//! Page routing for the App.

use tracing::{debug, info, warn};

use super::{App, AppMessage, Page};
use crate::models::Post;
use crate::view_state::{
    AuthDialogState, DashboardState, DetailState, EditorState, FeedState, ProfileState,
};

impl App {
    /// Switch to `page`.
    ///
    /// Auth-gated pages open the sign-in dialog instead when nobody is
    /// signed in; the page is remembered and opened after sign-in.
    pub fn navigate(&mut self, page: Page) {
        if page.requires_auth() && !self.is_signed_in() {
            debug!(?page, "Navigation blocked until sign-in");
            self.pending_page = Some(page);
            self.open_auth_dialog();
            return;
        }

        debug!(from = ?self.page, to = ?page, "Navigate");
        self.page = page;
        self.selected_post_id = None;
        if page != Page::Editor {
            self.edit_post = None;
        }
        self.scroll_to_top();
        self.enter_page(page);
    }

    /// Start the loads a page needs when it is entered.
    fn enter_page(&mut self, page: Page) {
        match page {
            Page::Dashboard => {
                self.fetch_dashboard_posts();
                if self.dashboard.tab == crate::view_state::DashboardTab::Comments {
                    self.fetch_moderation_comments();
                }
            }
            Page::Profile => {
                if let Some(session) = &self.session {
                    self.profile_view = ProfileState::for_session(session);
                }
                self.fetch_profile_page();
            }
            Page::Home | Page::Post | Page::Editor => {}
        }
    }

    /// Reset the per-page scroll positions.
    pub fn scroll_to_top(&mut self) {
        self.detail.scroll.to_top();
        self.feed.selected = 0;
        self.dashboard.selected = 0;
        self.dashboard.moderation.selected = 0;
        self.profile_view.selected = 0;
    }

    /// Open the post `id` and load its comments.
    pub fn read_post(&mut self, id: &str) {
        debug!(post_id = id, "Read post");
        self.page = Page::Post;
        self.selected_post_id = Some(id.to_string());
        self.edit_post = None;
        self.detail = DetailState::new();
        self.scroll_to_top();
        self.fetch_comments(id);
    }

    /// The post on the `Post` page, if it is still in the public feed.
    pub fn selected_post(&self) -> Option<&Post> {
        let id = self.selected_post_id.as_deref()?;
        self.posts.iter().find(|p| p.id == id)
    }

    /// Page to render. A post that left the public feed shows home.
    pub fn effective_page(&self) -> Page {
        match self.page {
            Page::Post if self.selected_post().is_none() => Page::Home,
            page => page,
        }
    }

    /// Open the editor for post `id`.
    ///
    /// Uses the fetched feed when it has the post, otherwise looks it up.
    pub fn edit_post(&mut self, id: &str) {
        if let Some(post) = self.posts.iter().find(|p| p.id == id).cloned() {
            self.open_editor(post);
            return;
        }

        debug!(post_id = id, "Post not in feed, fetching");
        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            let msg = match store.fetch_post_by_id(&id).await {
                Ok(post) => AppMessage::EditPostLoaded(post),
                Err(e) => AppMessage::EditPostFailed {
                    id,
                    error: e.user_message(),
                },
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Enter the editor pre-filled with `post`.
    pub fn open_editor(&mut self, post: Post) {
        self.editor = EditorState::from_post(&post);
        self.edit_post = Some(post);
        self.navigate(Page::Editor);
    }

    /// Enter the editor with an empty form.
    pub fn new_post(&mut self) {
        self.edit_post = None;
        self.editor = EditorState::new();
        self.navigate(Page::Editor);
    }

    /// Called when the editor saved: back to the refreshed dashboard.
    pub fn post_saved(&mut self) {
        info!("Post saved");
        self.editor.saving = false;
        self.fetch_public_posts();
        self.edit_post = None;
        self.navigate(Page::Dashboard);
    }

    /// Sign out and forget everything tied to the user.
    ///
    /// The remote sign-out is best effort; the local session file is
    /// removed whatever it returns.
    pub fn logout(&mut self) {
        info!("Signing out");
        let auth = self.backend.auth.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = auth.sign_out().await.err().map(|e| {
                warn!("Remote sign-out failed: {}", e);
                e.user_message()
            });
            let _ = message_tx.send(AppMessage::SignedOut { error });
        });
        self.clear_user_state();
    }

    /// Drop the user, their profile and every view's state, and go home.
    pub(crate) fn clear_user_state(&mut self) {
        self.session = None;
        self.profile = None;
        self.pending_page = None;
        self.auth_dialog = None;
        self.edit_post = None;
        self.selected_post_id = None;
        self.feed = FeedState::new();
        self.detail = DetailState::default();
        self.dashboard = DashboardState::new();
        self.editor = EditorState::new();
        self.profile_view = ProfileState::default();
        self.page = Page::Home;
    }

    pub fn open_auth_dialog(&mut self) {
        if self.auth_dialog.is_none() {
            self.auth_dialog = Some(AuthDialogState::new());
        }
    }

    /// Close the dialog without signing in; forgets the blocked page.
    pub fn close_auth_dialog(&mut self) {
        self.auth_dialog = None;
        self.pending_page = None;
    }

    /// Open the page that was blocked by the sign-in dialog, if any.
    pub(crate) fn resume_pending_page(&mut self) {
        if let Some(page) = self.pending_page.take() {
            self.navigate(page);
        }
    }
}
