//! Application state and logic.
//!
//! `App` owns the router state, the public feed and every view's state.
//! Background tasks report back through [`AppMessage`]s which the event loop
//! feeds to [`App::handle_message`].

mod actions;
mod handlers;
mod keys;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::Page;

use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::auth::Session;
use crate::backend::Backend;
use crate::config::AppConfig;
use crate::models::text_utils;
use crate::models::{Post, Profile};
use crate::view_state::{
    AuthDialogState, DashboardState, DetailState, EditorState, FeedState, ProfileState,
};

/// Main application state
pub struct App {
    pub config: AppConfig,
    /// Backend clients (shared with spawned tasks by cloning)
    pub backend: Backend,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Current page
    pub page: Page,
    /// Post shown on the `Post` page
    pub selected_post_id: Option<String>,
    /// Post loaded into the editor; `None` when writing a new post
    pub edit_post: Option<Post>,
    /// Sign-in overlay, when open
    pub auth_dialog: Option<AuthDialogState>,
    /// Page the user tried to open before signing in
    pub pending_page: Option<Page>,
    pub session: Option<Session>,
    /// Profile of the signed-in user
    pub profile: Option<Profile>,
    /// Public feed
    pub posts: Vec<Post>,
    pub posts_loading: bool,
    pub feed: FeedState,
    pub detail: DetailState,
    pub dashboard: DashboardState,
    pub editor: EditorState,
    pub profile_view: ProfileState,
    /// Key help overlay
    pub show_help: bool,
    /// Status line message
    pub notice: Option<String>,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Dirty flag: when true, the UI needs to be redrawn.
    pub needs_redraw: bool,
    /// Tick counter for the loading spinner
    pub tick_count: u64,
}

impl App {
    pub fn new(config: AppConfig, backend: Backend) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            config,
            backend,
            message_rx: Some(message_rx),
            message_tx,
            page: Page::default(),
            selected_post_id: None,
            edit_post: None,
            auth_dialog: None,
            pending_page: None,
            session: None,
            profile: None,
            posts: Vec::new(),
            posts_loading: true,
            feed: FeedState::new(),
            detail: DetailState::default(),
            dashboard: DashboardState::new(),
            editor: EditorState::new(),
            profile_view: ProfileState::default(),
            show_help: false,
            notice: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
        }
    }

    /// Load what the first screen needs.
    pub fn initialize(&mut self) {
        self.fetch_public_posts();
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id())
    }

    /// Name shown in the header for the signed-in user.
    pub fn user_label(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        match &self.profile {
            Some(profile) => Some(profile.display_name()),
            None => session.email().map(str::to_string),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance the tick counter; only redraw when something animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_busy() {
            self.mark_dirty();
        }
    }

    /// Whether any request is in flight that the UI shows a spinner for.
    pub fn is_busy(&self) -> bool {
        self.posts_loading
            || self.detail.loading_comments && self.page == Page::Post
            || self.dashboard.loading
            || self.dashboard.moderation.loading
            || self.editor.saving
            || self.editor.uploading
            || self.auth_dialog.as_ref().is_some_and(|d| d.loading)
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Today's date in the display time zone.
    pub fn today(&self) -> NaiveDate {
        text_utils::today()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::adapters::{InMemorySessionStore, MockHttpClient};
    use crate::auth::AuthUser;
    use crate::config::BackendConfig;

    pub const URL: &str = "https://x.supabase.co";

    pub fn app_with(http: Arc<MockHttpClient>) -> App {
        let backend_config = BackendConfig::new(URL, "anon");
        let backend = Backend::new(
            backend_config.clone(),
            http,
            Arc::new(InMemorySessionStore::new()),
        );
        App::new(AppConfig::new(backend_config), backend)
    }

    pub fn app() -> App {
        app_with(Arc::new(MockHttpClient::new()))
    }

    pub fn session(id: &str) -> Session {
        Session {
            access_token: "jwt".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Some(Utc::now().timestamp() + 3600),
            expires_in: None,
            user: AuthUser {
                id: id.to_string(),
                email: Some(format!("{}@example.com", id)),
                ..AuthUser::default()
            },
        }
    }

    pub fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {}", id),
            content: "Body".to_string(),
            slug: id.to_string(),
            ..Post::default()
        }
    }
}
