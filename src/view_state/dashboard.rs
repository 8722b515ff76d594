//! Dashboard: the signed-in author's posts and the moderation tab.
//!
//! Deleting is two-step. [`DashboardState::request_delete`] marks a row,
//! [`DashboardState::confirm_delete`] only fires for that same row, and
//! [`DashboardState::cancel_delete`] clears the mark.

use super::moderation::ModerationState;
use super::step_selection;
use crate::models::{Post, PostStats};
use crate::widgets::InputBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Posts,
    Comments,
}

impl DashboardTab {
    pub fn toggled(self) -> Self {
        match self {
            DashboardTab::Posts => DashboardTab::Comments,
            DashboardTab::Comments => DashboardTab::Posts,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub tab: DashboardTab,
    pub posts: Vec<Post>,
    pub loading: bool,
    /// Last failed load, cleared by the next successful one
    pub load_error: Option<String>,
    /// Last failed action, cleared when the next action starts
    pub action_error: Option<String>,
    pub search: InputBox,
    pub searching: bool,
    pub selected: usize,
    /// Post with a visibility/delete call in flight
    pub busy_id: Option<String>,
    /// Post awaiting delete confirmation
    pub pending_delete: Option<String>,
    pub moderation: ModerationState,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message to show above the list; a failed action wins over a failed load.
    pub fn error(&self) -> Option<&str> {
        self.action_error.as_deref().or(self.load_error.as_deref())
    }

    /// Posts whose title contains the search text, or whose type does.
    pub fn visible_posts(&self) -> Vec<&Post> {
        let query = self.search.trimmed().to_lowercase();
        self.posts
            .iter()
            .filter(|p| {
                query.is_empty()
                    || p.title.to_lowercase().contains(&query)
                    || p.post_type.as_str().contains(&query)
            })
            .collect()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.visible_posts().into_iter().nth(self.selected)
    }

    pub fn stats(&self) -> PostStats {
        PostStats::from_posts(&self.posts)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_posts().len();
        self.selected = step_selection(self.selected, len, delta);
        self.pending_delete = None;
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.loading = false;
        self.load_error = None;
        let len = self.visible_posts().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn set_load_error(&mut self, error: String) {
        self.loading = false;
        self.load_error = Some(error);
    }

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirm deletion of `id`.
    ///
    /// Returns true (and marks the row busy) only when `id` is the row
    /// awaiting confirmation and nothing else is running.
    pub fn confirm_delete(&mut self, id: &str) -> bool {
        if self.pending_delete.as_deref() != Some(id) || self.busy_id.is_some() {
            return false;
        }
        self.pending_delete = None;
        self.busy_id = Some(id.to_string());
        self.action_error = None;
        true
    }

    /// Mark `id` busy for a visibility toggle. Returns false if busy.
    pub fn begin_toggle(&mut self, id: &str) -> bool {
        if self.busy_id.is_some() {
            return false;
        }
        self.busy_id = Some(id.to_string());
        self.action_error = None;
        true
    }

    pub fn finish_action(&mut self, error: Option<String>) {
        self.busy_id = None;
        if error.is_some() {
            self.action_error = error;
        }
    }

    pub fn switch_tab(&mut self) -> DashboardTab {
        self.tab = self.tab.toggled();
        self.pending_delete = None;
        self.tab
    }
}
