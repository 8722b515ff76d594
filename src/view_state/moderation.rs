//! Comment moderation tab.

use super::step_selection;
use crate::models::{Comment, CommentFilter, CommentStats};
use crate::widgets::InputBox;

#[derive(Debug, Clone, Default)]
pub struct ModerationState {
    pub comments: Vec<Comment>,
    pub loading: bool,
    pub loaded: bool,
    /// Last failed load, cleared by the next successful one
    pub load_error: Option<String>,
    /// Last failed action, cleared when the next action starts
    pub action_error: Option<String>,
    pub search: InputBox,
    pub searching: bool,
    pub filter: CommentFilter,
    pub selected: usize,
    /// Comment with an approve/delete call in flight
    pub busy_id: Option<String>,
}

impl ModerationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message to show above the list; a failed action wins over a failed load.
    pub fn error(&self) -> Option<&str> {
        self.action_error.as_deref().or(self.load_error.as_deref())
    }

    pub fn visible_comments(&self) -> Vec<&Comment> {
        let query = self.search.trimmed().to_lowercase();
        self.comments
            .iter()
            .filter(|c| self.filter.matches(c))
            .filter(|c| query.is_empty() || c.matches_text(&query))
            .collect()
    }

    pub fn selected_comment(&self) -> Option<&Comment> {
        self.visible_comments().into_iter().nth(self.selected)
    }

    pub fn stats(&self) -> CommentStats {
        CommentStats::from_comments(&self.comments)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_comments().len();
        self.selected = step_selection(self.selected, len, delta);
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    /// Mark `id` busy. Returns false if another action is still running.
    pub fn begin_action(&mut self, id: &str) -> bool {
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

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
        self.loading = false;
        self.loaded = true;
        self.load_error = None;
        let len = self.visible_comments().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn set_load_error(&mut self, error: String) {
        self.loading = false;
        self.loaded = true;
        self.load_error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, name: &str, content: &str, approved: bool) -> Comment {
        Comment {
            id: id.to_string(),
            author_name: name.to_string(),
            author_email: format!("{}@example.com", name.to_lowercase()),
            content: content.to_string(),
            is_approved: approved,
            ..Comment::default()
        }
    }

    fn state() -> ModerationState {
        let mut state = ModerationState::new();
        state.set_comments(vec![
            comment("c1", "Ada", "Great post", true),
            comment("c2", "Bob", "Spam spam", false),
            comment("c3", "Cy", "Thanks ada", false),
        ]);
        state
    }

    #[test]
    fn test_filter_by_status() {
        let mut state = state();
        state.cycle_filter();
        assert_eq!(state.filter, CommentFilter::Pending);
        let ids: Vec<_> = state.visible_comments().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c3"]);
    }

    #[test]
    fn test_search_covers_name_email_and_content() {
        let mut state = state();
        state.search.set_content("ADA".to_string());
        let ids: Vec<_> = state.visible_comments().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);

        state.search.set_content("bob@".to_string());
        assert_eq!(state.visible_comments().len(), 1);
    }

    #[test]
    fn test_stats() {
        let stats = state().stats();
        assert_eq!((stats.total, stats.pending, stats.approved), (3, 2, 1));
    }

    #[test]
    fn test_one_action_at_a_time() {
        let mut state = state();
        assert!(state.begin_action("c1"));
        assert!(!state.begin_action("c2"));
        state.finish_action(Some("boom".to_string()));
        assert!(state.busy_id.is_none());
        assert_eq!(state.error(), Some("boom"));
        assert!(state.begin_action("c2"));
    }

    #[test]
    fn test_successful_reload_clears_load_error() {
        let mut state = ModerationState::new();
        state.set_load_error("offline".to_string());
        assert_eq!(state.error(), Some("offline"));

        state.begin_load();
        state.set_comments(Vec::new());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_action_error_survives_refresh() {
        let mut state = state();
        assert!(state.begin_action("c2"));
        state.finish_action(Some("permission denied".to_string()));
        state.set_comments(vec![comment("c2", "Bob", "Spam spam", false)]);
        assert_eq!(state.error(), Some("permission denied"));

        assert!(state.begin_action("c2"));
        assert!(state.error().is_none());
    }
}
