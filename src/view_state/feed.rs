//! Home feed: search, type filter, sort order and selection.

use super::step_selection;
use crate::models::{Post, PostFilter, SortOrder};
use crate::widgets::InputBox;

#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub search: InputBox,
    /// Keys go to the search box while true
    pub searching: bool,
    pub filter: PostFilter,
    pub sort: SortOrder,
    pub selected: usize,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> String {
        self.search.trimmed().to_lowercase()
    }

    /// Posts passing the filter and search, in the chosen order.
    pub fn visible_posts(&self, posts: &[Post]) -> Vec<Post> {
        let query = self.query();
        let mut visible: Vec<Post> = posts
            .iter()
            .filter(|p| self.filter.matches(p))
            .filter(|p| query.is_empty() || p.matches_text(&query))
            .cloned()
            .collect();
        self.sort.sort(&mut visible);
        visible
    }

    pub fn selected_post(&self, posts: &[Post]) -> Option<Post> {
        self.visible_posts(posts).into_iter().nth(self.selected)
    }

    pub fn move_selection(&mut self, posts: &[Post], delta: isize) {
        let len = self.visible_posts(posts).len();
        self.selected = step_selection(self.selected, len, delta);
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
        self.selected = 0;
    }

    /// Keep the selection inside the list after the posts changed.
    pub fn clamp_selection(&mut self, posts: &[Post]) {
        let len = self.visible_posts(posts).len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.searching = false;
        self.selected = 0;
    }
}
