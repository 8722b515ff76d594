//! Line-based scroll position for long pages.

/// Scroll position of a page, in rendered lines from the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// First visible line
    pub offset: u16,
    /// Largest useful offset (calculated during render)
    pub max_scroll: u16,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_scroll);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    /// Record the content height seen by the last render.
    pub fn set_content_height(&mut self, content: usize, viewport: u16) {
        let content = u16::try_from(content).unwrap_or(u16::MAX);
        self.max_scroll = content.saturating_sub(viewport);
        self.offset = self.offset.min(self.max_scroll);
    }

    pub fn is_at_top(&self) -> bool {
        self.offset == 0
    }

    /// Get scroll percentage (0-100)
    pub fn scroll_percentage(&self) -> u8 {
        if self.max_scroll == 0 {
            100
        } else {
            ((self.offset as f32 / self.max_scroll as f32) * 100.0) as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = ScrollState::new();
        state.set_content_height(30, 10);
        assert_eq!(state.max_scroll, 20);

        state.scroll_down(50);
        assert_eq!(state.offset, 20);

        state.scroll_up(5);
        assert_eq!(state.offset, 15);

        state.set_content_height(12, 10);
        assert_eq!(state.offset, 2);

        state.to_top();
        assert!(state.is_at_top());
    }

    #[test]
    fn test_scroll_percentage() {
        let mut state = ScrollState::new();
        assert_eq!(state.scroll_percentage(), 100);

        state.set_content_height(110, 10);
        state.scroll_down(50);
        assert_eq!(state.scroll_percentage(), 50);
    }
}
