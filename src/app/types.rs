//! Type definitions for the application state.
//!
//! - [`Page`] - Which page is currently displayed

/// Pages the router can show. The auth dialog is an overlay, not a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Post,
    Dashboard,
    Editor,
    Profile,
}

impl Page {
    /// Pages only a signed-in user may open.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Dashboard | Page::Editor | Page::Profile)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Post => "Post",
            Page::Dashboard => "Dashboard",
            Page::Editor => "Editor",
            Page::Profile => "Profile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_auth_table() {
        assert!(!Page::Home.requires_auth());
        assert!(!Page::Post.requires_auth());
        assert!(Page::Dashboard.requires_auth());
        assert!(Page::Editor.requires_auth());
        assert!(Page::Profile.requires_auth());
    }
}
