//! Per-view state, kept apart from `App` so renderers and tests can use it
//! without the event loop.
//!
//! Each view owns only local state (form fields, search text, filters,
//! selection, busy flags). Fetched collections live here too when only one
//! view shows them; the public feed is owned by `App`.
//!
//! - [`FeedState`]: home feed search, filter, sort and selection
//! - [`DetailState`]: post detail scroll and comment form
//! - [`DashboardState`]: author's posts, delete confirmation, tabs
//! - [`ModerationState`]: comment moderation tab
//! - [`EditorState`]: post editor form
//! - [`ProfileState`]: profile page and its edit form
//! - [`AuthDialogState`]: sign-in dialog
//! - [`ScrollState`]: line-based scroll offset

pub mod auth_dialog;
pub mod dashboard;
pub mod detail;
pub mod editor;
pub mod feed;
pub mod moderation;
pub mod profile;
mod scroll_state;

pub use auth_dialog::{AuthDialogField, AuthDialogState, AuthFormError, AuthMode, AuthRequest};
pub use dashboard::{DashboardState, DashboardTab};
pub use detail::{CommentField, CommentForm, CommentFormError, CommentSubmission, DetailState};
pub use editor::{EditorError, EditorField, EditorState, ImageFile};
pub use feed::FeedState;
pub use moderation::ModerationState;
pub use profile::{ProfileEdit, ProfileError, ProfileField, ProfileState};
pub use scroll_state::ScrollState;

/// Move a list selection by `delta`, clamped to `len`.
pub(crate) fn step_selection(selected: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = selected as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}
