//! AppMessage enum for async communication within the application.

use crate::auth::Session;
use crate::models::{Comment, Post, Profile};

/// Messages received from background tasks.
///
/// Errors arrive as the user-facing message text of the failed call.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The signed-in session changed (sign-in, refresh, sign-out)
    SessionChanged(Option<Session>),
    /// Profile ensured for the identity `user_id`; `None` when signed out
    /// or when the profile could not be read or created
    ProfileLoaded {
        user_id: Option<String>,
        profile: Option<Profile>,
    },
    /// Public feed fetched (empty on failure)
    PostsLoaded(Vec<Post>),
    /// Point lookup for the editor succeeded
    EditPostLoaded(Post),
    /// Point lookup for the editor failed
    EditPostFailed { id: String, error: String },
    /// Comments of a post fetched (empty on failure)
    CommentsLoaded {
        post_id: String,
        comments: Vec<Comment>,
    },
    /// Comment submission finished
    CommentSubmitted {
        post_id: String,
        error: Option<String>,
    },
    /// Author's posts fetched for the dashboard
    DashboardPostsLoaded(Vec<Post>),
    DashboardLoadFailed(String),
    /// Visibility toggle or delete finished
    DashboardActionDone { error: Option<String> },
    /// All comments fetched for moderation
    ModerationLoaded(Vec<Comment>),
    ModerationLoadFailed(String),
    /// Approve or delete finished
    ModerationActionDone { error: Option<String> },
    /// Image stored; carries the URL to put in the post
    ImageAdded(String),
    ImageFailed(String),
    /// Editor save finished
    PostSaved,
    PostSaveFailed(String),
    /// Password sign-in succeeded
    SignedIn(Session),
    /// Account created
    SignedUp,
    /// Magic link email sent
    MagicLinkSent,
    /// Any auth dialog request failed
    AuthFailed(String),
    /// Profile page reload of the stored profile
    ProfileFetched(Option<Profile>),
    /// Posts listed on the profile page
    ProfilePostsLoaded(Vec<Post>),
    ProfileSaved(Profile),
    ProfileSaveFailed(String),
    /// Remote sign-out finished (the local session is gone either way)
    SignedOut { error: Option<String> },
}
