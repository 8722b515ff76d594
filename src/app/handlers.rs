//! Message handling for the App.

use tracing::{debug, info, warn};

use super::{App, AppMessage, Page};
use crate::view_state::DashboardTab;

impl App {
    /// Handle an incoming async message
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::SessionChanged(session) => {
                let was_signed_in = self.session.is_some();
                match session {
                    Some(session) => {
                        self.session = Some(session);
                    }
                    None if was_signed_in => {
                        info!("Session ended");
                        self.clear_user_state();
                    }
                    None => {}
                }
            }

            AppMessage::ProfileLoaded { user_id, profile } => {
                if user_id.as_deref() == self.user_id() {
                    self.profile = profile;
                } else {
                    debug!("Dropping profile for a previous session");
                }
            }

            AppMessage::PostsLoaded(posts) => {
                self.posts = posts;
                self.posts_loading = false;
                self.feed.clamp_selection(&self.posts);
            }

            AppMessage::EditPostLoaded(post) => {
                self.open_editor(post);
            }

            AppMessage::EditPostFailed { id, error } => {
                warn!(post_id = %id, "Could not load post for editing: {}", error);
                self.set_notice(format!("Could not open post: {}", error));
            }

            AppMessage::CommentsLoaded { post_id, comments } => {
                if self.selected_post_id.as_deref() == Some(post_id.as_str()) {
                    self.detail.set_comments(comments);
                } else {
                    debug!(post_id, "Dropping comments for a post no longer open");
                }
            }

            AppMessage::CommentSubmitted { post_id, error } => {
                if self.selected_post_id.as_deref() != Some(post_id.as_str()) {
                    return;
                }
                match error {
                    None => {
                        self.detail.form.submitted();
                        self.detail.composing = false;
                    }
                    Some(error) => self.detail.form.submit_failed(&error),
                }
            }

            AppMessage::DashboardPostsLoaded(posts) => {
                self.dashboard.set_posts(posts);
            }

            AppMessage::DashboardLoadFailed(error) => {
                self.dashboard.set_load_error(error);
            }

            AppMessage::DashboardActionDone { error } => {
                self.dashboard.finish_action(error);
                self.fetch_dashboard_posts();
                self.fetch_public_posts();
            }

            AppMessage::ModerationLoaded(comments) => {
                self.dashboard.moderation.set_comments(comments);
            }

            AppMessage::ModerationLoadFailed(error) => {
                self.dashboard.moderation.set_load_error(error);
            }

            AppMessage::ModerationActionDone { error } => {
                self.dashboard.moderation.finish_action(error);
                self.fetch_moderation_comments();
            }

            AppMessage::ImageAdded(url) => {
                self.editor.image_added(url);
            }

            AppMessage::ImageFailed(error) => {
                self.editor.image_failed(&error);
            }

            AppMessage::PostSaved => {
                if self.page == Page::Editor {
                    self.post_saved();
                } else {
                    self.editor.saving = false;
                    self.fetch_public_posts();
                }
            }

            AppMessage::PostSaveFailed(error) => {
                self.editor.save_failed(&error);
            }

            AppMessage::SignedIn(session) => {
                info!(user_id = %session.user_id(), "Signed in from dialog");
                self.session = Some(session);
                self.auth_dialog = None;
                self.fetch_public_posts();
                self.resume_pending_page();
            }

            AppMessage::SignedUp => {
                if let Some(dialog) = self.auth_dialog.as_mut() {
                    dialog.signed_up();
                }
            }

            AppMessage::MagicLinkSent => {
                if let Some(dialog) = self.auth_dialog.as_mut() {
                    dialog.link_sent();
                }
            }

            AppMessage::AuthFailed(error) => {
                if let Some(dialog) = self.auth_dialog.as_mut() {
                    dialog.failed(error);
                }
            }

            AppMessage::ProfileFetched(profile) => {
                if self.page == Page::Profile {
                    if profile.is_some() {
                        self.profile = profile.clone();
                    }
                    self.profile_view.set_profile(profile);
                }
            }

            AppMessage::ProfilePostsLoaded(posts) => {
                self.profile_view.set_posts(posts);
            }

            AppMessage::ProfileSaved(profile) => {
                self.profile = Some(profile.clone());
                self.profile_view.saved(profile);
            }

            AppMessage::ProfileSaveFailed(error) => {
                self.profile_view.save_failed(error);
            }

            AppMessage::SignedOut { error } => match error {
                Some(error) => self.set_notice(format!("Signed out locally ({})", error)),
                None => self.set_notice("Signed out"),
            },
        }
    }

    /// Switch dashboard tabs, loading comments on first view.
    pub fn switch_dashboard_tab(&mut self) {
        if self.dashboard.switch_tab() == DashboardTab::Comments {
            self.fetch_moderation_comments();
        }
    }
}
