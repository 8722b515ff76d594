//! Background actions for the App.
//!
//! Every backend call runs in a spawned task and reports back with an
//! [`AppMessage`]. Busy flags are set here, on the UI task, before the
//! task is spawned, so a second key press cannot start a duplicate request.

use std::path::PathBuf;

use tracing::{debug, error, warn};

use super::{App, AppMessage};
use crate::clipboard;
use crate::config::ImageMode;
use crate::models::PostUpdate;
use crate::view_state::{AuthRequest, ImageFile};

impl App {
    // ========================================================================
    // Public feed and post detail
    // ========================================================================

    /// Reload the public feed. Failure leaves an empty feed.
    pub fn fetch_public_posts(&mut self) {
        self.posts_loading = true;
        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let posts = match store.fetch_posts().await {
                Ok(posts) => posts,
                Err(e) => {
                    error!("Failed to fetch posts: {}", e);
                    Vec::new()
                }
            };
            let _ = message_tx.send(AppMessage::PostsLoaded(posts));
        });
    }

    pub fn fetch_comments(&mut self, post_id: &str) {
        self.detail.loading_comments = true;
        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        let post_id = post_id.to_string();
        tokio::spawn(async move {
            let comments = match store.fetch_comments(&post_id).await {
                Ok(comments) => comments,
                Err(e) => {
                    error!(post_id, "Failed to fetch comments: {}", e);
                    Vec::new()
                }
            };
            let _ = message_tx.send(AppMessage::CommentsLoaded { post_id, comments });
        });
    }

    /// Submit the comment form for the open post.
    ///
    /// Invalid forms never reach the network.
    pub fn submit_comment(&mut self) {
        let Some(post_id) = self.selected_post_id.clone() else {
            return;
        };
        let Some(submission) = self.detail.form.begin_submit() else {
            return;
        };

        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = store
                .submit_comment(
                    &post_id,
                    &submission.author_name,
                    &submission.author_email,
                    &submission.content,
                )
                .await
                .err()
                .map(|e| {
                    warn!(post_id, "Comment submission failed: {}", e);
                    e.user_message()
                });
            let _ = message_tx.send(AppMessage::CommentSubmitted { post_id, error });
        });
    }

    /// Link to share for the open post: the site page, else a news link.
    pub fn share_link(&self) -> Option<String> {
        let post = self.selected_post()?;
        self.config
            .post_url(&post.slug)
            .or_else(|| post.link().map(str::to_string))
    }

    pub fn copy_post_link(&mut self) {
        let Some(link) = self.share_link() else {
            self.detail.notice = Some("No link to copy (set QUIRE_SITE_URL)".to_string());
            return;
        };
        self.detail.notice = Some(match clipboard::copy_text(&link) {
            Ok(()) => "Link copied!".to_string(),
            Err(e) => {
                warn!("Copy failed: {}", e);
                e.to_string()
            }
        });
    }

    /// Open the news item's external link in the browser.
    pub fn open_news_link(&mut self) {
        let Some(link) = self.selected_post().and_then(|p| p.link()).map(str::to_string) else {
            return;
        };
        self.detail.notice = Some(match clipboard::open_in_browser(&link) {
            Ok(()) => format!("Opened {}", link),
            Err(e) => {
                warn!("Open failed: {}", e);
                e.to_string()
            }
        });
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    pub fn fetch_dashboard_posts(&mut self) {
        let Some(author_id) = self.user_id().map(str::to_string) else {
            return;
        };
        self.dashboard.begin_load();
        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match store.fetch_posts_by_author(&author_id).await {
                Ok(posts) => AppMessage::DashboardPostsLoaded(posts),
                Err(e) => {
                    error!("Failed to fetch dashboard posts: {}", e);
                    AppMessage::DashboardLoadFailed(e.user_message())
                }
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Flip the selected post between hidden and visible.
    pub fn toggle_selected_visibility(&mut self) {
        let Some(post) = self.dashboard.selected_post().cloned() else {
            return;
        };
        if !self.dashboard.begin_toggle(&post.id) {
            return;
        }

        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = store
                .toggle_post_visibility(&post.id, !post.is_hidden)
                .await
                .err()
                .map(|e| {
                    error!(post_id = %post.id, "Visibility toggle failed: {}", e);
                    e.user_message()
                });
            let _ = message_tx.send(AppMessage::DashboardActionDone { error });
        });
    }

    /// Ask to delete the selected post; nothing is sent yet.
    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.dashboard.selected_post().map(|p| p.id.clone()) {
            self.dashboard.request_delete(&id);
        }
    }

    /// Delete the selected post if it is the one awaiting confirmation.
    pub fn confirm_delete_selected(&mut self) {
        let Some(id) = self.dashboard.selected_post().map(|p| p.id.clone()) else {
            return;
        };
        if !self.dashboard.confirm_delete(&id) {
            return;
        }

        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = store.delete_post(&id).await.err().map(|e| {
                error!(post_id = %id, "Delete failed: {}", e);
                e.user_message()
            });
            let _ = message_tx.send(AppMessage::DashboardActionDone { error });
        });
    }

    // ========================================================================
    // Comment moderation
    // ========================================================================

    pub fn fetch_moderation_comments(&mut self) {
        self.dashboard.moderation.begin_load();
        let functions = self.backend.functions.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match functions.list_all_comments().await {
                Ok(comments) => AppMessage::ModerationLoaded(comments),
                Err(e) => {
                    error!("Failed to fetch comments for moderation: {}", e);
                    AppMessage::ModerationLoadFailed(e.user_message())
                }
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Approve the selected comment, or withdraw its approval.
    pub fn toggle_selected_approval(&mut self) {
        let Some(comment) = self.dashboard.moderation.selected_comment().cloned() else {
            return;
        };
        if !self.dashboard.moderation.begin_action(&comment.id) {
            return;
        }

        let functions = self.backend.functions.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = functions
                .approve_comment(&comment.id, !comment.is_approved)
                .await
                .err()
                .map(|e| {
                    error!(comment_id = %comment.id, "Approval change failed: {}", e);
                    e.user_message()
                });
            let _ = message_tx.send(AppMessage::ModerationActionDone { error });
        });
    }

    pub fn delete_selected_comment(&mut self) {
        let Some(id) = self
            .dashboard
            .moderation
            .selected_comment()
            .map(|c| c.id.clone())
        else {
            return;
        };
        if !self.dashboard.moderation.begin_action(&id) {
            return;
        }

        let functions = self.backend.functions.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = functions.delete_comment(&id).await.err().map(|e| {
                error!(comment_id = %id, "Comment delete failed: {}", e);
                e.user_message()
            });
            let _ = message_tx.send(AppMessage::ModerationActionDone { error });
        });
    }

    // ========================================================================
    // Editor
    // ========================================================================

    /// Add the image named in the editor's path field.
    pub fn add_editor_image(&mut self) {
        let Some(path) = self.editor.begin_image() else {
            return;
        };
        let mode = self.config.backend.image_mode;
        let functions = self.backend.functions.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match store_image(&functions, mode, path).await {
                Ok(url) => AppMessage::ImageAdded(url),
                Err(message) => {
                    warn!("Image add failed: {}", message);
                    AppMessage::ImageFailed(message)
                }
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Validate and save the editor form.
    ///
    /// Ignored while a save is already running.
    pub fn save_editor(&mut self) {
        let author_id = self.user_id().map(str::to_string);
        let Some(draft) = self.editor.begin_save(author_id.as_deref()) else {
            return;
        };
        let editing_id = self.editor.editing_id.clone();

        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = match &editing_id {
                Some(id) => store.update_post(id, PostUpdate::from(draft)).await,
                None => store.create_post(&draft).await,
            };
            let msg = match result {
                Ok(post) => {
                    debug!(post_id = %post.id, "Editor save finished");
                    AppMessage::PostSaved
                }
                Err(e) => {
                    error!("Save failed: {}", e);
                    AppMessage::PostSaveFailed(e.user_message())
                }
            };
            let _ = message_tx.send(msg);
        });
    }

    // ========================================================================
    // Auth dialog
    // ========================================================================

    pub fn submit_auth_dialog(&mut self) {
        let Some(request) = self.auth_dialog.as_mut().and_then(|d| d.begin_submit()) else {
            return;
        };

        let auth = self.backend.auth.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match request {
                AuthRequest::Login { email, password } => {
                    match auth.sign_in_with_password(&email, &password).await {
                        Ok(session) => AppMessage::SignedIn(session),
                        Err(e) => AppMessage::AuthFailed(e.user_message()),
                    }
                }
                AuthRequest::Signup { email, password } => {
                    match auth.sign_up(&email, &password).await {
                        Ok(Some(session)) => AppMessage::SignedIn(session),
                        Ok(None) => AppMessage::SignedUp,
                        Err(e) => AppMessage::AuthFailed(e.user_message()),
                    }
                }
                AuthRequest::MagicLink { email } => match auth.sign_in_with_otp(&email).await {
                    Ok(()) => AppMessage::MagicLinkSent,
                    Err(e) => AppMessage::AuthFailed(e.user_message()),
                },
            };
            if let AppMessage::AuthFailed(ref message) = msg {
                warn!("Auth request failed: {}", message);
            }
            let _ = message_tx.send(msg);
        });
    }

    // ========================================================================
    // Profile page
    // ========================================================================

    /// Load the profile row and the user's posts for the profile page.
    pub fn fetch_profile_page(&mut self) {
        let Some(user_id) = self.user_id().map(str::to_string) else {
            return;
        };
        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let profile = match store.fetch_user(&user_id).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    debug!(user_id, "No profile row, using identity: {}", e);
                    None
                }
            };
            let _ = message_tx.send(AppMessage::ProfileFetched(profile));

            let posts = match store.fetch_posts_by_author(&user_id).await {
                Ok(posts) => posts,
                Err(e) => {
                    error!(user_id, "Failed to fetch profile posts: {}", e);
                    Vec::new()
                }
            };
            let _ = message_tx.send(AppMessage::ProfilePostsLoaded(posts));
        });
    }

    pub fn save_profile(&mut self) {
        let Some(user_id) = self.user_id().map(str::to_string) else {
            return;
        };
        let today = self.today();
        let Some(edit) = self.profile_view.begin_save(today) else {
            return;
        };

        let store = self.backend.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match store.update_user_profile(&user_id, &edit.update).await {
                Ok(profile) => {
                    debug!(user_id, "Profile save finished");
                    AppMessage::ProfileSaved(profile)
                }
                Err(e) => {
                    error!(user_id, "Profile save failed: {}", e);
                    AppMessage::ProfileSaveFailed(e.user_message())
                }
            };
            let _ = message_tx.send(msg);
        });
    }
}

/// Read the image at `path` and turn it into a post image URL.
async fn store_image(
    functions: &crate::backend::FunctionsClient,
    mode: ImageMode,
    path: PathBuf,
) -> Result<String, String> {
    let image = tokio::task::spawn_blocking(move || ImageFile::read(&path))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;

    match mode {
        ImageMode::Inline => Ok(image.data_url()),
        ImageMode::Upload => functions
            .upload_image(&image.base64, &image.file_name, &image.content_type)
            .await
            .map_err(|e| e.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::{app_with, session, URL};
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use serde_json::json;

    async fn next_message(app: &mut App) -> AppMessage {
        let rx = app.message_rx.as_mut().unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_feed() {
        let http = Arc::new(MockHttpClient::new());
        http.set_default_response(MockResponse::Success(Response::new(500, bytes::Bytes::from_static(b"boom"))));
        let mut app = app_with(http);

        app.fetch_public_posts();
        assert!(app.posts_loading);
        match next_message(&mut app).await {
            AppMessage::PostsLoaded(posts) => assert!(posts.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_comment_sends_nothing() {
        let http = Arc::new(MockHttpClient::new());
        let mut app = app_with(http.clone());
        app.selected_post_id = Some("p1".to_string());
        app.detail.form.name.set_content("Ada".to_string());

        app.submit_comment();
        assert_eq!(
            app.detail.form.error.as_deref(),
            Some("All fields are required.")
        );
        tokio::task::yield_now().await;
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_double_save_sends_one_request() {
        let http = Arc::new(MockHttpClient::new());
        http.set_default_response(MockResponse::Success(Response::json_body(
            201,
            &json!({ "id": "p9", "title": "T" }),
        )));
        let mut app = app_with(http.clone());
        app.session = Some(session("u1"));
        app.editor.title.set_content("T".to_string());
        app.editor.content.set_content("Body".to_string());

        app.save_editor();
        app.save_editor();

        assert!(matches!(next_message(&mut app).await, AppMessage::PostSaved));
        let posts: Vec<_> = http
            .get_requests()
            .into_iter()
            .filter(|r| r.url.starts_with(&format!("{}/rest/v1/posts", URL)))
            .collect();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].method, "POST");
        assert_eq!(posts[0].json_body().unwrap()["author_id"], "u1");
    }

    #[tokio::test]
    async fn test_inline_image_mode_embeds_data_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"hi").unwrap();

        let http = Arc::new(MockHttpClient::new());
        let mut app = app_with(http.clone());
        app.config.backend.image_mode = ImageMode::Inline;
        app.editor
            .image_path
            .set_content(path.display().to_string());

        app.add_editor_image();
        match next_message(&mut app).await {
            AppMessage::ImageAdded(url) => assert_eq!(url, "data:image/png;base64,aGk="),
            other => panic!("unexpected {:?}", other),
        }
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_image_file_reports_failure() {
        let mut app = app_with(Arc::new(MockHttpClient::new()));
        app.editor
            .image_path
            .set_content("/definitely/not/here.png".to_string());

        app.add_editor_image();
        assert!(matches!(
            next_message(&mut app).await,
            AppMessage::ImageFailed(_)
        ));
    }
}
