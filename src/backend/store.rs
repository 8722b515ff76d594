//! The blog's tables.

use serde::Serialize;

use super::rest::{ilike_filter, Query, RestClient};
use crate::error::{ErrorContext, QuireError, QuireResult, ResultExt};
use crate::models::{
    Comment, NewComment, NewProfile, Post, PostDraft, PostUpdate, Profile, ProfileUpdate,
};

const POSTS: &str = "posts";
const USERS: &str = "users";
const COMMENTS: &str = "comments";

/// Post columns plus the author projection.
const POST_COLUMNS: &str = "*, users(name, email, avatar_url)";

/// Constraint the store reports when an email already has a profile.
const USERS_EMAIL_KEY: &str = "users_email_key";

#[derive(Serialize)]
struct ProfileInsert<'a> {
    id: &'a str,
    #[serde(flatten)]
    update: &'a ProfileUpdate,
}

#[derive(Serialize)]
struct AdminFlag {
    is_admin: bool,
}

/// Typed operations on `posts`, `users` and `comments`.
#[derive(Clone)]
pub struct BlogStore {
    rest: RestClient,
}

impl BlogStore {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn posts() -> Query {
        Query::table(POSTS).select(POST_COLUMNS)
    }

    // ---- posts ----------------------------------------------------------

    /// Visible posts, newest first.
    pub async fn fetch_posts(&self) -> QuireResult<Vec<Post>> {
        let query = Self::posts()
            .eq("is_hidden", false)
            .order("created_at", false);
        self.rest
            .select(&query)
            .await
            .context(ErrorContext::new("fetch_posts").with_resource(POSTS))
    }

    pub async fn fetch_post_by_id(&self, id: &str) -> QuireResult<Post> {
        let query = Self::posts().eq("id", id);
        self.rest.select_single(&query).await.context(
            ErrorContext::new("fetch_post_by_id")
                .with_resource(POSTS)
                .with_record_id(id),
        )
    }

    /// A visible post by slug.
    pub async fn fetch_post_by_slug(&self, slug: &str) -> QuireResult<Post> {
        let query = Self::posts().eq("slug", slug).eq("is_hidden", false);
        self.rest.select_single(&query).await.context(
            ErrorContext::new("fetch_post_by_slug")
                .with_resource(POSTS)
                .with_record_id(slug),
        )
    }

    pub async fn create_post(&self, draft: &PostDraft) -> QuireResult<Post> {
        let post: Post = self
            .rest
            .insert_single(POSTS, draft)
            .await
            .context(ErrorContext::new("create_post").with_resource(POSTS))?;
        tracing::info!(post_id = %post.id, "Created post");
        Ok(post)
    }

    /// Apply `update` and stamp `updated_at`.
    pub async fn update_post(&self, id: &str, update: PostUpdate) -> QuireResult<Post> {
        let update = PostUpdate {
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..update
        };
        let post: Post = self
            .rest
            .update_single(&Query::table(POSTS).eq("id", id), &update)
            .await
            .context(
                ErrorContext::new("update_post")
                    .with_resource(POSTS)
                    .with_record_id(id),
            )?;
        tracing::info!(post_id = %id, "Updated post");
        Ok(post)
    }

    pub async fn delete_post(&self, id: &str) -> QuireResult<()> {
        self.rest
            .delete(&Query::table(POSTS).eq("id", id))
            .await
            .context(
                ErrorContext::new("delete_post")
                    .with_resource(POSTS)
                    .with_record_id(id),
            )?;
        tracing::info!(post_id = %id, "Deleted post");
        Ok(())
    }

    pub async fn toggle_post_visibility(&self, id: &str, is_hidden: bool) -> QuireResult<Post> {
        self.update_post(id, PostUpdate::visibility(is_hidden)).await
    }

    /// Every post, hidden ones included, newest first.
    pub async fn fetch_all_posts(&self) -> QuireResult<Vec<Post>> {
        let query = Self::posts().order("created_at", false);
        self.rest
            .select(&query)
            .await
            .context(ErrorContext::new("fetch_all_posts").with_resource(POSTS))
    }

    /// Visible posts whose title, content or excerpt contain `text`.
    pub async fn search_posts(&self, text: &str) -> QuireResult<Vec<Post>> {
        let query = Self::posts()
            .eq("is_hidden", false)
            .or(&[
                ilike_filter("title", text),
                ilike_filter("content", text),
                ilike_filter("excerpt", text),
            ])
            .order("created_at", false);
        self.rest
            .select(&query)
            .await
            .context(ErrorContext::new("search_posts").with_resource(POSTS))
    }

    /// All of one author's posts, hidden included, newest first.
    pub async fn fetch_posts_by_author(&self, author_id: &str) -> QuireResult<Vec<Post>> {
        let query = Self::posts()
            .eq("author_id", author_id)
            .order("created_at", false);
        self.rest.select(&query).await.context(
            ErrorContext::new("fetch_posts_by_author")
                .with_resource(POSTS)
                .with_record_id(author_id),
        )
    }

    // ---- users ----------------------------------------------------------

    /// Insert a profile for a new identity.
    ///
    /// If the email already has a profile the existing row is returned.
    pub async fn create_user(
        &self,
        id: &str,
        email: &str,
        name: Option<&str>,
    ) -> QuireResult<Profile> {
        let row = NewProfile::new(id, email, name);
        match self.rest.insert_single::<Profile, _>(USERS, &row).await {
            Ok(profile) => {
                tracing::info!(user_id = %id, "Created profile");
                Ok(profile)
            }
            Err(err) if violates(&err, USERS_EMAIL_KEY) => {
                tracing::info!(user_id = %id, "Profile already exists for email, reusing it");
                self.fetch_user_by_email(email).await
            }
            Err(err) => Err(err.with_context(
                ErrorContext::new("create_user")
                    .with_resource(USERS)
                    .with_record_id(id),
            )),
        }
    }

    pub async fn fetch_user(&self, id: &str) -> QuireResult<Profile> {
        self.rest
            .select_single(&Query::table(USERS).select("*").eq("id", id))
            .await
            .context(
                ErrorContext::new("fetch_user")
                    .with_resource(USERS)
                    .with_record_id(id),
            )
    }

    pub async fn fetch_user_by_email(&self, email: &str) -> QuireResult<Profile> {
        self.rest
            .select_single(&Query::table(USERS).select("*").eq("email", email))
            .await
            .context(ErrorContext::new("fetch_user_by_email").with_resource(USERS))
    }

    /// Save profile fields, whichever way the row can be found.
    ///
    /// Tries the row keyed by `id`, then the row with `update.email`, then
    /// inserts a new row with `id`.
    pub async fn update_user_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> QuireResult<Profile> {
        match self
            .rest
            .update_single::<Profile, _>(&Query::table(USERS).eq("id", id), update)
            .await
        {
            Ok(profile) => return Ok(profile),
            Err(err) => tracing::debug!(user_id = %id, "Profile update by id missed: {}", err),
        }

        if let Some(email) = update.email.as_deref() {
            let by_email = Query::table(USERS).eq("email", email);
            let existing: Option<Profile> = self
                .rest
                .select_optional(&by_email.clone().select("*"))
                .await
                .context(ErrorContext::new("update_user_profile.lookup_by_email").with_resource(USERS))?;

            if existing.is_some() {
                return self
                    .rest
                    .update_single(&by_email, update)
                    .await
                    .context(
                        ErrorContext::new("update_user_profile.update_by_email")
                            .with_resource(USERS),
                    );
            }
        }

        let row = ProfileInsert { id, update };
        let profile = self
            .rest
            .insert_single(USERS, &row)
            .await
            .context(
                ErrorContext::new("update_user_profile.insert")
                    .with_resource(USERS)
                    .with_record_id(id),
            )?;
        tracing::info!(user_id = %id, "Inserted missing profile");
        Ok(profile)
    }

    pub async fn update_user_admin_by_email(
        &self,
        email: &str,
        is_admin: bool,
    ) -> QuireResult<Profile> {
        self.rest
            .update_single(
                &Query::table(USERS).eq("email", email),
                &AdminFlag { is_admin },
            )
            .await
            .context(ErrorContext::new("update_user_admin_by_email").with_resource(USERS))
    }

    /// Remove the profile row. The auth identity itself is untouched.
    pub async fn delete_user_account(&self, id: &str) -> QuireResult<()> {
        self.rest
            .delete(&Query::table(USERS).eq("id", id))
            .await
            .context(
                ErrorContext::new("delete_user_account")
                    .with_resource(USERS)
                    .with_record_id(id),
            )
    }

    // ---- comments -------------------------------------------------------

    /// Comments on a post, newest first.
    pub async fn fetch_comments(&self, post_id: &str) -> QuireResult<Vec<Comment>> {
        let query = Query::table(COMMENTS)
            .select("*")
            .eq("post_id", post_id)
            .order("created_at", false);
        self.rest.select(&query).await.context(
            ErrorContext::new("fetch_comments")
                .with_resource(COMMENTS)
                .with_record_id(post_id),
        )
    }

    /// Insert an unapproved comment.
    pub async fn submit_comment(
        &self,
        post_id: &str,
        author_name: &str,
        author_email: &str,
        content: &str,
    ) -> QuireResult<Comment> {
        let row = NewComment::new(post_id, author_name, author_email, content);
        let comment: Comment = self
            .rest
            .insert_single(COMMENTS, &row)
            .await
            .context(
                ErrorContext::new("submit_comment")
                    .with_resource(COMMENTS)
                    .with_record_id(post_id),
            )?;
        tracing::info!(post_id, comment_id = %comment.id, "Submitted comment");
        Ok(comment)
    }
}

fn violates(err: &QuireError, constraint: &str) -> bool {
    matches!(err.inner(), QuireError::Store(store) if store.violates(constraint))
}
