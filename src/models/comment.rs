//! Reader comments stored in the `comments` table.

use serde::{Deserialize, Serialize};

use super::text_utils::contains_ignore_case;
use super::{deserialize_id, deserialize_nullable_bool, deserialize_nullable_string};

/// Post title joined into moderation listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentPost {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub post_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub author_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub author_email: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "deserialize_nullable_bool")]
    pub is_approved: bool,
    #[serde(default)]
    pub posts: Option<CommentPost>,
}

impl Comment {
    pub fn post_title(&self) -> Option<&str> {
        self.posts
            .as_ref()
            .map(|p| p.title.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Whether author name, email or content contain `query_lower`.
    pub fn matches_text(&self, query_lower: &str) -> bool {
        contains_ignore_case(&self.author_name, query_lower)
            || contains_ignore_case(&self.author_email, query_lower)
            || contains_ignore_case(&self.content, query_lower)
    }
}

/// Comment insert. Visitors cannot approve their own comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub post_id: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    is_approved: bool,
}

impl NewComment {
    pub fn new(post_id: &str, author_name: &str, author_email: &str, content: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            author_name: author_name.to_string(),
            author_email: author_email.to_string(),
            content: content.to_string(),
            is_approved: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentFilter {
    #[default]
    All,
    Pending,
    Approved,
}

impl CommentFilter {
    pub fn matches(&self, comment: &Comment) -> bool {
        match self {
            CommentFilter::All => true,
            CommentFilter::Pending => !comment.is_approved,
            CommentFilter::Approved => comment.is_approved,
        }
    }

    pub fn next(self) -> Self {
        match self {
            CommentFilter::All => CommentFilter::Pending,
            CommentFilter::Pending => CommentFilter::Approved,
            CommentFilter::Approved => CommentFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommentFilter::All => "All",
            CommentFilter::Pending => "Pending",
            CommentFilter::Approved => "Approved",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
}

impl CommentStats {
    pub fn from_comments(comments: &[Comment]) -> Self {
        let approved = comments.iter().filter(|c| c.is_approved).count();
        Self {
            total: comments.len(),
            pending: comments.len() - approved,
            approved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(approved: bool) -> Comment {
        Comment {
            id: "c".to_string(),
            author_name: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            content: "Great post".to_string(),
            is_approved: approved,
            ..Comment::default()
        }
    }

    #[test]
    fn test_new_comment_is_never_approved() {
        let json = serde_json::to_value(NewComment::new("p1", "A", "a@b.c", "hi")).unwrap();
        assert_eq!(json["is_approved"], false);
        assert_eq!(json["post_id"], "p1");
    }

    #[test]
    fn test_filter() {
        assert!(CommentFilter::Pending.matches(&comment(false)));
        assert!(!CommentFilter::Pending.matches(&comment(true)));
        assert!(CommentFilter::Approved.matches(&comment(true)));
        assert!(CommentFilter::All.matches(&comment(false)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let c = comment(false);
        assert!(c.matches_text("ada@"));
        assert!(c.matches_text("great"));
        assert!(!c.matches_text("terrible"));
    }

    #[test]
    fn test_stats() {
        let stats = CommentStats::from_comments(&[comment(true), comment(false), comment(false)]);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.approved, 1);
    }

    #[test]
    fn test_joined_post_title() {
        let json = r#"{"id": 1, "post_id": "p", "author_name": "a", "author_email": "e",
            "content": "c", "created_at": "2024-01-01", "is_approved": true,
            "posts": {"title": "Hello"}}"#;
        let c: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(c.post_title(), Some("Hello"));
        assert_eq!(c.id, "1");
    }
}
