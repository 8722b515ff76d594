//! Blog posts as stored in the `posts` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::text_utils::{contains_ignore_case, email_local_part, parse_timestamp, truncate_chars};
use super::{
    deserialize_id, deserialize_nullable_bool, deserialize_nullable_default,
    deserialize_nullable_string, deserialize_nullable_u32, deserialize_nullable_vec,
};

/// Characters of content used as a card preview when no excerpt exists.
const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Article,
    News,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Article => "article",
            PostType::News => "news",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PostType::Article => PostType::News,
            PostType::News => PostType::Article,
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Author fields joined from `users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    #[serde(default)]
    pub news_link: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_nullable_default")]
    pub post_type: PostType,
    /// Image URLs in display order; the first is the cover.
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_bool")]
    pub is_hidden: bool,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub users: Option<PostAuthor>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub slug: String,
    /// Estimated minutes to read.
    #[serde(default, deserialize_with = "deserialize_nullable_u32")]
    pub reading_time: u32,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub excerpt: String,
}

impl Post {
    pub fn is_news(&self) -> bool {
        self.post_type == PostType::News
    }

    /// Non-empty external link of a news item.
    pub fn link(&self) -> Option<&str> {
        self.news_link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Name shown as the publisher.
    pub fn publisher_name(&self) -> String {
        let author = self.users.as_ref();
        author
            .and_then(|u| u.name.as_deref())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| {
                author
                    .and_then(|u| u.email.as_deref())
                    .filter(|e| !e.is_empty())
                    .map(|e| email_local_part(e).to_string())
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Text shown on a feed card.
    pub fn preview_text(&self) -> String {
        if !self.excerpt.is_empty() {
            return self.excerpt.clone();
        }
        if self.is_news() {
            return self
                .link()
                .unwrap_or("External news link")
                .to_string();
        }
        truncate_chars(&self.content, PREVIEW_CHARS)
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Whether title, content or excerpt contain `query_lower`.
    pub fn matches_text(&self, query_lower: &str) -> bool {
        contains_ignore_case(&self.title, query_lower)
            || contains_ignore_case(&self.content, query_lower)
            || contains_ignore_case(&self.excerpt, query_lower)
    }
}

/// Which posts the feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    Article,
    News,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Article => post.post_type == PostType::Article,
            PostFilter::News => post.post_type == PostType::News,
        }
    }

    /// Cycle all → article → news → all.
    pub fn next(self) -> Self {
        match self {
            PostFilter::All => PostFilter::Article,
            PostFilter::Article => PostFilter::News,
            PostFilter::News => PostFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostFilter::All => "All",
            PostFilter::Article => "Articles",
            PostFilter::News => "News",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
        }
    }

    /// Sort by creation time. Unparseable timestamps sort as oldest.
    pub fn sort(&self, posts: &mut [Post]) {
        posts.sort_by_key(|p| p.created());
        if *self == SortOrder::Newest {
            posts.reverse();
        }
    }
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub total: usize,
    pub articles: usize,
    pub news: usize,
    pub hidden: usize,
}

impl PostStats {
    pub fn from_posts(posts: &[Post]) -> Self {
        posts.iter().fold(Self::default(), |mut stats, post| {
            stats.total += 1;
            match post.post_type {
                PostType::Article => stats.articles += 1,
                PostType::News => stats.news += 1,
            }
            if post.is_hidden {
                stats.hidden += 1;
            }
            stats
        })
    }
}

/// Fields written when a post is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub news_link: Option<String>,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub images: Vec<String>,
    pub excerpt: String,
    pub reading_time: u32,
    pub slug: String,
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

/// Partial update of a post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// `Some(None)` clears the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_link: Option<Option<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    /// Set by the store on every update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PostUpdate {
    pub fn visibility(is_hidden: bool) -> Self {
        Self {
            is_hidden: Some(is_hidden),
            ..Self::default()
        }
    }
}

impl From<PostDraft> for PostUpdate {
    /// Everything but the author and visibility, which edits never change.
    fn from(draft: PostDraft) -> Self {
        Self {
            title: Some(draft.title),
            content: Some(draft.content),
            news_link: Some(draft.news_link),
            post_type: Some(draft.post_type),
            images: Some(draft.images),
            excerpt: Some(draft.excerpt),
            reading_time: Some(draft.reading_time),
            slug: Some(draft.slug),
            is_hidden: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, post_type: PostType, created_at: &str) -> Post {
        Post {
            id: id.to_string(),
            post_type,
            created_at: created_at.to_string(),
            ..Post::default()
        }
    }

    #[test]
    fn test_deserialize_row_with_join() {
        let json = r#"{
            "id": "7f1c",
            "created_at": "2024-05-01 10:00:00",
            "updated_at": "2024-05-01T10:00:00+00:00",
            "title": "Hello",
            "content": "Body",
            "news_link": null,
            "type": "news",
            "images": null,
            "is_hidden": false,
            "author_id": "u1",
            "users": {"name": null, "email": "ada@example.com", "avatar_url": null},
            "slug": "hello",
            "reading_time": null,
            "excerpt": null
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_type, PostType::News);
        assert!(post.images.is_empty());
        assert_eq!(post.reading_time, 0);
        assert_eq!(post.excerpt, "");
        assert_eq!(post.publisher_name(), "ada");
        assert!(post.created().is_some());
    }

    #[test]
    fn test_null_type_reads_as_article() {
        let rows: Vec<Post> = serde_json::from_str(
            r#"[{"id": "p1", "title": "A", "content": "x", "type": null},
                {"id": "p2", "title": "B", "content": "y", "type": "news"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].post_type, PostType::Article);
        assert_eq!(rows[1].post_type, PostType::News);
    }

    #[test]
    fn test_publisher_name_fallbacks() {
        let mut p = Post::default();
        assert_eq!(p.publisher_name(), "Unknown");

        p.users = Some(PostAuthor {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            avatar_url: None,
        });
        assert_eq!(p.publisher_name(), "Ada Lovelace");
    }

    #[test]
    fn test_preview_text() {
        let mut p = Post {
            content: "x".repeat(300),
            ..Post::default()
        };
        assert_eq!(p.preview_text().len(), 200);

        p.post_type = PostType::News;
        assert_eq!(p.preview_text(), "External news link");

        p.news_link = Some("https://news.example.com/a".to_string());
        assert_eq!(p.preview_text(), "https://news.example.com/a");

        p.excerpt = "Summary".to_string();
        assert_eq!(p.preview_text(), "Summary");
    }

    #[test]
    fn test_filter_and_sort() {
        let mut posts = vec![
            post("a", PostType::Article, "2024-01-01T00:00:00Z"),
            post("b", PostType::News, "2024-03-01 00:00:00"),
            post("c", PostType::Article, "2024-02-01T00:00:00Z"),
        ];

        let news: Vec<_> = posts.iter().filter(|p| PostFilter::News.matches(p)).collect();
        assert_eq!(news.len(), 1);

        SortOrder::Newest.sort(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        SortOrder::Oldest.sort(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_stats() {
        let mut hidden = post("h", PostType::News, "");
        hidden.is_hidden = true;
        let stats = PostStats::from_posts(&[post("a", PostType::Article, ""), hidden]);
        assert_eq!(
            stats,
            PostStats {
                total: 2,
                articles: 1,
                news: 1,
                hidden: 1
            }
        );
    }

    #[test]
    fn test_visibility_update_serializes_one_field() {
        let json = serde_json::to_value(PostUpdate::visibility(true)).unwrap();
        assert_eq!(json, serde_json::json!({"is_hidden": true}));
    }

    #[test]
    fn test_update_from_draft_clears_link() {
        let draft = PostDraft {
            title: "T".to_string(),
            content: "C".to_string(),
            news_link: None,
            post_type: PostType::Article,
            images: vec![],
            excerpt: "C".to_string(),
            reading_time: 1,
            slug: "t".to_string(),
            is_hidden: false,
            author_id: Some("u1".to_string()),
        };
        let json = serde_json::to_value(PostUpdate::from(draft)).unwrap();
        assert_eq!(json["news_link"], serde_json::Value::Null);
        assert!(json.get("author_id").is_none());
        assert!(json.get("is_hidden").is_none());
        assert_eq!(json["type"], "article");
    }
}
