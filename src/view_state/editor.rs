//! Post editor form.

use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::ScrollState;
use crate::models::text_utils::{reading_time, sanitize_file_name, slugify, truncate_chars};
use crate::models::{Post, PostDraft, PostType};
use crate::widgets::InputBox;

/// Characters of content used as the default excerpt.
const EXCERPT_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Content is required")]
    ContentRequired,
    #[error("News link is required")]
    NewsLinkRequired,
    #[error("At least one image is required for news")]
    ImageRequired,
    #[error("Enter the path of an image file")]
    NoImagePath,
    #[error("Could not read {path}: {message}")]
    ImageRead { path: String, message: String },
}

/// Focusable editor fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Title,
    NewsLink,
    Excerpt,
    Content,
    ImagePath,
}

/// A local image read for upload or inlining.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub base64: String,
}

impl ImageFile {
    /// Read and encode the file at `path`.
    pub fn read(path: &Path) -> Result<Self, EditorError> {
        let bytes = std::fs::read(path).map_err(|e| EditorError::ImageRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self {
            file_name: sanitize_file_name(&name),
            content_type: content_type_for(path).to_string(),
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        })
    }

    /// `data:` URL embedding the image.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.base64)
    }
}

/// MIME type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Id of the post being edited; `None` creates a new post
    pub editing_id: Option<String>,
    existing_slug: String,
    is_hidden: bool,
    pub title: InputBox,
    pub content: InputBox,
    pub news_link: InputBox,
    pub excerpt: InputBox,
    pub image_path: InputBox,
    pub images: Vec<String>,
    pub selected_image: usize,
    pub post_type: PostType,
    pub focus: EditorField,
    pub preview: bool,
    pub preview_scroll: ScrollState,
    pub saving: bool,
    pub uploading: bool,
    pub error: Option<String>,
}

impl EditorState {
    /// Empty form for a new post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from `post`.
    pub fn from_post(post: &Post) -> Self {
        Self {
            editing_id: Some(post.id.clone()),
            existing_slug: post.slug.clone(),
            is_hidden: post.is_hidden,
            title: InputBox::with_content(post.title.clone()),
            content: InputBox::with_content(post.content.clone()),
            news_link: InputBox::with_content(post.news_link.clone().unwrap_or_default()),
            excerpt: InputBox::with_content(post.excerpt.clone()),
            images: post.images.clone(),
            post_type: post.post_type,
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn is_news(&self) -> bool {
        self.post_type == PostType::News
    }

    /// Minutes to read; news items are always one minute.
    pub fn reading_time(&self) -> u32 {
        match self.post_type {
            PostType::Article => reading_time(self.content.get_content()),
            PostType::News => 1,
        }
    }

    fn fields(&self) -> Vec<EditorField> {
        let mut fields = vec![EditorField::Title];
        if self.is_news() {
            fields.push(EditorField::NewsLink);
        }
        fields.extend([EditorField::Excerpt, EditorField::Content, EditorField::ImagePath]);
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(at + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(at + fields.len() - 1) % fields.len()];
    }

    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            EditorField::Title => &mut self.title,
            EditorField::NewsLink => &mut self.news_link,
            EditorField::Excerpt => &mut self.excerpt,
            EditorField::Content => &mut self.content,
            EditorField::ImagePath => &mut self.image_path,
        }
    }

    pub fn toggle_type(&mut self) {
        self.post_type = self.post_type.toggled();
        if !self.fields().contains(&self.focus) {
            self.focus = EditorField::Title;
        }
    }

    pub fn toggle_preview(&mut self) {
        self.preview = !self.preview;
        self.preview_scroll.to_top();
    }

    /// Check required fields in order, returning the first failure.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.title.trimmed().is_empty() {
            return Err(EditorError::TitleRequired);
        }
        match self.post_type {
            PostType::Article => {
                if self.content.trimmed().is_empty() {
                    return Err(EditorError::ContentRequired);
                }
            }
            PostType::News => {
                if self.news_link.trimmed().is_empty() {
                    return Err(EditorError::NewsLinkRequired);
                }
                if self.images.is_empty() {
                    return Err(EditorError::ImageRequired);
                }
            }
        }
        Ok(())
    }

    /// Row to write for the current form.
    pub fn to_draft(&self, author_id: Option<&str>) -> PostDraft {
        let title = self.title.trimmed().to_string();
        let content = self.content.trimmed().to_string();
        let news_link = match self.post_type {
            PostType::News => Some(self.news_link.trimmed().to_string()).filter(|l| !l.is_empty()),
            PostType::Article => None,
        };
        let excerpt = match self.excerpt.trimmed() {
            "" => match &news_link {
                Some(link) => link.clone(),
                None => truncate_chars(&content, EXCERPT_CHARS),
            },
            given => given.to_string(),
        };
        let slug = if self.existing_slug.is_empty() {
            slugify(&title)
        } else {
            self.existing_slug.clone()
        };

        PostDraft {
            reading_time: self.reading_time(),
            slug,
            title,
            content,
            news_link,
            post_type: self.post_type,
            images: self.images.clone(),
            excerpt,
            is_hidden: self.is_hidden,
            author_id: author_id.map(str::to_string),
        }
    }

    /// Start saving.
    ///
    /// Returns the draft to write, or `None` when a save is already running
    /// or validation failed (the message is left in `error`).
    pub fn begin_save(&mut self, author_id: Option<&str>) -> Option<PostDraft> {
        if self.saving {
            return None;
        }
        if let Err(err) = self.validate() {
            self.error = Some(err.to_string());
            return None;
        }
        self.saving = true;
        self.error = None;
        Some(self.to_draft(author_id))
    }

    pub fn save_failed(&mut self, message: &str) {
        self.saving = false;
        self.error = Some(format!("Failed to save: {}", message));
    }

    /// Start adding the image named in the path field.
    pub fn begin_image(&mut self) -> Option<PathBuf> {
        if self.uploading {
            return None;
        }
        let path = self.image_path.trimmed();
        if path.is_empty() {
            self.error = Some(EditorError::NoImagePath.to_string());
            return None;
        }
        let path = expand_home(path);
        self.uploading = true;
        self.error = None;
        Some(path)
    }

    pub fn image_added(&mut self, url: String) {
        self.uploading = false;
        self.images.push(url);
        self.selected_image = self.images.len() - 1;
        self.image_path.clear();
    }

    pub fn image_failed(&mut self, message: &str) {
        self.uploading = false;
        self.error = Some(format!("Failed to upload images: {}", message));
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
            self.selected_image = self.selected_image.min(self.images.len().saturating_sub(1));
        }
    }

    pub fn cycle_image(&mut self) {
        if !self.images.is_empty() {
            self.selected_image = (self.selected_image + 1) % self.images.len();
        }
    }
}

/// Resolve a leading `~/` against the home directory.
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn article(title: &str, content: &str) -> EditorState {
        let mut editor = EditorState::new();
        editor.title.set_content(title.to_string());
        editor.content.set_content(content.to_string());
        editor
    }

    #[test]
    fn test_validation_order() {
        let mut editor = EditorState::new();
        assert_eq!(editor.validate(), Err(EditorError::TitleRequired));

        editor.title.set_content("  T  ".to_string());
        assert_eq!(editor.validate(), Err(EditorError::ContentRequired));

        editor.toggle_type();
        assert_eq!(editor.validate(), Err(EditorError::NewsLinkRequired));

        editor.news_link.set_content("https://news.example/a".to_string());
        assert_eq!(editor.validate(), Err(EditorError::ImageRequired));

        editor.images.push("https://cdn/x.png".to_string());
        assert_eq!(editor.validate(), Ok(()));
    }

    #[test]
    fn test_whitespace_title_is_missing() {
        let editor = article("   ", "body");
        assert_eq!(
            editor.validate().unwrap_err().to_string(),
            "Title is required"
        );
    }

    #[test]
    fn test_reading_time() {
        let words = vec!["word"; 401].join(" ");
        let mut editor = article("T", &words);
        assert_eq!(editor.reading_time(), 3);

        editor.content.set_content(String::new());
        assert_eq!(editor.reading_time(), 1);

        editor.content.set_content(words);
        editor.toggle_type();
        assert_eq!(editor.reading_time(), 1);
    }

    #[test]
    fn test_draft_defaults() {
        let long = "x".repeat(300);
        let draft = article("  Hello, World!  ", &long).to_draft(Some("u1"));
        assert_eq!(draft.title, "Hello, World!");
        assert_eq!(draft.excerpt.chars().count(), 160);
        assert_eq!(draft.slug, "hello-world");
        assert_eq!(draft.news_link, None);
        assert_eq!(draft.author_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_news_excerpt_defaults_to_link() {
        let mut editor = article("Headline", "");
        editor.toggle_type();
        editor.news_link.set_content("https://news.example/a".to_string());
        let draft = editor.to_draft(None);
        assert_eq!(draft.excerpt, "https://news.example/a");
        assert_eq!(draft.news_link.as_deref(), Some("https://news.example/a"));
        assert_eq!(draft.reading_time, 1);
    }

    #[test]
    fn test_editing_keeps_slug() {
        let post = Post {
            id: "p1".to_string(),
            title: "Old".to_string(),
            content: "Body".to_string(),
            slug: "old".to_string(),
            ..Post::default()
        };
        let mut editor = EditorState::from_post(&post);
        editor.title.set_content("New title".to_string());
        assert_eq!(editor.to_draft(None).slug, "old");
        assert!(editor.is_editing());
    }

    #[test]
    fn test_second_save_is_ignored() {
        let mut editor = article("T", "Body");
        assert!(editor.begin_save(None).is_some());
        assert!(editor.begin_save(None).is_none());

        editor.save_failed("network down");
        assert!(!editor.saving);
        assert_eq!(editor.error.as_deref(), Some("Failed to save: network down"));
    }

    #[test]
    fn test_failed_validation_sets_error() {
        let mut editor = EditorState::new();
        assert!(editor.begin_save(None).is_none());
        assert!(!editor.saving);
        assert_eq!(editor.error.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_focus_skips_news_link_for_articles() {
        let mut editor = EditorState::new();
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::Excerpt);

        editor.toggle_type();
        editor.focus = EditorField::Title;
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::NewsLink);

        editor.toggle_type();
        assert_eq!(editor.focus, EditorField::Title);
    }

    #[test]
    fn test_remove_image() {
        let mut editor = EditorState::new();
        editor.image_added("a".to_string());
        editor.image_added("b".to_string());
        editor.remove_image(1);
        assert_eq!(editor.images, vec!["a".to_string()]);
        assert_eq!(editor.selected_image, 0);
        editor.remove_image(5);
        assert_eq!(editor.images.len(), 1);
    }

    #[test]
    fn test_read_image_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("my photo (1).PNG");
        std::fs::write(&path, b"hi").unwrap();

        let image = ImageFile::read(&path).unwrap();
        assert_eq!(image.file_name, "my_photo__1_.PNG");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.base64, "aGk=");
        assert_eq!(image.data_url(), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_read_missing_image() {
        let err = ImageFile::read(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, EditorError::ImageRead { .. }));
    }
}
