//! Post detail page: scroll position, comments and the comment form.

use thiserror::Error;

use super::ScrollState;
use crate::models::Comment;
use crate::widgets::InputBox;

pub const COMMENT_SUBMITTED: &str = "Your comment has been submitted!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentFormError {
    #[error("All fields are required.")]
    MissingFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentField {
    #[default]
    Name,
    Email,
    Content,
}

impl CommentField {
    pub fn next(self) -> Self {
        match self {
            CommentField::Name => CommentField::Email,
            CommentField::Email => CommentField::Content,
            CommentField::Content => CommentField::Name,
        }
    }
}

/// Trimmed comment fields ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSubmission {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub name: InputBox,
    pub email: InputBox,
    pub content: InputBox,
    pub focus: CommentField,
    pub submitting: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl CommentForm {
    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            CommentField::Name => &mut self.name,
            CommentField::Email => &mut self.email,
            CommentField::Content => &mut self.content,
        }
    }

    pub fn validate(&self) -> Result<CommentSubmission, CommentFormError> {
        let (name, email, content) = (
            self.name.trimmed(),
            self.email.trimmed(),
            self.content.trimmed(),
        );
        if name.is_empty() || email.is_empty() || content.is_empty() {
            return Err(CommentFormError::MissingFields);
        }
        Ok(CommentSubmission {
            author_name: name.to_string(),
            author_email: email.to_string(),
            content: content.to_string(),
        })
    }

    /// Start submitting. `None` while a submission is running or when a
    /// field is empty (the message is left in `error`).
    pub fn begin_submit(&mut self) -> Option<CommentSubmission> {
        if self.submitting {
            return None;
        }
        self.success = None;
        match self.validate() {
            Ok(submission) => {
                self.submitting = true;
                self.error = None;
                Some(submission)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn submitted(&mut self) {
        self.submitting = false;
        self.name.clear();
        self.email.clear();
        self.content.clear();
        self.focus = CommentField::Name;
        self.success = Some(COMMENT_SUBMITTED.to_string());
    }

    pub fn submit_failed(&mut self, message: &str) {
        self.submitting = false;
        self.error = Some(format!("Failed to submit comment: {}", message));
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub scroll: ScrollState,
    pub comments: Vec<Comment>,
    pub loading_comments: bool,
    /// Keys go to the comment form while true
    pub composing: bool,
    pub form: CommentForm,
    /// Transient status line (copied link, opened browser)
    pub notice: Option<String>,
}

impl DetailState {
    pub fn new() -> Self {
        Self {
            loading_comments: true,
            ..Self::default()
        }
    }

    /// Comments visible to readers.
    pub fn approved_comments(&self) -> Vec<&Comment> {
        self.comments.iter().filter(|c| c.is_approved).collect()
    }

    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
        self.loading_comments = false;
    }
}
