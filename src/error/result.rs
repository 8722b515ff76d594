//! Result type alias for quire operations.

use super::context::ErrorContext;
use super::quire_error::QuireError;

/// Type alias for Results using QuireError.
pub type QuireResult<T> = Result<T, QuireError>;

/// Extension trait for attaching context to errors.
///
/// ```ignore
/// use quire::error::{ErrorContext, ResultExt};
///
/// let posts = store
///     .fetch_posts()
///     .await
///     .context(ErrorContext::new("fetch_posts").with_resource("posts"))?;
/// ```
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> QuireResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> QuireResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<QuireError>,
{
    fn context(self, ctx: ErrorContext) -> QuireResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> QuireResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
