//! Context attached to errors as they cross module boundaries.

use std::fmt;

use chrono::{DateTime, Utc};

/// Where and when an error happened.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// The operation that failed, e.g. `fetch_posts`.
    pub operation: String,

    /// Table or function the operation targeted.
    pub resource: Option<String>,

    /// Identifier of the record involved, if any.
    pub record_id: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            record_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation={}", self.operation)?;
        if let Some(ref resource) = self.resource {
            write!(f, " resource={}", resource)?;
        }
        if let Some(ref id) = self.record_id {
            write!(f, " id={}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_set_fields() {
        let ctx = ErrorContext::new("delete_post")
            .with_resource("posts")
            .with_record_id("p-1");
        assert_eq!(ctx.to_string(), "operation=delete_post resource=posts id=p-1");
    }

    #[test]
    fn test_display_minimal() {
        assert_eq!(ErrorContext::new("fetch_posts").to_string(), "operation=fetch_posts");
    }
}
