//! Error category classification.
//!
//! Categories decide how a failure is presented inline in a view and whether
//! the user can simply try the same action again.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout problems talking to the backend.
    Network,

    /// Missing or rejected session.
    Auth,

    /// The hosted backend answered with an error (5xx, function error).
    Server,

    /// Malformed responses or programming errors.
    Client,

    /// The user must change something (input, permissions).
    User,

    /// Filesystem and OS errors.
    System,

    /// Missing or invalid connection settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if trying the same action again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested next step shown under inline error text.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and try again",
            ErrorCategory::Auth => "Sign in again and retry",
            ErrorCategory::Server => "The blog backend had a problem. Try again later",
            ErrorCategory::Client => "Unexpected response from the backend",
            ErrorCategory::User => "Check your input and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => {
                "Set QUIRE_SUPABASE_URL and QUIRE_SUPABASE_ANON_KEY"
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }

    #[test]
    fn test_configuration_hint_names_variables() {
        assert!(ErrorCategory::Configuration
            .recovery_hint()
            .contains("QUIRE_SUPABASE_URL"));
    }
}
