//! Authentication errors.

use std::fmt;

/// Errors produced by the auth provider or by auth-gated operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// An operation needed a signed-in user and there was none.
    NotAuthenticated,

    /// Email/password rejected by the provider.
    InvalidCredentials { message: String },

    /// The stored session expired and could not be refreshed.
    SessionExpired,

    /// The provider rejected the request (rate limit, weak password, ...).
    Rejected { status: u16, message: String },
}

impl AuthError {
    /// Whether signing in again resolves the error.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AuthError::NotAuthenticated | AuthError::SessionExpired)
    }

    /// Get a user-friendly error message.
    ///
    /// Provider messages are shown verbatim since they are already written
    /// for end users ("Invalid login credentials").
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotAuthenticated => "Please sign in to continue.".to_string(),
            AuthError::InvalidCredentials { message } => message.clone(),
            AuthError::SessionExpired => "Your session expired. Please sign in again.".to_string(),
            AuthError::Rejected { message, .. } => message.clone(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "E_AUTH_NONE",
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
            AuthError::Rejected { .. } => "E_AUTH_REJECTED",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::InvalidCredentials { message } => {
                write!(f, "Invalid credentials: {}", message)
            }
            AuthError::SessionExpired => write!(f, "Session expired"),
            AuthError::Rejected { status, message } => {
                write!(f, "Auth request rejected ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_reauth() {
        assert!(AuthError::NotAuthenticated.requires_reauth());
        assert!(AuthError::SessionExpired.requires_reauth());
        assert!(!AuthError::InvalidCredentials {
            message: "nope".to_string()
        }
        .requires_reauth());
    }

    #[test]
    fn test_provider_message_passthrough() {
        let err = AuthError::InvalidCredentials {
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid login credentials");
    }
}
