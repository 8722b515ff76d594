//! Unified error type for quire.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::store::StoreError;
use super::system::SystemError;

/// Every failure a backend call or local operation can surface.
///
/// Views never match on the inner variants for display; they show
/// [`QuireError::user_message`] inline and log the full error.
#[derive(Debug)]
pub enum QuireError {
    Network(NetworkError),
    Auth(AuthError),
    Store(StoreError),
    Config(ConfigError),
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<QuireError>,
        context: ErrorContext,
    },
}

impl QuireError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuireError::Network(NetworkError::HttpStatus { status, .. }) if *status < 500 => {
                if *status == 401 {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::User
                }
            }
            QuireError::Network(_) => ErrorCategory::Network,
            QuireError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::User
                }
            }
            QuireError::Store(err) => match err {
                StoreError::NotFound { .. } => ErrorCategory::User,
                StoreError::Api { status, .. } if *status >= 500 => ErrorCategory::Server,
                StoreError::Api { status: 401, .. } => ErrorCategory::Auth,
                StoreError::Api { .. } => ErrorCategory::User,
                StoreError::Function { .. } => ErrorCategory::Server,
                StoreError::Decode { .. } => ErrorCategory::Client,
            },
            QuireError::Config(_) => ErrorCategory::Configuration,
            QuireError::System(_) => ErrorCategory::System,
            QuireError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            QuireError::Network(err) => err.is_retryable(),
            QuireError::Auth(_) | QuireError::Config(_) => false,
            QuireError::Store(err) => err.is_retryable(),
            QuireError::System(err) => err.is_transient(),
            QuireError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            QuireError::Network(err) => err.user_message(),
            QuireError::Auth(err) => err.user_message(),
            QuireError::Store(err) => err.user_message(),
            QuireError::Config(err) => err.to_string(),
            QuireError::System(err) => err.user_message(),
            QuireError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            QuireError::Network(err) => err.error_code(),
            QuireError::Auth(err) => err.error_code(),
            QuireError::Store(err) => err.error_code(),
            QuireError::Config(err) => err.error_code(),
            QuireError::System(err) => err.error_code(),
            QuireError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        QuireError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            QuireError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &QuireError {
        match self {
            QuireError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Whether the store reported that no row matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self.inner(), QuireError::Store(err) if err.is_not_found())
    }

    /// Check if this error requires re-authentication.
    pub fn requires_reauth(&self) -> bool {
        match self.inner() {
            QuireError::Auth(err) => err.requires_reauth(),
            QuireError::Network(NetworkError::HttpStatus { status: 401, .. }) => true,
            QuireError::Store(StoreError::Api { status: 401, .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for QuireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuireError::Network(err) => write!(f, "{}", err),
            QuireError::Auth(err) => write!(f, "{}", err),
            QuireError::Store(err) => write!(f, "{}", err),
            QuireError::Config(err) => write!(f, "{}", err),
            QuireError::System(err) => write!(f, "{}", err),
            QuireError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for QuireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuireError::Network(err) => Some(err),
            QuireError::Auth(err) => Some(err),
            QuireError::Store(err) => Some(err),
            QuireError::Config(err) => Some(err),
            QuireError::System(err) => Some(err),
            QuireError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for QuireError {
    fn from(err: NetworkError) -> Self {
        QuireError::Network(err)
    }
}

impl From<AuthError> for QuireError {
    fn from(err: AuthError) -> Self {
        QuireError::Auth(err)
    }
}

impl From<StoreError> for QuireError {
    fn from(err: StoreError) -> Self {
        QuireError::Store(err)
    }
}

impl From<ConfigError> for QuireError {
    fn from(err: ConfigError) -> Self {
        QuireError::Config(err)
    }
}

impl From<SystemError> for QuireError {
    fn from(err: SystemError) -> Self {
        QuireError::System(err)
    }
}

impl From<std::io::Error> for QuireError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        QuireError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for QuireError {
    fn from(err: serde_json::Error) -> Self {
        QuireError::Store(StoreError::Decode {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_network_error_category() {
        let err = QuireError::Network(NetworkError::ConnectionFailed {
            url: "https://example.supabase.co".to_string(),
            message: "refused".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_store_not_found_through_context() {
        let err: QuireError = StoreError::NotFound {
            table: "users".to_string(),
        }
        .into();
        let wrapped = err.with_context(ErrorContext::new("fetch_user"));
        assert!(wrapped.is_not_found());
        assert_eq!(wrapped.context().map(|c| c.operation.as_str()), Some("fetch_user"));
    }

    #[test]
    fn test_function_error_is_server_category() {
        let err: QuireError = StoreError::Function {
            action: "list_all_comments".to_string(),
            message: "Unauthorized".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);
        assert_eq!(err.user_message(), "Unauthorized");
    }

    #[test]
    fn test_reauth_detection() {
        let unauthorized: QuireError = StoreError::Api {
            status: 401,
            code: None,
            message: "JWT expired".to_string(),
            details: None,
        }
        .into();
        assert!(unauthorized.requires_reauth());
        assert!(QuireError::from(AuthError::SessionExpired).requires_reauth());
        assert!(!QuireError::from(ConfigError::Missing { name: "url" }).requires_reauth());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: QuireError = io_err.into();
        assert_eq!(err.category(), ErrorCategory::System);
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: QuireError = json_err.into();
        assert!(matches!(err, QuireError::Store(StoreError::Decode { .. })));
        assert_eq!(err.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_system_error_display() {
        let err = QuireError::System(SystemError::FileNotFound {
            path: PathBuf::from("/tmp/x.png"),
        });
        assert!(err.to_string().contains("/tmp/x.png"));
    }
}
