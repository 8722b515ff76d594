//! Network-related error types.

use std::fmt;

use crate::traits::HttpError;

/// Failures that happen before a usable backend response exists.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the backend failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// Non-2xx response that carried no structured error body.
    HttpStatus { status: u16, message: String },

    /// Invalid URL built from configuration.
    InvalidUrl { url: String },

    /// Generic transport error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } | NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidUrl { .. } | NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the blog backend. Check your internet connection.".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} request timed out.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                401 => "Your session is no longer valid. Please sign in again.".to_string(),
                403 => "You don't have permission for this action.".to_string(),
                404 => "The requested item was not found.".to_string(),
                429 => "Too many requests. Please wait a moment.".to_string(),
                500..=599 => "The blog backend is having trouble. Try again later.".to_string(),
                _ => format!("The backend returned HTTP {}.", status),
            },
            NetworkError::InvalidUrl { url } => format!("Invalid backend URL: {}", url),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection to {} failed: {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Map the HTTP seam's error into a network error for `url`.
pub fn classify_http_error(err: HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: url.to_string(),
        },
        HttpError::ServerError { status, message } => {
            NetworkError::HttpStatus { status, message }
        }
        HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
            url: url.to_string(),
        },
        HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        let server = NetworkError::HttpStatus {
            status: 503,
            message: String::new(),
        };
        let client = NetworkError::HttpStatus {
            status: 400,
            message: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn test_classify_connection_failure() {
        let err = classify_http_error(
            HttpError::ConnectionFailed("refused".to_string()),
            "http://localhost/rest/v1/posts",
        );
        match err {
            NetworkError::ConnectionFailed { url, message } => {
                assert_eq!(url, "http://localhost/rest/v1/posts");
                assert_eq!(message, "refused");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_message_mentions_sign_in() {
        let err = NetworkError::HttpStatus {
            status: 401,
            message: "JWT expired".to_string(),
        };
        assert!(err.user_message().contains("sign in"));
    }
}
