//! System-related error types.
//!
//! Filesystem access for the session file, the config file, image files
//! picked in the editor and the log directory.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum SystemError {
    /// File not found.
    FileNotFound { path: PathBuf },

    /// Permission denied for a file operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Could not determine home directory.
    NoHomeDirectory,

    /// Clipboard or browser integration unavailable.
    Unavailable { resource: String, message: String },
}

impl SystemError {
    /// Check if this error is likely transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, SystemError::IoError { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SystemError::FileNotFound { path } => {
                format!("File not found: {}", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                format!("Permission denied while trying to {} {}", operation, path.display())
            }
            SystemError::IoError {
                operation, message, ..
            } => format!("Failed to {}: {}", operation, message),
            SystemError::NoHomeDirectory => {
                "Could not determine your home directory.".to_string()
            }
            SystemError::Unavailable { resource, message } => {
                format!("{} is not available: {}", resource, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::FileNotFound { .. } => "E_SYS_NOT_FOUND",
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::NoHomeDirectory => "E_SYS_HOME",
            SystemError::Unavailable { .. } => "E_SYS_UNAVAILABLE",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied ({}): {}", operation, path.display())
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(f, "I/O error during {} on {}: {}", operation, p.display(), message),
                None => write!(f, "I/O error during {}: {}", operation, message),
            },
            SystemError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            SystemError::Unavailable { resource, message } => {
                write!(f, "{} unavailable: {}", resource, message)
            }
        }
    }
}

impl std::error::Error for SystemError {}

/// Classify an I/O error, attaching the path when one is known.
pub fn classify_io_error(
    err: std::io::Error,
    path: Option<PathBuf>,
    operation: &str,
) -> SystemError {
    use std::io::ErrorKind;

    match (err.kind(), path) {
        (ErrorKind::NotFound, Some(path)) => SystemError::FileNotFound { path },
        (ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        (_, path) => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_classify_not_found_with_path() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let classified = classify_io_error(err, Some(PathBuf::from("/tmp/cover.png")), "read");
        assert!(matches!(classified, SystemError::FileNotFound { .. }));
    }

    #[test]
    fn test_classify_not_found_without_path() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let classified = classify_io_error(err, None, "read");
        assert!(matches!(classified, SystemError::IoError { .. }));
        assert!(classified.is_transient());
    }
}
