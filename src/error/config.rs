//! Configuration errors.

use thiserror::Error;

/// Problems with the backend connection settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required setting was absent from every source.
    #[error("Missing required setting {name}")]
    Missing { name: &'static str },

    /// A setting was present but unusable.
    #[error("Invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },

    /// The config file exists but could not be read or parsed.
    #[error("Could not read config file {path}: {message}")]
    File { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Missing { .. } => "E_CFG_MISSING",
            ConfigError::Invalid { .. } => "E_CFG_INVALID",
            ConfigError::File { .. } => "E_CFG_FILE",
        }
    }
}
