//! Data store and remote function errors.

use std::fmt;

use serde::Deserialize;

/// PostgREST code for "JSON object requested, multiple (or no) rows returned".
pub const PGRST_NO_ROWS: &str = "PGRST116";

/// Postgres unique constraint violation.
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Error payload returned by the hosted data API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "msg", alias = "error_description")]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Errors reported by the data store or by a remote function.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A single-row read matched nothing.
    NotFound { table: String },

    /// The store rejected the query.
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
    },

    /// A remote function answered with an `error` field.
    Function { action: String, message: String },

    /// The response body did not match the expected shape.
    Decode { message: String },
}

impl StoreError {
    /// Build an API error from a status code and raw body.
    ///
    /// A `PGRST116` body on a single-row read becomes `NotFound`.
    pub fn from_response(table: &str, status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        if parsed.code.as_deref() == Some(PGRST_NO_ROWS) {
            return StoreError::NotFound {
                table: table.to_string(),
            };
        }
        StoreError::Api {
            status,
            code: parsed.code,
            message: parsed
                .message
                .unwrap_or_else(|| format!("request to {} failed", table)),
            details: parsed.details,
        }
    }

    /// Whether this is the expected-absence case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Whether the store rejected a write because `constraint` was violated.
    pub fn violates(&self, constraint: &str) -> bool {
        match self {
            StoreError::Api { message, details, .. } => {
                message.contains(constraint)
                    || details.as_deref().is_some_and(|d| d.contains(constraint))
            }
            _ => false,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Api { status, .. } if *status >= 500)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::NotFound { table } => {
                format!("No matching {} record was found.", table.trim_end_matches('s'))
            }
            StoreError::Api { message, .. } => message.clone(),
            StoreError::Function { message, .. } => message.clone(),
            StoreError::Decode { .. } => {
                "Received an unexpected response from the backend.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "E_STORE_NOT_FOUND",
            StoreError::Api { .. } => "E_STORE_API",
            StoreError::Function { .. } => "E_STORE_FUNCTION",
            StoreError::Decode { .. } => "E_STORE_DECODE",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { table } => write!(f, "No rows in {}", table),
            StoreError::Api {
                status,
                code,
                message,
                ..
            } => match code {
                Some(code) => write!(f, "Store error {} ({}): {}", status, code, message),
                None => write!(f, "Store error {}: {}", status, message),
            },
            StoreError::Function { action, message } => {
                write!(f, "Function action '{}' failed: {}", action, message)
            }
            StoreError::Decode { message } => write!(f, "Decode error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}
