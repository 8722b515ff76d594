//! Unified error handling for quire.
//!
//! - **Error Categories**: classification used for inline messages and retry hints
//! - **Domain-specific Errors**: network, auth, store, config and system errors
//! - **Unified Error Type**: `QuireError` consolidates them
//! - **Error Context**: the operation and record that failed
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Auth | Missing or expired session | No |
//! | Server | Backend 5xx, function errors | Yes |
//! | Client | Unexpected response shape | No |
//! | User | Rejected input, not found | No |
//! | System | Filesystem, clipboard, browser | Sometimes |
//! | Configuration | Missing connection secrets | No |
//!
//! Nothing retries automatically; retryability only changes the hint shown
//! next to the inline error.

mod auth;
mod category;
mod config;
mod context;
mod network;
mod quire_error;
mod result;
mod store;
mod system;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use network::{classify_http_error, NetworkError};
pub use quire_error::QuireError;
pub use result::{QuireResult, ResultExt};
pub use store::{ApiErrorBody, StoreError, PGRST_NO_ROWS, PG_UNIQUE_VIOLATION};
pub use system::{classify_io_error, SystemError};
