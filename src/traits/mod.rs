//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PATCH, DELETE)
//! - [`SessionStore`] - Signed-in session persistence

pub mod http;
pub mod session;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use session::{SessionStore, SessionStoreError};
