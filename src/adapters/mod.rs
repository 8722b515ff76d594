//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionStore`] - File-based session storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::FileSessionStore;
pub use mock::{InMemorySessionStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
