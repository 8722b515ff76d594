//! Signed-in state on the client side.
//!
//! - [`session`]: the session type and its file cache
//! - [`watcher`]: background tasks that follow session changes

pub mod session;
pub mod watcher;

pub use session::{AuthUser, Session, SessionManager};
pub use watcher::{ensure_profile, spawn_refresh_loop, spawn_session_watcher};
