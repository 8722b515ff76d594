//! Signed-in session and its on-disk cache.
//!
//! The session is stored in `~/.quire/session.json`. Removing that file is
//! the whole of "forget me on this machine".

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Directory under the home directory holding quire's local state.
pub const QUIRE_DIR: &str = ".quire";

/// The session file name.
const SESSION_FILE: &str = "session.json";

/// Seconds before expiry at which a session is treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Identity returned by the auth provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AuthUser {
    /// Display name the user gave at sign-up, if any.
    pub fn metadata_name(&self) -> Option<String> {
        ["name", "full_name"]
            .iter()
            .find_map(|key| self.user_metadata.get(key).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

/// A signed-in session as issued by the auth provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiration time as Unix timestamp (seconds since epoch).
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the provider only sent the latter.
    pub fn normalized(mut self) -> Self {
        if self.expires_at.is_none() {
            if let Some(expires_in) = self.expires_in {
                self.expires_at = Some(chrono::Utc::now().timestamp() + expires_in);
            }
        }
        self
    }

    /// Check if the access token is expired or about to expire.
    ///
    /// A session without expiry information counts as expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => chrono::Utc::now().timestamp() + EXPIRY_MARGIN_SECS >= expires_at,
            None => true,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }
}

/// Manages the session file.
#[derive(Debug, Clone)]
pub struct SessionManager {
    session_path: PathBuf,
}

impl SessionManager {
    /// Create a manager for `~/.quire/session.json`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(home.join(QUIRE_DIR).join(SESSION_FILE)))
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(session_path: impl Into<PathBuf>) -> Self {
        Self {
            session_path: session_path.into(),
        }
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// Load the stored session.
    ///
    /// Returns `None` if the file is missing or unreadable.
    pub fn load(&self) -> Option<Session> {
        let file = File::open(&self.session_path).ok()?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.session_path.display(), "Ignoring unreadable session file: {}", e);
                None
            }
        }
    }

    /// Save the session, creating the parent directory if needed.
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.session_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.flush()
    }

    /// Remove the session file. Succeeds if it did not exist.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.session_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
