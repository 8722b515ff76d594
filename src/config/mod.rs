//! Backend connection settings and application configuration.
//!
//! Settings come from the environment first and `~/.quire/config.json`
//! second. The backend URL and the anonymous key are required; everything
//! else has a default.
//!
//! | Setting | Environment | File key | Default |
//! |---------|-------------|----------|---------|
//! | Backend URL | `QUIRE_SUPABASE_URL`, `SUPABASE_URL` | `supabase_url` | required |
//! | Anonymous key | `QUIRE_SUPABASE_ANON_KEY`, `SUPABASE_ANON_KEY` | `supabase_anon_key` | required |
//! | Function name | `QUIRE_FUNCTION` | `function_name` | `manage-posts` |
//! | Image mode | `QUIRE_IMAGE_MODE` | `image_mode` | `upload` |
//! | Blog title | `QUIRE_BLOG_TITLE` | `blog_title` | `Quire` |
//! | Public site URL | `QUIRE_SITE_URL` | `site_url` | none |

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::auth::session::QUIRE_DIR;
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";

pub const DEFAULT_FUNCTION_NAME: &str = "manage-posts";
pub const DEFAULT_BLOG_TITLE: &str = "Quire";

/// How the editor turns a local image file into a post image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// Send the file to the remote function, which stores it and returns a URL.
    #[default]
    Upload,
    /// Embed the file as a `data:` URL.
    Inline,
}

impl FromStr for ImageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upload" => Ok(ImageMode::Upload),
            "inline" => Ok(ImageMode::Inline),
            other => Err(ConfigError::Invalid {
                name: "QUIRE_IMAGE_MODE",
                message: format!("expected 'upload' or 'inline', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageMode::Upload => write!(f, "upload"),
            ImageMode::Inline => write!(f, "inline"),
        }
    }
}

/// Optional values read from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub function_name: Option<String>,
    pub image_mode: Option<ImageMode>,
    pub blog_title: Option<String>,
    pub site_url: Option<String>,
}

impl FileConfig {
    /// Read the file at `path`. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::File {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };
        serde_json::from_str(&raw).map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Project URL without a trailing slash.
    pub url: String,
    pub anon_key: String,
    pub function_name: String,
    pub image_mode: ImageMode,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            image_mode: ImageMode::default(),
        }
    }

    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.image_mode = mode;
        self
    }

    /// Base URL of the data API.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    /// Base URL of the auth API.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    /// URL of the configured remote function.
    pub fn function_url(&self) -> String {
        format!("{}/functions/v1/{}", self.url, self.function_name)
    }
}

/// Everything the application needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub blog_title: String,
    pub session_path: PathBuf,
    /// Public web address of the blog, used for shareable post links
    pub site_url: Option<String>,
}

impl AppConfig {
    pub fn new(backend: BackendConfig) -> Self {
        let session_path = quire_dir()
            .map(|dir| dir.join(SESSION_FILE))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE));
        Self {
            backend,
            blog_title: DEFAULT_BLOG_TITLE.to_string(),
            session_path,
            site_url: None,
        }
    }

    pub fn with_blog_title(mut self, title: impl Into<String>) -> Self {
        self.blog_title = title.into();
        self
    }

    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Web link to `slug`, when the site URL is known.
    pub fn post_url(&self, slug: &str) -> Option<String> {
        self.site_url
            .as_ref()
            .map(|site| format!("{}/post/{}", site, slug))
    }

    /// Build from the process environment and `~/.quire/config.json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match quire_dir() {
            Some(dir) => FileConfig::load(&dir.join(CONFIG_FILE))?,
            None => FileConfig::default(),
        };
        Self::from_sources(|name| std::env::var(name).ok(), file)
    }

    /// Build from an arbitrary variable lookup and file settings.
    ///
    /// Variables win over the file; empty values count as absent.
    pub fn from_sources<F>(lookup: F, file: FileConfig) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
                .map(|v| v.trim().to_string())
        };

        let url = var(&["QUIRE_SUPABASE_URL", "SUPABASE_URL"])
            .or(file.supabase_url)
            .ok_or(ConfigError::Missing {
                name: "QUIRE_SUPABASE_URL",
            })?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "QUIRE_SUPABASE_URL",
                message: format!("'{}' is not an http(s) URL", url),
            });
        }

        let anon_key = var(&["QUIRE_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"])
            .or(file.supabase_anon_key)
            .ok_or(ConfigError::Missing {
                name: "QUIRE_SUPABASE_ANON_KEY",
            })?;

        let image_mode = match var(&["QUIRE_IMAGE_MODE"]) {
            Some(raw) => raw.parse()?,
            None => file.image_mode.unwrap_or_default(),
        };

        let function_name = var(&["QUIRE_FUNCTION"])
            .or(file.function_name)
            .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string());

        let backend = BackendConfig::new(url, anon_key)
            .with_function_name(function_name)
            .with_image_mode(image_mode);

        let mut config = Self::new(backend);
        if let Some(title) = var(&["QUIRE_BLOG_TITLE"]).or(file.blog_title) {
            config = config.with_blog_title(title);
        }
        if let Some(site) = var(&["QUIRE_SITE_URL"]).or(file.site_url) {
            config = config.with_site_url(site);
        }
        Ok(config)
    }
}

/// `~/.quire`, if a home directory exists.
pub fn quire_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(QUIRE_DIR))
}
