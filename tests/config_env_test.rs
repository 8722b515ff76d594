//! Configuration loading from the process environment and the config file.
//!
//! These tests mutate process-wide environment variables (including `HOME`)
//! and therefore run serially.

use quire::config::{AppConfig, ImageMode, DEFAULT_BLOG_TITLE};
use quire::error::ConfigError;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const VARS: &[&str] = &[
    "QUIRE_SUPABASE_URL",
    "SUPABASE_URL",
    "QUIRE_SUPABASE_ANON_KEY",
    "SUPABASE_ANON_KEY",
    "QUIRE_FUNCTION",
    "QUIRE_IMAGE_MODE",
    "QUIRE_BLOG_TITLE",
    "QUIRE_SITE_URL",
];

/// Clears every quire variable and points `HOME` at a fresh directory.
struct EnvGuard {
    home: TempDir,
    old_home: Option<String>,
}

impl EnvGuard {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let old_home = env::var("HOME").ok();
        env::set_var("HOME", home.path());
        for var in VARS {
            env::remove_var(var);
        }
        Self { home, old_home }
    }

    fn write_config(&self, json: &str) {
        let dir = self.home.path().join(".quire");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.json"), json).unwrap();
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in VARS {
            env::remove_var(var);
        }
        match &self.old_home {
            Some(home) => env::set_var("HOME", home),
            None => env::remove_var("HOME"),
        }
    }
}

#[test]
#[serial]
fn test_missing_url_is_reported() {
    let _guard = EnvGuard::new();
    env::set_var("QUIRE_SUPABASE_ANON_KEY", "anon");

    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Missing {
            name: "QUIRE_SUPABASE_URL"
        }
    ));
}

#[test]
#[serial]
fn test_environment_defaults() {
    let guard = EnvGuard::new();
    env::set_var("SUPABASE_URL", "https://abc.supabase.co/");
    env::set_var("SUPABASE_ANON_KEY", "anon");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.backend.anon_key, "anon");
    assert_eq!(config.backend.image_mode, ImageMode::Upload);
    assert_eq!(config.blog_title, DEFAULT_BLOG_TITLE);
    assert!(config.site_url.is_none());
    assert!(config.session_path.starts_with(guard.home.path()));
    assert!(config.backend.function_url().ends_with("/functions/v1/manage-posts"));
}

#[test]
#[serial]
fn test_file_fills_in_what_environment_lacks() {
    let guard = EnvGuard::new();
    guard.write_config(
        r#"{
            "supabase_url": "https://file.supabase.co",
            "supabase_anon_key": "file-key",
            "image_mode": "inline",
            "blog_title": "Notes",
            "site_url": "https://blog.example.com/"
        }"#,
    );
    env::set_var("QUIRE_SUPABASE_ANON_KEY", "env-key");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.backend.anon_key, "env-key");
    assert!(config.backend.rest_url().starts_with("https://file.supabase.co"));
    assert_eq!(config.backend.image_mode, ImageMode::Inline);
    assert_eq!(config.blog_title, "Notes");
    assert_eq!(
        config.post_url("hello-world").as_deref(),
        Some("https://blog.example.com/post/hello-world")
    );
}

#[test]
#[serial]
fn test_bad_image_mode_is_rejected() {
    let _guard = EnvGuard::new();
    env::set_var("QUIRE_SUPABASE_URL", "https://abc.supabase.co");
    env::set_var("QUIRE_SUPABASE_ANON_KEY", "anon");
    env::set_var("QUIRE_IMAGE_MODE", "ftp");

    assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Invalid {
            name: "QUIRE_IMAGE_MODE",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_malformed_config_file_is_an_error() {
    let guard = EnvGuard::new();
    guard.write_config("{ not json");

    assert!(matches!(AppConfig::from_env(), Err(ConfigError::File { .. })));
}
