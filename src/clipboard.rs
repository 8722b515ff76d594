//! System clipboard and browser hand-off.
//!
//! Self-contained: no coupling to UI, networking, or application state.

/// Errors from the desktop integrations.
#[derive(Debug, thiserror::Error)]
pub enum DesktopError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("Could not open browser: {0}")]
    Browser(String),
    #[error("Not a web link: {0}")]
    NotWebLink(String),
}

/// Put `text` on the system clipboard.
///
/// Uses `arboard` to access OS-level clipboard (NSPasteboard on macOS,
/// X11/Wayland on Linux).
pub fn copy_text(text: &str) -> Result<(), DesktopError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| DesktopError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| DesktopError::Clipboard(e.to_string()))
}

/// Check that `url` is an http(s) link before handing it to the OS.
pub fn is_web_link(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("https://") || url.starts_with("http://")) && !url.contains(char::is_whitespace)
}

/// Open `url` in the default browser.
pub fn open_in_browser(url: &str) -> Result<(), DesktopError> {
    if !is_web_link(url) {
        return Err(DesktopError::NotWebLink(url.to_string()));
    }
    webbrowser::open(url.trim()).map_err(|e| DesktopError::Browser(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_web_link() {
        assert!(is_web_link("https://news.example/a"));
        assert!(is_web_link("  http://x.y  "));

        assert!(!is_web_link(""));
        assert!(!is_web_link("javascript:alert(1)"));
        assert!(!is_web_link("file:///etc/passwd"));
        assert!(!is_web_link("https://a b"));
    }

    #[test]
    fn test_open_rejects_non_web_link() {
        assert!(matches!(
            open_in_browser("ftp://x"),
            Err(DesktopError::NotWebLink(_))
        ));
    }
}
