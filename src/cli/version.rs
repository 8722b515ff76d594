//! `--version` and `--help` output.

/// Version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: quire [OPTIONS]

A terminal client for a Supabase-backed blog.

Options:
  -h, --help       Print this help
  -V, --version    Print the version
      --logout     Forget the saved session and exit

Environment:
  QUIRE_SUPABASE_URL        Project URL (or SUPABASE_URL)
  QUIRE_SUPABASE_ANON_KEY   Anon key (or SUPABASE_ANON_KEY)
  QUIRE_FUNCTION            Remote function name (default: manage-posts)
  QUIRE_IMAGE_MODE          upload | inline
  QUIRE_BLOG_TITLE          Title shown in the header
  QUIRE_SITE_URL            Public blog address for shared links
  QUIRE_LOG                 Log filter (default: quire=info)

Settings can also be placed in ~/.quire/config.json.";

pub fn version_line() -> String {
    format!("quire {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        assert!(version_line().starts_with("quire "));
        assert!(VERSION.split('.').count() >= 2);
    }

    #[test]
    fn test_usage_lists_flags() {
        for flag in ["--help", "--version", "--logout"] {
            assert!(USAGE.contains(flag));
        }
    }
}
