//! Command-line argument parsing.

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print the version
    Version,
    /// Print usage
    Help,
    /// Delete the saved session and exit
    Logout,
    /// Run the TUI application (default)
    RunTui,
    /// A flag nobody knows
    Unknown(String),
}

/// Parse command-line arguments. The first flag decides.
///
/// ```
/// use quire::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["quire".to_string(), "--logout".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Logout);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    match args.skip(1).next().as_deref() {
        None => CliCommand::RunTui,
        Some("--version" | "-V") => CliCommand::Version,
        Some("--help" | "-h") => CliCommand::Help,
        Some("--logout") => CliCommand::Logout,
        Some(other) => CliCommand::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["quire".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
        assert_eq!(parse(&["--help"]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
        assert_eq!(parse(&["--logout"]), CliCommand::Logout);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::RunTui);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(parse(&["--sync"]), CliCommand::Unknown("--sync".to_string()));
    }
}
