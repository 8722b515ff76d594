//! Command-line flags handled before the TUI starts.
//!
//! ```ignore
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(command) {
//!     // flag handled; exit with `result`
//! }
//! // otherwise start the TUI
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::VERSION;

use color_eyre::eyre::{eyre, Result};

use crate::auth::SessionManager;

/// Run a non-TUI command.
///
/// Returns `None` for [`CliCommand::RunTui`], otherwise the outcome of the
/// command; the caller exits afterwards.
pub fn run_cli_command(command: CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::RunTui => None,
        CliCommand::Version => {
            println!("{}", version::version_line());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", version::USAGE);
            Some(Ok(()))
        }
        CliCommand::Logout => Some(logout(SessionManager::new())),
        CliCommand::Unknown(flag) => Some(Err(eyre!(
            "unknown option '{}'\n\n{}",
            flag,
            version::USAGE
        ))),
    }
}

fn logout(manager: Option<SessionManager>) -> Result<()> {
    let manager = manager.ok_or_else(|| eyre!("could not determine the home directory"))?;
    manager.clear()?;
    println!("Signed out. Removed {}", manager.session_path().display());
    Ok(())
}
