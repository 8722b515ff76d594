//! Entering and leaving TUI mode.

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter the alternate screen with bracketed paste, so pasted text arrives
/// as one event instead of a burst of key presses.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableBracketedPaste)
}

/// Undo [`enter_tui_mode`] and raw mode. Never fails; safe to repeat.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, DisableBracketedPaste, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Best-effort restore used by the panic hook.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_tui_mode_writes_escape_sequences() {
        let mut buffer = Vec::new();
        leave_tui_mode(&mut buffer);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_enter_tui_mode_into_buffer() {
        let mut buffer = Vec::new();
        enter_tui_mode(&mut buffer).unwrap();
        assert!(buffer.starts_with(b"\x1b["));
    }
}
